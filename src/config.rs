use crate::error::{CircuitGuardError, Result};
use circuit_guard_common::gateway::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use circuit_guard_common::{CredentialSource, GatewayConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
const DEFAULT_TIMEOUT_SECONDS: u64 = 120;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    /// APIキーを読む環境変数名（設定ファイルの `api_key` より優先）
    pub api_key_env: String,
    pub model: String,
    pub endpoint: String,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: DEFAULT_API_KEY_ENV.into(),
            model: DEFAULT_MODEL.into(),
            endpoint: DEFAULT_ENDPOINT.into(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// ファイルがなければデフォルト設定
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %path.display(), model = %config.model, "config loaded");
            Ok(config)
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CircuitGuardError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("circuit-guard").join("config.json"))
    }

    pub fn api_key(&self) -> Result<String> {
        resolve_api_key(&self.api_key_env, self.api_key.as_deref())
            .ok_or_else(|| CircuitGuardError::MissingApiKey(self.api_key_env.clone()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            endpoint: self.endpoint.clone(),
            model: self.model.clone(),
        }
    }
}

// 環境変数を優先
fn resolve_api_key(env_var: &str, file_key: Option<&str>) -> Option<String> {
    std::env::var(env_var)
        .ok()
        .filter(|k| !k.trim().is_empty())
        .or_else(|| file_key.filter(|k| !k.trim().is_empty()).map(str::to_string))
}

/// 呼び出しのたびに環境変数を読み直す認証情報
#[derive(Debug, Clone)]
pub struct ConfigCredentials {
    env_var: String,
    file_key: Option<String>,
}

impl ConfigCredentials {
    pub fn from_config(config: &Config) -> Self {
        Self {
            env_var: config.api_key_env.clone(),
            file_key: config.api_key.clone(),
        }
    }
}

impl CredentialSource for ConfigCredentials {
    fn api_key(&self) -> Option<String> {
        resolve_api_key(&self.env_var, self.file_key.as_deref())
    }
}
