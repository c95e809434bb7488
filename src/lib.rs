//! CircuitGuard native host
//!
//! `circuit-guard-common` のゲートウェイを reqwest で動かすためのトランスポートと設定層。

pub mod config;
pub mod error;
pub mod image_file;
pub mod transport;

pub use circuit_guard_common as common;
pub use config::{Config, ConfigCredentials};
pub use error::{CircuitGuardError, Result};
pub use transport::ReqwestTransport;

use circuit_guard_common::InspectionGateway;

/// 設定からゲートウェイを組み立てる
///
/// キーは呼び出しごとに読み直すので、この時点で未設定でも組み立ては失敗しない。
pub fn gateway(config: &Config) -> Result<InspectionGateway<ReqwestTransport, ConfigCredentials>> {
    if let Err(err) = config.api_key() {
        tracing::warn!(env_var = %config.api_key_env, "{}", err);
    }
    let transport = ReqwestTransport::new(config.timeout())?;
    let credentials = ConfigCredentials::from_config(config);
    Ok(InspectionGateway::new(transport, credentials).with_config(config.gateway_config()))
}
