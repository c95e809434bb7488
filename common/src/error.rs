//! エラー型定義
//!
//! 画面に出す文言は `Display` がそのまま担う。

use thiserror::Error;

/// 認証情報が拒否されたときにサービスが返すメッセージの一部
pub const CREDENTIAL_REJECTED_MARKER: &str = "API key not valid";

/// 共通エラー型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// 認証情報が未設定、またはサービスに拒否された
    #[error("System Configuration Error: The AI core is not currently active.")]
    Configuration,

    /// サービスがテキストを返さなかった
    #[error("Empty response from AI")]
    EmptyResponse,

    /// 通信・HTTP・スキーマ不一致などそれ以外の失敗（元のメッセージを保持）
    #[error("{0}")]
    AnalysisFailed(String),

    /// カメラの使用許可が得られなかった
    #[error("Camera access denied. Please check permissions.")]
    DeviceAccessDenied,

    /// ファイル読込・デモ画像取得・エンコードの失敗
    #[error("{0}")]
    ImageLoad(String),
}

impl Error {
    /// 認証拒否のメッセージを `Configuration` に読み替える
    ///
    /// それ以外のエラーは変更せずに返す。
    pub fn classify(self) -> Self {
        match self {
            Error::AnalysisFailed(message) if message.contains(CREDENTIAL_REJECTED_MARKER) => {
                Error::Configuration
            }
            other => other,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::AnalysisFailed(format!("JSON parse error: {}", err))
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_configuration() {
        let display = format!("{}", Error::Configuration);
        assert_eq!(
            display,
            "System Configuration Error: The AI core is not currently active."
        );
    }

    #[test]
    fn test_error_display_analysis_failed_keeps_raw_message() {
        let error = Error::AnalysisFailed("API error 500: backend unavailable".to_string());
        assert_eq!(format!("{}", error), "API error 500: backend unavailable");
    }

    #[test]
    fn test_classify_credential_rejection() {
        let error = Error::AnalysisFailed(
            "API error 400: API key not valid. Please pass a valid API key.".to_string(),
        );
        assert_eq!(error.classify(), Error::Configuration);
    }

    #[test]
    fn test_classify_keeps_other_errors() {
        let error = Error::AnalysisFailed("API error 429: quota exceeded".to_string());
        assert_eq!(
            error.classify(),
            Error::AnalysisFailed("API error 429: quota exceeded".to_string())
        );
        assert_eq!(Error::EmptyResponse.classify(), Error::EmptyResponse);
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::AnalysisFailed(ref m) if m.starts_with("JSON parse error")));
    }

    #[test]
    fn test_error_display_device_access_denied() {
        let display = format!("{}", Error::DeviceAccessDenied);
        assert!(display.contains("Camera access denied"));
    }
}
