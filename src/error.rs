use thiserror::Error;

#[derive(Error, Debug)]
pub enum CircuitGuardError {
    /// 検査ドメインのエラー（表示メッセージはそのまま）
    #[error(transparent)]
    Inspection(#[from] circuit_guard_common::Error),

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。環境変数 {0} または設定ファイルの api_key を設定してください")]
    MissingApiKey(String),

    #[error("JSON解析エラー: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CircuitGuardError>;
