//! エラーケーステスト
//!
//! 各種エラーの表示と変換を検証

use circuit_guard::common::Error;
use circuit_guard::CircuitGuardError;

/// 検査エラーは表示メッセージを変えずに包む
#[test]
fn test_inspection_error_is_transparent() {
    let cases = vec![
        (Error::Configuration, "System Configuration Error: The AI core is not currently active."),
        (Error::EmptyResponse, "Empty response from AI"),
        (Error::DeviceAccessDenied, "Camera access denied. Please check permissions."),
        (Error::AnalysisFailed("API error 500: boom".into()), "API error 500: boom"),
    ];

    for (inner, expected) in cases {
        let err = CircuitGuardError::from(inner);
        assert_eq!(err.to_string(), expected);
    }
}

/// CircuitGuardErrorのDisplay実装確認
#[test]
fn test_native_error_display() {
    let errors = vec![
        CircuitGuardError::Config("テスト設定エラー".to_string()),
        CircuitGuardError::MissingApiKey("GEMINI_API_KEY".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "Error display should not be empty");
    }
}

#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: CircuitGuardError = io_err.into();
    assert!(matches!(err, CircuitGuardError::Io(_)));
    assert!(err.to_string().contains("file not found"));
}

#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid").unwrap_err();
    let err: CircuitGuardError = json_err.into();
    assert!(matches!(err, CircuitGuardError::Json(_)));
}
