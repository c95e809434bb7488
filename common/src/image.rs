//! 画像エンコード（Data URL）
//!
//! ゲートウェイに入る画像はすべて `data:<mime>;base64,<payload>` 形式の文字列。

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{Error, Result};

/// カメラ・デモ画像のエンコード形式
pub const CAPTURE_MIME_TYPE: &str = "image/jpeg";

/// カメラ・デモ画像のJPEG品質
pub const CAPTURE_JPEG_QUALITY: f64 = 0.8;

/// Data URLからBase64データ部分を抽出
///
/// # Arguments
/// * `data_url` - "data:image/jpeg;base64,/9j/4AAQ..." 形式のData URL
///
/// # Returns
/// Base64エンコードされたデータ部分、または抽出失敗時はNone
pub fn extract_base64_from_data_url(data_url: &str) -> Option<&str> {
    data_url.split_once(',').map(|(_, payload)| payload)
}

/// Data URLからMIMEタイプを抽出
///
/// MIMEタイプが読み取れない場合は "image/jpeg" を返す
pub fn extract_mime_type_from_data_url(data_url: &str) -> &str {
    data_url
        .strip_prefix("data:")
        .and_then(|rest| rest.split([';', ',']).next())
        .filter(|mime| !mime.is_empty())
        .unwrap_or(CAPTURE_MIME_TYPE)
}

/// 検証済みのエンコード画像
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage<'a> {
    pub mime_type: &'a str,
    pub payload: &'a str,
}

impl<'a> EncodedImage<'a> {
    /// Data URLを分解し、ペイロードがBase64として正しいか確認する
    pub fn parse(data_url: &'a str) -> Result<Self> {
        if !data_url.starts_with("data:") {
            return Err(Error::AnalysisFailed("Invalid data URL".into()));
        }
        let payload = extract_base64_from_data_url(data_url)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| Error::AnalysisFailed("Invalid data URL".into()))?;

        STANDARD
            .decode(payload)
            .map_err(|e| Error::AnalysisFailed(format!("Invalid image data: {}", e)))?;

        Ok(Self {
            mime_type: extract_mime_type_from_data_url(data_url),
            payload,
        })
    }

    /// デコード後のバイト数（ログ用の概算）
    pub fn decoded_len(&self) -> usize {
        let padding = self.payload.bytes().rev().take_while(|b| *b == b'=').count();
        (self.payload.len() / 4) * 3 - padding.min(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =============================================
    // Data URL抽出テスト
    // =============================================

    #[test]
    fn test_extract_base64_from_data_url_jpeg() {
        let data_url = "data:image/jpeg;base64,/9j/4AAQSkZJRg==";
        assert_eq!(extract_base64_from_data_url(data_url), Some("/9j/4AAQSkZJRg=="));
    }

    #[test]
    fn test_extract_base64_from_data_url_invalid() {
        assert_eq!(extract_base64_from_data_url("not a data url"), None);
        assert_eq!(extract_base64_from_data_url(""), None);
    }

    #[test]
    fn test_extract_mime_type() {
        assert_eq!(extract_mime_type_from_data_url("data:image/png;base64,iVBORw0KGgo="), "image/png");
        assert_eq!(extract_mime_type_from_data_url("data:image/webp;base64,UklGR"), "image/webp");
    }

    #[test]
    fn test_extract_mime_type_default() {
        // 不正なフォーマットの場合はデフォルト値を返す
        assert_eq!(extract_mime_type_from_data_url("invalid"), "image/jpeg");
        assert_eq!(extract_mime_type_from_data_url("data:;base64,AAAA"), "image/jpeg");
    }

    // =============================================
    // EncodedImage
    // =============================================

    #[test]
    fn test_encoded_image_parse() {
        let image = EncodedImage::parse("data:image/jpeg;base64,/9j/4AAQSkZJRg==").expect("パース失敗");
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.payload, "/9j/4AAQSkZJRg==");
        assert_eq!(image.decoded_len(), 10);
    }

    #[test]
    fn test_encoded_image_rejects_plain_string() {
        let err = EncodedImage::parse("hello").unwrap_err();
        assert_eq!(err, Error::AnalysisFailed("Invalid data URL".into()));
    }

    #[test]
    fn test_encoded_image_rejects_empty_payload() {
        assert!(EncodedImage::parse("data:image/jpeg;base64,").is_err());
    }

    #[test]
    fn test_encoded_image_rejects_bad_base64() {
        let err = EncodedImage::parse("data:image/jpeg;base64,@@@@").unwrap_err();
        assert!(matches!(err, Error::AnalysisFailed(ref m) if m.starts_with("Invalid image data")));
    }
}
