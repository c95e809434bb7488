//! 画像ファイルを Data URL に変換する

use crate::error::Result;
use base64::{engine::general_purpose::STANDARD, Engine};
use circuit_guard_common::Error;
use std::path::Path;

/// 拡張子から MIME タイプを推定
pub fn mime_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

pub fn data_url_from_path(path: &Path) -> Result<String> {
    let mime_type = mime_type_for(path)
        .ok_or_else(|| Error::ImageLoad(format!("Unsupported image type: {}", path.display())))?;
    let bytes = std::fs::read(path)?;
    Ok(format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes)))
}
