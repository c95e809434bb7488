//! APIレスポンスパーサー
//!
//! レスポンステキストからJSONオブジェクトを抽出し、検査レスポンスとして検証する

use crate::error::{Error, Result};
use crate::types::InspectionReply;

/// レスポンスからJSONオブジェクト部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 生の {...} オブジェクト
/// 3. エラー
///
/// # Examples
/// ```
/// use circuit_guard_common::extract_json;
///
/// let response = "Here you go: {\"status\": \"Pass\"}";
/// let json = extract_json(response).unwrap();
/// assert_eq!(json, "{\"status\": \"Pass\"}");
/// ```
pub fn extract_json(response: &str) -> Result<&str> {
    // ```json ... ``` ブロックを探す
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7; // "```json" の長さ
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    // 生の {...} を探す
    if let Some(start) = response.find('{') {
        if let Some(end) = response.rfind('}') {
            if end >= start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(Error::AnalysisFailed("JSON object not found in response".into()))
}

/// 検査レスポンスをパース
///
/// スキーマ指定により通常は純粋なJSONが返るが、コードブロックで包まれた場合も受け付ける。
/// 必須項目の欠落や未知の判定・重大度は `AnalysisFailed`。
pub fn parse_inspection_reply(response: &str) -> Result<InspectionReply> {
    if response.trim().is_empty() {
        return Err(Error::EmptyResponse);
    }
    let json_str = extract_json(response)?;
    let reply: InspectionReply = serde_json::from_str(json_str)?;
    Ok(reply)
}
