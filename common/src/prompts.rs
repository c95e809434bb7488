//! プロンプトとレスポンススキーマ
//!
//! - ANALYSIS_PROMPT: 基板画像の不良検査指示
//! - build_reference_prompt: IPC-A-610 参照規格検索の指示
//! - inspection_response_schema: 検査レスポンスの構造化スキーマ

use serde_json::{json, Value};

/// 不良検査の指示文
pub const ANALYSIS_PROMPT: &str = "Analyze this electronic component/PCB image for manufacturing defects. 
  Identify components and look for:
  - Solder bridges or shorts
  - Missing components (pads without parts)
  - Burnt or discolored areas
  - Component misalignment (rotation/offset)
  - Poor solder joints (cold joints, insufficient wetting)
  
  Provide a detailed technical report in JSON format. If the unit is scrap, explain why.";

/// 参照する検査規格
pub const REFERENCE_STANDARD: &str = "IPC-A-610";

/// 参照規格検索プロンプト生成
///
/// # Arguments
/// * `query` - 検索語（通常は "<不良種別> <部品>"）
pub fn build_reference_prompt(query: &str) -> String {
    format!(
        "Find technical reference and standard {} criteria for the following defect: {}",
        REFERENCE_STANDARD, query
    )
}

/// 検査レスポンスのスキーマ
///
/// status / summary / defects と、各不良の6項目・位置の4項目はすべて必須。
pub fn inspection_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "status": { "type": "STRING", "description": "Pass or Fail status" },
            "summary": { "type": "STRING", "description": "Executive summary of the inspection" },
            "defects": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "component": { "type": "STRING" },
                        "type": { "type": "STRING" },
                        "confidence": { "type": "NUMBER" },
                        "description": { "type": "STRING" },
                        "severity": { "type": "STRING" },
                        "location": {
                            "type": "OBJECT",
                            "properties": {
                                "x": { "type": "NUMBER" },
                                "y": { "type": "NUMBER" },
                                "width": { "type": "NUMBER" },
                                "height": { "type": "NUMBER" }
                            },
                            "required": ["x", "y", "width", "height"]
                        }
                    },
                    "required": ["component", "type", "confidence", "description", "severity", "location"]
                }
            }
        },
        "required": ["status", "summary", "defects"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_prompt_names_all_categories() {
        for needle in [
            "Solder bridges or shorts",
            "Missing components",
            "Burnt or discolored",
            "misalignment",
            "Poor solder joints",
            "If the unit is scrap, explain why",
        ] {
            assert!(ANALYSIS_PROMPT.contains(needle), "指示文に含まれない: {}", needle);
        }
    }

    #[test]
    fn test_build_reference_prompt() {
        let prompt = build_reference_prompt("Short Circuit R12");
        assert!(prompt.contains("IPC-A-610"));
        assert!(prompt.ends_with("Short Circuit R12"));
    }

    #[test]
    fn test_schema_required_fields() {
        let schema = inspection_response_schema();
        assert_eq!(schema["required"], json!(["status", "summary", "defects"]));

        let item = &schema["properties"]["defects"]["items"];
        assert_eq!(
            item["required"],
            json!(["component", "type", "confidence", "description", "severity", "location"])
        );
        assert_eq!(
            item["properties"]["location"]["required"],
            json!(["x", "y", "width", "height"])
        );
        assert_eq!(item["properties"]["confidence"]["type"], "NUMBER");
    }
}
