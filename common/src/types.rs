//! 検査結果の型定義
//!
//! ブラウザ(WASM)とネイティブで共有される型:
//! - Defect: 1件の不良（位置・種別・重大度・確信度）
//! - InspectionReply: AIサービスが返す構造化レスポンス
//! - InspectionResult: 最終出力（レスポンス＋タイムスタンプ＋画像）

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 判定結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum InspectionStatus {
    Pass,
    Fail,
}

impl InspectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InspectionStatus::Pass => "Pass",
            InspectionStatus::Fail => "Fail",
        }
    }
}

impl FromStr for InspectionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pass" => Ok(InspectionStatus::Pass),
            "fail" => Ok(InspectionStatus::Fail),
            _ => Err(format!("unknown inspection status: {:?}", s)),
        }
    }
}

impl TryFrom<String> for InspectionStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<InspectionStatus> for String {
    fn from(status: InspectionStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for InspectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 不良種別
///
/// 既知の5分類と `None` 以外のラベルは `Other` に元の文字列のまま保持する。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DefectType {
    ShortCircuit,
    MissingComponent,
    PoorSolder,
    Burnt,
    Misalignment,
    None,
    Other(String),
}

impl DefectType {
    /// 既知の分類
    pub const KNOWN: &'static [DefectType] = &[
        DefectType::ShortCircuit,
        DefectType::MissingComponent,
        DefectType::PoorSolder,
        DefectType::Burnt,
        DefectType::Misalignment,
        DefectType::None,
    ];

    pub fn label(&self) -> &str {
        match self {
            DefectType::ShortCircuit => "Short Circuit",
            DefectType::MissingComponent => "Missing Component",
            DefectType::PoorSolder => "Poor Solder",
            DefectType::Burnt => "Burnt",
            DefectType::Misalignment => "Misalignment",
            DefectType::None => "None",
            DefectType::Other(label) => label,
        }
    }
}

impl From<String> for DefectType {
    fn from(value: String) -> Self {
        let normalized = value.split_whitespace().collect::<Vec<_>>().join(" ");
        DefectType::KNOWN
            .iter()
            .find(|known| known.label().eq_ignore_ascii_case(&normalized))
            .cloned()
            .unwrap_or(DefectType::Other(value))
    }
}

impl From<&str> for DefectType {
    fn from(value: &str) -> Self {
        DefectType::from(value.to_string())
    }
}

impl From<DefectType> for String {
    fn from(defect_type: DefectType) -> Self {
        match defect_type {
            DefectType::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for DefectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 重大度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Severity {
    Critical,
    Major,
    Minor,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::Major => "Major",
            Severity::Minor => "Minor",
            Severity::Info => "Info",
        }
    }

    pub fn is_critical(&self) -> bool {
        matches!(self, Severity::Critical)
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "critical" => Ok(Severity::Critical),
            "major" => Ok(Severity::Major),
            "minor" => Ok(Severity::Minor),
            "info" => Ok(Severity::Info),
            _ => Err(format!("unknown severity: {:?}", s)),
        }
    }
}

impl TryFrom<String> for Severity {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Severity> for String {
    fn from(severity: Severity) -> Self {
        severity.as_str().to_string()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 不良位置（画像サイズに対する0〜100のパーセント、原点は左上）
///
/// 範囲チェックはしない。サービスの出力をそのまま使う。
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// 1件の不良
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Defect {
    pub component: String,
    #[serde(rename = "type")]
    pub defect_type: DefectType,
    pub confidence: f64,
    pub description: String,
    pub severity: Severity,
    pub location: Location,
}

impl Defect {
    /// 参照規格検索に使うクエリ（"<種別> <部品>"）
    pub fn reference_query(&self) -> String {
        format!("{} {}", self.defect_type, self.component)
    }

    /// オーバーレイのラベル（"<部品>: <種別>"）
    pub fn overlay_label(&self) -> String {
        format!("{}: {}", self.component, self.defect_type)
    }
}

/// AIサービスの構造化レスポンス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionReply {
    pub status: InspectionStatus,
    pub summary: String,
    pub defects: Vec<Defect>,
}

/// 検査結果
///
/// 解析1回の成功につき1つだけ生成され、以後は変更しない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionResult {
    pub status: InspectionStatus,
    pub defects: Vec<Defect>,
    pub summary: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl InspectionResult {
    /// レスポンスにタイムスタンプと画像を付加して結果を生成
    pub fn from_reply(reply: InspectionReply, timestamp: DateTime<Utc>, image: Option<String>) -> Self {
        Self {
            status: reply.status,
            defects: reply.defects,
            summary: reply.summary,
            timestamp,
            image,
        }
    }

    pub fn is_pass(&self) -> bool {
        self.status == InspectionStatus::Pass
    }

    /// 判定カードに表示するバッチID
    ///
    /// タイムスタンプから導出するので再描画しても変わらない。
    pub fn batch_id(&self) -> String {
        let millis = self.timestamp.timestamp_millis().unsigned_abs();
        let encoded = to_base36(millis);
        let start = encoded.len().saturating_sub(6);
        encoded[start..].to_string()
    }
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

/// 参照規格の出典リンク
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceLink {
    pub title: String,
    pub uri: String,
}

/// 参照規格検索の結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceInfo {
    pub text: String,
    pub sources: Vec<SourceLink>,
}

/// 表示中のパネル
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ViewMode {
    #[default]
    Inspection,
    Dashboard,
    History,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Inspection, ViewMode::Dashboard, ViewMode::History];

    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Inspection => "Live Inspection",
            ViewMode::Dashboard => "Defect Dashboard",
            ViewMode::History => "Inspection History",
        }
    }
}
