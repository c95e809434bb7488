//! CircuitGuard Common Library
//!
//! ブラウザ(WASM)とネイティブで共有される検査ドメインの型とロジック

pub mod types;
pub mod error;
pub mod image;
pub mod prompts;
pub mod gemini;
pub mod parser;
pub mod gateway;
pub mod stats;
pub mod chart;
pub mod session;

pub use types::{
    Defect, DefectType, InspectionReply, InspectionResult, InspectionStatus, Location,
    ReferenceInfo, Severity, SourceLink, ViewMode,
};
pub use error::{Error, Result};
pub use image::{EncodedImage, CAPTURE_JPEG_QUALITY, CAPTURE_MIME_TYPE};
pub use parser::{extract_json, parse_inspection_reply};
pub use prompts::REFERENCE_STANDARD;
pub use gateway::{
    CredentialSource, GatewayConfig, GeminiTransport, InspectionGateway, StaticCredential,
    TransportResponse,
};
pub use stats::Statistics;
pub use session::{SessionAction, SessionState};
