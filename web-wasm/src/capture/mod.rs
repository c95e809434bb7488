//! 画像の取得（ファイル・カメラ・デモ画像）
//!
//! どの経路でも最終的に Data URL 文字列へ揃えてからゲートウェイに渡す。

pub mod camera;
pub mod demo;
pub mod encode;

pub use camera::CameraSession;
pub use demo::{DemoImage, DEMO_IMAGES};
pub use encode::{load_remote_image, read_file};
