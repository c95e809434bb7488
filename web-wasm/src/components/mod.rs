//! UIコンポーネント

pub mod camera_modal;
pub mod dashboard;
pub mod error_banner;
pub mod history_panel;
pub mod inspection_panel;
pub mod reference_panel;
pub mod result_view;
pub mod settings_panel;
pub mod sidebar;
