//! エラーバナー

use circuit_guard_common::Error;
use leptos::prelude::*;

/// 具体的なメッセージが取れないときの表示
pub const FALLBACK_MESSAGE: &str = "Analysis failed. The image might be too large or invalid.";

pub fn banner_message(error: &Error) -> String {
    let message = error.to_string();
    if message.trim().is_empty() {
        FALLBACK_MESSAGE.to_string()
    } else {
        message
    }
}

#[component]
pub fn ErrorBanner(error: RwSignal<Option<Error>>) -> impl IntoView {
    move || {
        error.get().map(|err| {
            view! {
                <div class="error-banner" role="alert">
                    <span class="error-icon">"!"</span>
                    <div>
                        <h4>"Inspection Error"</h4>
                        <p>{banner_message(&err)}</p>
                    </div>
                </div>
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_uses_error_message() {
        assert_eq!(
            banner_message(&Error::DeviceAccessDenied),
            "Camera access denied. Please check permissions."
        );
        assert_eq!(
            banner_message(&Error::Configuration),
            "System Configuration Error: The AI core is not currently active."
        );
    }

    #[test]
    fn test_banner_falls_back_on_blank_message() {
        assert_eq!(banner_message(&Error::AnalysisFailed(String::new())), FALLBACK_MESSAGE);
        assert_eq!(banner_message(&Error::AnalysisFailed("  ".into())), FALLBACK_MESSAGE);
    }
}
