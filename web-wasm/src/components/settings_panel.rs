//! 設定パネルコンポーネント

use leptos::prelude::*;

use crate::api::{gemini::build_time_api_key, BrowserCredentials};

#[component]
pub fn SettingsPanel() -> impl IntoView {
    let credentials = expect_context::<BrowserCredentials>();
    let api_key = credentials.entered();
    let fallback_note = build_time_api_key()
        .is_some()
        .then(|| view! { <p class="settings-note">"Build-time key available as fallback."</p> });

    view! {
        <div class="settings-panel">
            <div class="form-group">
                <label for="api-key">"Gemini API Key"</label>
                <input
                    type="password"
                    id="api-key"
                    placeholder="Enter API key..."
                    autocomplete="off"
                    prop:value=move || api_key.get()
                    on:input=move |ev| {
                        api_key.set(event_target_value(&ev));
                    }
                />
                <a
                    href="https://aistudio.google.com/app/apikey"
                    target="_blank"
                    rel="noopener noreferrer"
                    class="api-key-link"
                >
                    "Get an API key →"
                </a>
                {fallback_note}
            </div>
        </div>
    }
}
