//! Gemini API連携（ブラウザ fetch）
//!
//! リクエストの組み立て・レスポンスの解釈は `circuit_guard_common::gateway` が行い、
//! ここでは fetch による送受信と認証情報の取得だけを受け持つ。

use circuit_guard_common::{CredentialSource, Error, GeminiTransport, InspectionGateway, TransportResponse};
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// JS側の例外からメッセージを取り出す
pub fn js_error_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

fn transport_error(value: JsValue) -> Error {
    Error::AnalysisFailed(js_error_message(&value))
}

/// fetch API によるトランスポート
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl GeminiTransport for FetchTransport {
    async fn post_json(&self, url: &str, body: String) -> circuit_guard_common::Result<TransportResponse> {
        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(&body));

        let request = Request::new_with_str_and_init(url, &opts).map_err(transport_error)?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(transport_error)?;

        let window = gloo::utils::window();
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(transport_error)?;
        let resp: Response = resp_value.dyn_into().map_err(transport_error)?;

        let text = JsFuture::from(resp.text().map_err(transport_error)?)
            .await
            .map_err(transport_error)?;

        Ok(TransportResponse {
            status: resp.status(),
            body: text.as_string().unwrap_or_default(),
        })
    }
}

/// ビルド時に埋め込まれたAPIキー（`GEMINI_API_KEY`、なければ `API_KEY`）
pub fn build_time_api_key() -> Option<String> {
    first_non_blank(option_env!("GEMINI_API_KEY"), option_env!("API_KEY"))
}

/// 空白のみの値は未設定として扱い、次の候補に進む
fn first_non_blank(primary: Option<&str>, fallback: Option<&str>) -> Option<String> {
    [primary, fallback]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|k| !k.is_empty())
        .map(str::to_string)
}

/// 設定パネルの入力値を優先し、なければビルド時の値を使う
#[derive(Debug, Clone, Copy)]
pub struct BrowserCredentials {
    entered: RwSignal<String>,
}

impl BrowserCredentials {
    pub fn new(entered: RwSignal<String>) -> Self {
        Self { entered }
    }

    pub fn entered(&self) -> RwSignal<String> {
        self.entered
    }

    /// 認証情報があるか（表示用、リアクティブ）
    pub fn is_configured(&self) -> bool {
        !self.entered.with(|k| k.trim().is_empty()) || build_time_api_key().is_some()
    }
}

impl CredentialSource for BrowserCredentials {
    fn api_key(&self) -> Option<String> {
        let entered = self.entered.get_untracked();
        if !entered.trim().is_empty() {
            return Some(entered);
        }
        build_time_api_key()
    }
}

/// 呼び出し用のゲートウェイ
pub fn gateway(credentials: BrowserCredentials) -> InspectionGateway<FetchTransport, BrowserCredentials> {
    InspectionGateway::new(FetchTransport, credentials)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_key_wins() {
        assert_eq!(first_non_blank(Some("primary"), Some("fallback")), Some("primary".to_string()));
    }

    #[test]
    fn test_blank_primary_falls_back() {
        assert_eq!(first_non_blank(Some("   "), Some(" fallback ")), Some("fallback".to_string()));
        assert_eq!(first_non_blank(Some(""), Some("fallback")), Some("fallback".to_string()));
    }

    #[test]
    fn test_all_blank_is_absent() {
        assert_eq!(first_non_blank(Some(" "), Some("")), None);
        assert_eq!(first_non_blank(None, None), None);
    }
}
