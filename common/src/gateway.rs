//! AIゲートウェイ
//!
//! 不良検査サービスとの唯一の境界。HTTPの実体は `GeminiTransport` として注入し、
//! 認証情報は呼び出しのたびに `CredentialSource` から読み直す。

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::gemini::{error_message, GeminiRequest, GeminiResponse};
use crate::image::EncodedImage;
use crate::parser::parse_inspection_reply;
use crate::prompts::{build_reference_prompt, inspection_response_schema, ANALYSIS_PROMPT};
use crate::types::{InspectionResult, ReferenceInfo};

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// HTTPレスポンス（ステータスと本文）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// JSONをPOSTするHTTP層
///
/// 通信自体の失敗は `Error::AnalysisFailed` で返す。非2xxは `Ok` で返し、解釈はゲートウェイが行う。
#[allow(async_fn_in_trait)]
pub trait GeminiTransport {
    async fn post_json(&self, url: &str, body: String) -> Result<TransportResponse>;
}

impl<T: GeminiTransport + ?Sized> GeminiTransport for &T {
    async fn post_json(&self, url: &str, body: String) -> Result<TransportResponse> {
        (**self).post_json(url, body).await
    }
}

/// 認証情報の取得元
pub trait CredentialSource {
    fn api_key(&self) -> Option<String>;
}

impl<F> CredentialSource for F
where
    F: Fn() -> Option<String>,
{
    fn api_key(&self) -> Option<String> {
        self()
    }
}

/// 固定の認証情報
#[derive(Debug, Clone)]
pub struct StaticCredential(pub String);

impl CredentialSource for StaticCredential {
    fn api_key(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// 接続先設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub endpoint: String,
    pub model: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl GatewayConfig {
    fn generate_url(&self, api_key: &str) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.endpoint.trim_end_matches('/'),
            self.model,
            api_key
        )
    }
}

/// 1回の呼び出し用クライアント
struct GeminiClient<'a, T> {
    transport: &'a T,
    url: String,
}

impl<T: GeminiTransport> GeminiClient<'_, T> {
    async fn generate(&self, request: &GeminiRequest) -> Result<GeminiResponse> {
        let body = serde_json::to_string(request)?;
        let response = self.transport.post_json(&self.url, body).await?;

        if !response.is_success() {
            return Err(Error::AnalysisFailed(format!(
                "API error {}: {}",
                response.status,
                error_message(&response.body)
            )));
        }

        serde_json::from_str(&response.body)
            .map_err(|e| Error::AnalysisFailed(format!("Malformed API response: {}", e)))
    }
}

/// 検査ゲートウェイ
pub struct InspectionGateway<T, C> {
    transport: T,
    credentials: C,
    config: GatewayConfig,
}

impl<T, C> InspectionGateway<T, C>
where
    T: GeminiTransport,
    C: CredentialSource,
{
    pub fn new(transport: T, credentials: C) -> Self {
        Self {
            transport,
            credentials,
            config: GatewayConfig::default(),
        }
    }

    pub fn with_config(mut self, config: GatewayConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// 呼び出しごとに認証情報を読み直してクライアントを作る
    fn client(&self) -> Result<GeminiClient<'_, T>> {
        let api_key = self
            .credentials
            .api_key()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(Error::Configuration)?;

        Ok(GeminiClient {
            transport: &self.transport,
            url: self.config.generate_url(&api_key),
        })
    }

    /// 基板画像を解析する
    ///
    /// # Arguments
    /// * `image` - Data URL形式の画像
    pub async fn analyze(&self, image: &str) -> Result<InspectionResult> {
        self.analyze_with_clock(image, Utc::now).await
    }

    /// タイムスタンプを指定して解析する
    pub async fn analyze_at(&self, image: &str, timestamp: DateTime<Utc>) -> Result<InspectionResult> {
        self.analyze_with_clock(image, move || timestamp).await
    }

    /// `clock` はレスポンスの解釈に成功した時点で一度だけ呼ぶ
    async fn analyze_with_clock<F>(&self, image: &str, clock: F) -> Result<InspectionResult>
    where
        F: FnOnce() -> DateTime<Utc>,
    {
        let result = self.run_analysis(image, clock).await.map(|r| {
            log::info!(
                "inspection parsed: status={} defects={}",
                r.status,
                r.defects.len()
            );
            r
        });
        result.map_err(|e| {
            let e = e.classify();
            log::warn!("inspection failed: {}", e);
            e
        })
    }

    async fn run_analysis<F>(&self, image: &str, clock: F) -> Result<InspectionResult>
    where
        F: FnOnce() -> DateTime<Utc>,
    {
        let client = self.client()?;
        let encoded = EncodedImage::parse(image)?;

        log::debug!(
            "analyze request: model={} mime={} bytes={}",
            self.config.model,
            encoded.mime_type,
            encoded.decoded_len()
        );

        let request = GeminiRequest::structured(
            encoded.mime_type,
            encoded.payload,
            ANALYSIS_PROMPT,
            inspection_response_schema(),
        );
        let response = client.generate(&request).await?;
        let text = response.text().ok_or(Error::EmptyResponse)?;
        let reply = parse_inspection_reply(&text)?;

        Ok(InspectionResult::from_reply(reply, clock(), Some(image.to_string())))
    }

    /// 不良に関する参照規格を検索する
    ///
    /// 出典がなくてもエラーにはしない。
    pub async fn lookup_reference(&self, query: &str) -> Result<ReferenceInfo> {
        let result: Result<ReferenceInfo> = async {
            let client = self.client()?;
            log::debug!("reference lookup: model={} query={:?}", self.config.model, query);

            let request = GeminiRequest::grounded(&build_reference_prompt(query));
            let response = client.generate(&request).await?;

            Ok(ReferenceInfo {
                text: response.text().unwrap_or_default(),
                sources: response.sources(),
            })
        }
        .await;

        result.map_err(Error::classify)
    }
}
