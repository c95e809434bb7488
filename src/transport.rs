//! reqwest によるトランスポート

use crate::error::{CircuitGuardError, Result};
use circuit_guard_common::{Error, GeminiTransport, TransportResponse};
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CircuitGuardError::Config(format!("HTTPクライアントの初期化に失敗: {}", e)))?;
        Ok(Self { client })
    }
}

impl GeminiTransport for ReqwestTransport {
    async fn post_json(&self, url: &str, body: String) -> circuit_guard_common::Result<TransportResponse> {
        debug!(bytes = body.len(), "sending generateContent request");

        // URLにはAPIキーが含まれるのでエラーメッセージから外す
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                warn!(error = %e, "request failed");
                Error::AnalysisFailed(format!("Request failed: {}", e))
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Error::AnalysisFailed(format!("Failed to read response: {}", e.without_url())))?;

        debug!(status, bytes = body.len(), "response received");
        if !(200..300).contains(&status) {
            warn!(status, "non-success response from AI service");
        }

        Ok(TransportResponse { status, body })
    }
}
