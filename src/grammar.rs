use anyhow::{Context, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct CheckRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: String,
}

/// `{"text": ...}` 形式のリクエストボディを作る
pub fn build_request_body(text: &str) -> serde_json::Result<String> {
    serde_json::to_string(&CheckRequest { text })
}

pub struct GrammarClient {
    endpoint: Url,
    client: Client,
}

impl GrammarClient {
    pub fn new(endpoint_url: &str, timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(endpoint_url)
            .with_context(|| format!("Invalid endpoint URL: {}", endpoint_url))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// チェック要求を送信する
    ///
    /// 通信が完了すればステータスに関わらず `Ok` を返す。レスポンス本文は読まない。
    pub async fn send_check(&self, body: String) -> reqwest::Result<StatusCode> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        Ok(response.status())
    }

    /// チェック用 URL と同じ階層の `/health` を確認する
    pub async fn health(&self) -> Result<(StatusCode, HealthResponse)> {
        let url = self
            .endpoint
            .join("health")
            .context("Failed to derive health URL")?;

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", url))?;

        let status = response.status();
        let health = response
            .json::<HealthResponse>()
            .await
            .unwrap_or_default();

        Ok((status, health))
    }
}
