use async_trait::async_trait;
use reqwest::header::REFERER;
use tracing::debug;

use crate::config::PortalConfig;
use crate::error::ScraperError;
use crate::traits::{PortalResponse, Transport};

/// reqwest によるトランスポート（インスタンスごとに独立したCookie Jar）
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &PortalConfig) -> Result<Self, ScraperError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ScraperError::Config(format!("HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    async fn into_response(resp: reqwest::Response) -> Result<PortalResponse, ScraperError> {
        let status = resp.status().as_u16();
        let url = resp.url().to_string();
        let body = resp
            .text()
            .await
            .map_err(|e| ScraperError::Transport(format!("{}: {}", url, e)))?;
        debug!("{} -> {} ({} bytes)", url, status, body.len());

        Ok(PortalResponse { status, url, body })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<PortalResponse, ScraperError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScraperError::Transport(format!("GET {}: {}", url, e)))?;
        Self::into_response(resp).await
    }

    async fn post_form(
        &self,
        url: &str,
        form: &[(&'static str, String)],
        referer: &str,
    ) -> Result<PortalResponse, ScraperError> {
        let resp = self
            .client
            .post(url)
            .header(REFERER, referer)
            .form(form)
            .send()
            .await
            .map_err(|e| ScraperError::Transport(format!("POST {}: {}", url, e)))?;
        Self::into_response(resp).await
    }
}
