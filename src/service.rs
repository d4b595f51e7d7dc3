use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tower::Service;
use tracing::info;

use crate::config::{Credentials, PortalConfig};
use crate::error::ScraperError;
use crate::http::HttpTransport;
use crate::pipeline::{fetch_all, PortalData};

/// tower::Serviceを実装したポータル取得サービス
///
/// 呼び出しごとに新しいHTTPクライアント（新しいCookie Jar）を作るため、
/// 同じサービスを複数ユーザーで共有してもセッションは混ざらない。
#[derive(Debug, Clone, Default)]
pub struct PortalService {
    config: PortalConfig,
}

impl PortalService {
    pub fn new(config: PortalConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }
}

impl Service<Credentials> for PortalService {
    type Response = PortalData;
    type Error = ScraperError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Credentials) -> Self::Future {
        info!("Fetch request received: username={}", req.username);
        let config = self.config.clone();

        Box::pin(async move {
            let transport = HttpTransport::new(&config)?;
            let data = fetch_all(transport, config, &req).await?;

            info!(
                "Fetch completed: username={}, ca_marks available={}",
                req.username,
                data.ca_marks.available().is_some()
            );
            Ok(data)
        })
    }
}
