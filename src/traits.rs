use async_trait::async_trait;

use crate::error::ScraperError;

/// ポータルからのHTTPレスポンス
#[derive(Debug, Clone)]
pub struct PortalResponse {
    pub status: u16,
    /// リダイレクト後の最終URL
    pub url: String,
    pub body: String,
}

impl PortalResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTPトランスポート
///
/// 実装は1セッション分のCookie Jarを保持する。ユーザー間で共有しないこと。
#[async_trait]
pub trait Transport: Send + Sync {
    /// GETリクエスト
    async fn get(&self, url: &str) -> Result<PortalResponse, ScraperError>;

    /// フォームPOST（`Referer` 付き）
    async fn post_form(
        &self,
        url: &str,
        form: &[(&'static str, String)],
        referer: &str,
    ) -> Result<PortalResponse, ScraperError>;
}
