//! 認証済みセッション
//!
//! `PortalSession`（未認証）は `login` で消費され、成功時のみ
//! `AuthenticatedSession` が得られる。データページの取得は後者にしか存在しないため、
//! ログイン前の取得はコンパイル時に弾かれる。

use tracing::{debug, info, warn};

use crate::config::{Credentials, PortalConfig};
use crate::error::ScraperError;
use crate::forms;
use crate::html::HtmlPage;
use crate::pages::PortalPage;
use crate::traits::Transport;

/// ログイン失敗時にポータルが表示する文言
const INVALID_LOGIN_MARKER: &str = "Invalid";

/// 未認証セッション
pub struct PortalSession<T: Transport> {
    transport: T,
    config: PortalConfig,
}

impl<T: Transport> PortalSession<T> {
    pub fn new(transport: T, config: PortalConfig) -> Self {
        Self { transport, config }
    }

    /// ログイン実行
    ///
    /// ログインページGET → トークン抽出 → 資格情報とトークンをPOST → 失敗文言の確認
    pub async fn login(self, credentials: &Credentials) -> Result<AuthenticatedSession<T>, ScraperError> {
        info!("Logging in as {}", credentials.username);

        let login_page = self.transport.get(self.config.login_url()).await?;
        if !login_page.is_success() {
            return Err(ScraperError::Transport(format!(
                "login page returned status {}",
                login_page.status
            )));
        }

        let tokens = forms::extract_tokens(&login_page.body)?;
        let form = forms::login_form(&tokens, credentials);

        let response = self
            .transport
            .post_form(&login_page.url, &form, &login_page.url)
            .await?;
        if !response.is_success() {
            return Err(ScraperError::Transport(format!(
                "login POST returned status {}",
                response.status
            )));
        }

        // トランスポートが成功した後にのみ判定する
        if login_rejected(&response.body) {
            warn!("Login rejected for {}", credentials.username);
            return Err(ScraperError::InvalidCredentials);
        }

        info!("Login successful");
        Ok(AuthenticatedSession {
            transport: self.transport,
            config: self.config,
        })
    }
}

fn login_rejected(body: &str) -> bool {
    HtmlPage::parse(body).contains_text(INVALID_LOGIN_MARKER)
}

/// 認証済みセッション（1回の取得処理で使い捨て）
pub struct AuthenticatedSession<T: Transport> {
    transport: T,
    config: PortalConfig,
}

impl<T: Transport> AuthenticatedSession<T> {
    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    /// データページを取得して本文を返す
    pub async fn get(&self, page: PortalPage) -> Result<String, ScraperError> {
        let url = self.config.page_url(page);
        debug!("Fetching {}", url);

        let response = self.transport.get(&url).await?;
        if !response.is_success() {
            return Err(ScraperError::Scraping(format!(
                "Failed to fetch {}. Status code: {}",
                page, response.status
            )));
        }
        Ok(response.body)
    }
}
