//! ASP.NET WebForms のポストバック用トークン
//!
//! ログインPOSTには、ログインページに埋め込まれた hidden フィールドを
//! そのまま送り返す必要がある。

use tracing::debug;

use crate::config::Credentials;
use crate::error::ScraperError;
use crate::html::HtmlPage;

const VIEW_STATE: &str = "__VIEWSTATE";
const EVENT_VALIDATION: &str = "__EVENTVALIDATION";
const VIEW_STATE_GENERATOR: &str = "__VIEWSTATEGENERATOR";

/// ログインページの hidden トークン
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginTokens {
    pub view_state: String,
    pub event_validation: String,
    pub generator: String,
}

/// ログインページからトークンを取り出す
pub fn extract_tokens(markup: &str) -> Result<LoginTokens, ScraperError> {
    let page = HtmlPage::parse(markup);
    let field = |id: &str| -> Result<String, ScraperError> {
        page.input_value(id)?
            .ok_or_else(|| ScraperError::MalformedLoginPage(format!("missing {id}")))
    };

    let tokens = LoginTokens {
        view_state: field(VIEW_STATE)?,
        event_validation: field(EVENT_VALIDATION)?,
        generator: field(VIEW_STATE_GENERATOR)?,
    };
    debug!(
        "Extracted login tokens (viewstate {} bytes, generator {})",
        tokens.view_state.len(),
        tokens.generator
    );
    Ok(tokens)
}

/// ログインPOSTのフォーム本体
pub fn login_form(tokens: &LoginTokens, credentials: &Credentials) -> Vec<(&'static str, String)> {
    vec![
        ("__EVENTTARGET", String::new()),
        ("__EVENTARGUMENT", String::new()),
        ("__LASTFOCUS", String::new()),
        (VIEW_STATE, tokens.view_state.clone()),
        (VIEW_STATE_GENERATOR, tokens.generator.clone()),
        (EVENT_VALIDATION, tokens.event_validation.clone()),
        // 学生ロール
        ("rdolst", "S".to_string()),
        ("txtusercheck", credentials.username.clone()),
        ("txtpwdcheck", credentials.password.clone()),
        ("abcd3", "Login".to_string()),
    ]
}
