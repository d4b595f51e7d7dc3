use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ScraperError;
use crate::pages::PortalPage;

/// ライブポータルのログインページ
pub const DEFAULT_BASE_URL: &str = "https://ecampus.psgtech.ac.in/studzone2/";
/// 出席率の下限（75%）
pub const DEFAULT_ATTENDANCE_THRESHOLD: f64 = 0.75;

const DEFAULT_USER_AGENT: &str = concat!("studzone-scraper/", env!("CARGO_PKG_VERSION"));

/// ログイン資格情報（セッション終了後は保持しない）
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// パスワードはログに出さない
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// CA評価点の `*` セルの扱い
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentinelPolicy {
    /// `*` と欠損セルを `None` にする
    #[default]
    Absent,
    /// 旧来の挙動: `*` と欠損セルを `"0"` にする
    Zero,
}

impl std::str::FromStr for SentinelPolicy {
    type Err = ScraperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "absent" | "none" => Ok(Self::Absent),
            "zero" | "0" => Ok(Self::Zero),
            other => Err(ScraperError::Config(format!(
                "unknown CA sentinel policy: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
    attendance_threshold: f64,
    pub sentinel_policy: SentinelPolicy,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            attendance_threshold: DEFAULT_ATTENDANCE_THRESHOLD,
            sentinel_policy: SentinelPolicy::default(),
        }
    }
}

impl PortalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// 環境変数から設定を読み込む（未設定の項目はデフォルト値）
    ///
    /// - `STUDZONE_BASE_URL`
    /// - `STUDZONE_TIMEOUT_SECS`
    /// - `STUDZONE_CA_SENTINEL` (`absent` | `zero`)
    /// - `STUDZONE_ATTENDANCE_THRESHOLD` (0と1の間、例: `0.75`)
    pub fn from_env() -> Result<Self, ScraperError> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("STUDZONE_BASE_URL") {
            config = config.with_base_url(url);
        }
        if let Ok(secs) = std::env::var("STUDZONE_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|e| {
                ScraperError::Config(format!("STUDZONE_TIMEOUT_SECS={secs}: {e}"))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Ok(policy) = std::env::var("STUDZONE_CA_SENTINEL") {
            config = config.with_sentinel_policy(policy.parse()?);
        }
        if let Ok(threshold) = std::env::var("STUDZONE_ATTENDANCE_THRESHOLD") {
            let threshold: f64 = threshold.trim().parse().map_err(|e| {
                ScraperError::Config(format!("STUDZONE_ATTENDANCE_THRESHOLD={threshold}: {e}"))
            })?;
            config = config.with_attendance_threshold(threshold)?;
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let mut url = url.into();
        if !url.ends_with('/') {
            url.push('/');
        }
        self.base_url = url;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// 出席率の下限を設定する（0 < threshold < 1）
    pub fn with_attendance_threshold(mut self, threshold: f64) -> Result<Self, ScraperError> {
        if !(threshold > 0.0 && threshold < 1.0) {
            return Err(ScraperError::Config(format!(
                "attendance threshold must be between 0 and 1 (exclusive): {threshold}"
            )));
        }
        self.attendance_threshold = threshold;
        Ok(self)
    }

    pub fn with_sentinel_policy(mut self, policy: SentinelPolicy) -> Self {
        self.sentinel_policy = policy;
        self
    }

    pub fn attendance_threshold(&self) -> f64 {
        self.attendance_threshold
    }

    /// ログインページのURL
    pub fn login_url(&self) -> &str {
        &self.base_url
    }

    /// データページの絶対URL
    pub fn page_url(&self, page: PortalPage) -> String {
        format!("{}{}", self.base_url, page.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = PortalConfig::new()
            .with_base_url("http://localhost:8080/studzone2")
            .with_timeout(Duration::from_secs(5))
            .with_sentinel_policy(SentinelPolicy::Zero);

        assert_eq!(config.base_url, "http://localhost:8080/studzone2/");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.sentinel_policy, SentinelPolicy::Zero);
        assert_eq!(config.attendance_threshold(), DEFAULT_ATTENDANCE_THRESHOLD);
    }

    #[test]
    fn test_attendance_threshold_range() {
        let config = PortalConfig::new().with_attendance_threshold(0.8).unwrap();
        assert_eq!(config.attendance_threshold(), 0.8);

        for threshold in [0.0, 1.0, -0.5, 75.0, f64::NAN] {
            assert!(
                matches!(
                    PortalConfig::new().with_attendance_threshold(threshold),
                    Err(ScraperError::Config(_))
                ),
                "threshold {threshold} accepted"
            );
        }
    }

    #[test]
    fn test_page_url() {
        let config = PortalConfig::default();
        assert_eq!(
            config.page_url(PortalPage::Attendance),
            "https://ecampus.psgtech.ac.in/studzone2/AttWfPercView.aspx"
        );
        assert_eq!(config.login_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_sentinel_policy_from_str() {
        assert_eq!("absent".parse::<SentinelPolicy>().unwrap(), SentinelPolicy::Absent);
        assert_eq!(" ZERO ".parse::<SentinelPolicy>().unwrap(), SentinelPolicy::Zero);
        assert!(matches!(
            "sometimes".parse::<SentinelPolicy>(),
            Err(ScraperError::Config(_))
        ));
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials::new("21z201", "hunter2");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("21z201"));
        assert!(!debug.contains("hunter2"));
    }
}
