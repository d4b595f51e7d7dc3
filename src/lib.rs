//! 学務ポータル（ASP.NET WebForms）スクレイパーライブラリ
//!
//! - WebForms のログイン（ViewState 等の hidden トークンを送り返す）
//! - 出席・CA評価点・成績・時間割・プロフィールの表を型付きレコードに変換
//! - 出席率見込み（bunker formula）と単位加重GPAの計算
//!
//! # 使用例
//!
//! ```rust,ignore
//! use studzone_scraper::{Credentials, PortalConfig, PortalService};
//! use tower::Service;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut service = PortalService::new(PortalConfig::default());
//!
//!     let data = service
//!         .call(Credentials::new("21z201", "password"))
//!         .await
//!         .unwrap();
//!     println!("Attendance: {:?}", data.attendance);
//! }
//! ```
//!
//! # 任意のトランスポートで使う
//!
//! ```rust,ignore
//! use studzone_scraper::{fetch_all, Credentials, HttpTransport, PortalConfig};
//!
//! let config = PortalConfig::from_env()?;
//! let transport = HttpTransport::new(&config)?;
//! let data = fetch_all(transport, config, &Credentials::new("21z201", "password")).await?;
//! ```

pub mod config;
pub mod error;
pub mod forms;
pub mod html;
pub mod http;
pub mod pages;
pub mod pipeline;
pub mod records;
pub mod service;
pub mod session;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

// 主要な型をリエクスポート
pub use config::{Credentials, PortalConfig, SentinelPolicy};
pub use error::{ScraperError, UnavailableKind};
pub use http::HttpTransport;
pub use pipeline::{fetch_all, PortalData};
pub use service::PortalService;
pub use session::{AuthenticatedSession, PortalSession};
pub use traits::{PortalResponse, Transport};

// レコード型もリエクスポート
pub use records::{
    AttendanceRecord, Availability, CaMarks, CaMarksRecord, CourseEntry, Projection, ResultSheet,
    SemesterSummary, StudentProfile, TestSlot, WeeklySlot,
};
