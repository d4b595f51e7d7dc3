use serde::{Deserialize, Serialize};
use thiserror::Error;

/// データが「まだ存在しない」ことを表す正当な不在状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableKind {
    /// 出欠の集計処理中
    AttendanceInProcess,
    /// 今学期の成績が未公開
    NoSemesterResults,
    /// CA評価点が未登録
    NoCaMarks,
    /// 時間割データなし
    NoTimetable,
}

impl std::fmt::Display for UnavailableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            Self::AttendanceInProcess => "Attendance update is in process",
            Self::NoSemesterResults => "No semester results available",
            Self::NoCaMarks => "No CA marks available",
            Self::NoTimetable => "No timetable data available",
        };
        f.write_str(message)
    }
}

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Malformed login page: {0}")]
    MalformedLoginPage(String),

    #[error("{0}")]
    Unavailable(UnavailableKind),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Scraping failure: {0}")]
    Scraping(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ScraperError {
    /// 同じ入力で再試行する価値があるか
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// 外部のルーティング層向けのHTTPステータス対応表
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InvalidCredentials => 401,
            Self::Unavailable(UnavailableKind::AttendanceInProcess) => 202,
            Self::Unavailable(_) => 404,
            Self::Transport(_) => 502,
            Self::MalformedLoginPage(_)
            | Self::TableNotFound(_)
            | Self::Scraping(_)
            | Self::Config(_) => 500,
        }
    }
}
