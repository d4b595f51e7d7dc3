//! 学務レコードの型定義

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ScraperError, UnavailableKind};
use crate::html::TableRow;

/// 出席率の見込み（どちらか一方のみ）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Projection {
    /// 基準に戻すために連続で出席が必要な授業数
    ClassesToAttend(i64),
    /// 基準を割らずに欠席できる授業数
    ClassesToBunk(i64),
}

/// 科目ごとの出席状況
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub course_code: String,
    pub total_hours: u32,
    pub exemption_hours: u32,
    pub total_absent: u32,
    pub total_present: u32,
    pub percentage_of_attendance: u32,
    pub percentage_with_exemption: u32,
    pub percentage_with_exemption_medical: u32,
    pub validity_from: String,
    pub validity_to: String,
    pub projection: Projection,
}

/// CA評価点（`None` は未登録）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaMarksRecord {
    pub course_code: String,
    pub course_title: String,
    pub ca1: Option<String>,
    pub ca2: Option<String>,
    pub ca3: Option<String>,
    pub best_of_ca: Option<String>,
    pub at1: Option<String>,
    pub at2: Option<String>,
    pub ap: Option<String>,
    pub total: Option<String>,
}

/// CA評価点ページの2つの表
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CaMarks {
    #[serde(rename = "CA Marks 1")]
    pub first: Vec<CaMarksRecord>,
    #[serde(rename = "CA Marks 2")]
    pub second: Vec<CaMarksRecord>,
}

/// 今学期の成績表（列見出し＋データ行）
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResultSheet {
    pub columns: TableRow,
    pub rows: Vec<TableRow>,
}

/// 単位加重のGPA。単位合計が0の場合は両方 `None`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterSummary {
    pub latest_semester_number: Option<String>,
    pub latest_semester_cgpa: Option<f64>,
}

impl SemesterSummary {
    pub fn not_available() -> Self {
        Self {
            latest_semester_number: None,
            latest_semester_cgpa: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.latest_semester_cgpa.is_some()
    }
}

/// 履修登録表の1行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseEntry {
    pub course_code: String,
    pub course_title: String,
    pub programme: String,
    pub semester_number: String,
}

/// 週間時間割の1コマ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySlot {
    pub day: String,
    pub time_slot: String,
    pub programme: String,
    pub course_code: String,
}

/// 試験時間割の1行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSlot {
    pub date: String,
    pub day: String,
    pub session: String,
    pub course_code: String,
    pub course_name: String,
    pub room: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub roll_number: String,
    pub batch: String,
    pub programme: String,
    pub resident_status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FamilyInfo {
    pub father_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactInfo {
    pub student_mobile: String,
    pub student_email: String,
    pub parent_mobile: String,
    pub parent_email: String,
}

/// 学生プロフィール（未取得の項目は空文字列）
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StudentProfile {
    pub personal: PersonalInfo,
    pub family: FamilyInfo,
    pub contact: ContactInfo,
    pub address: String,
}

/// 任意ドメインの取得結果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Availability<T> {
    Available(T),
    /// データが正当に存在しない
    Unavailable(UnavailableKind),
    /// 取得・解析に失敗（原因の文字列付き）
    Failed(String),
}

impl<T> Availability<T> {
    /// 任意ドメインの失敗をこのスロット内に閉じ込める
    pub fn capture(domain: &str, result: Result<T, ScraperError>) -> Self {
        match result {
            Ok(value) => Self::Available(value),
            Err(ScraperError::Unavailable(kind)) => {
                warn!("{} unavailable: {}", domain, kind);
                Self::Unavailable(kind)
            }
            Err(e) => {
                warn!("{} failed: {}", domain, e);
                Self::Failed(e.to_string())
            }
        }
    }

    pub fn available(&self) -> Option<&T> {
        match self {
            Self::Available(value) => Some(value),
            _ => None,
        }
    }
}
