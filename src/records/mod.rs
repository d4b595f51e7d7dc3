//! 学務レコードの抽出
//!
//! ページごとに「取得 → 表の特定 → 行の解析」を行い、型付きレコードを返す。
//! ポータルは処理中の科目で欠けた行を出すため、行単位の欠損はデフォルト値で埋める。

pub mod attendance;
pub mod ca_marks;
pub mod grades;
pub mod profile;
pub mod timetable;
mod types;

pub use attendance::apply_bunker_formula;
pub use grades::{compute_cgpa, grade_point};
pub use types::{
    AttendanceRecord, Availability, CaMarks, CaMarksRecord, ContactInfo, CourseEntry, FamilyInfo,
    PersonalInfo, Projection, ResultSheet, SemesterSummary, StudentProfile, TestSlot, WeeklySlot,
};
