//! 一括取得
//!
//! 1回ログインしたセッションで全ページを並行取得する。
//! プロフィール・出席・今学期成績・GPAは必須で、失敗すれば全体を中断する。
//! CA評価点と時間割は任意で、失敗は該当スロットに閉じ込める。

use serde::Serialize;
use tracing::{info, warn};

use crate::config::{Credentials, PortalConfig};
use crate::error::ScraperError;
use crate::records::{
    attendance, ca_marks, grades, profile, timetable, AttendanceRecord, Availability, CaMarks,
    CourseEntry, ResultSheet, SemesterSummary, StudentProfile, TestSlot, WeeklySlot,
};
use crate::session::{AuthenticatedSession, PortalSession};
use crate::traits::Transport;

/// 一括取得の結果
#[derive(Debug, Clone, Serialize)]
pub struct PortalData {
    pub student_profile: StudentProfile,
    pub attendance: Vec<AttendanceRecord>,
    pub current_semester_results: ResultSheet,
    pub previous_semester_results: SemesterSummary,
    pub ca_marks: Availability<CaMarks>,
    pub course_timetable: Availability<Vec<CourseEntry>>,
    pub weekly_timetable: Availability<Vec<WeeklySlot>>,
    pub test_timetable: Availability<Vec<TestSlot>>,
}

/// ログインして全ドメインを取得する
///
/// `transport` はこの呼び出し専用（Cookie Jarを他ユーザーと共有しない）。
pub async fn fetch_all<T: Transport>(
    transport: T,
    config: PortalConfig,
    credentials: &Credentials,
) -> Result<PortalData, ScraperError> {
    let session = PortalSession::new(transport, config)
        .login(credentials)
        .await?;
    let data = collect(&session).await?;

    info!(
        "Fetched portal data: {} attendance records, {} result rows",
        data.attendance.len(),
        data.current_semester_results.rows.len()
    );
    Ok(data)
}

/// 認証済みセッションから全ページを並行取得する
pub async fn collect<T: Transport>(
    session: &AuthenticatedSession<T>,
) -> Result<PortalData, ScraperError> {
    let (profile, attendance, results, summary, ca_marks, timetable, test_timetable) = futures::join!(
        profile::fetch_profile(session),
        attendance::fetch_attendance(session),
        grades::fetch_semester_results(session),
        grades::fetch_semester_summary(session),
        ca_marks::fetch_ca_marks(session),
        timetable::fetch_timetable(session),
        timetable::fetch_test_timetable(session),
    );

    let (course_timetable, weekly_timetable) = match timetable {
        Ok(page) => (
            Availability::capture("Course timetable", page.courses),
            Availability::Available(page.weekly),
        ),
        Err(e) => {
            warn!("Timetable page failed: {}", e);
            let cause = e.to_string();
            (Availability::capture("Course timetable", Err(e)), Availability::Failed(cause))
        }
    };

    Ok(PortalData {
        student_profile: profile?,
        attendance: attendance?,
        current_semester_results: results?,
        previous_semester_results: summary?,
        ca_marks: Availability::capture("CA marks", ca_marks),
        course_timetable,
        weekly_timetable,
        test_timetable: Availability::capture("Test timetable", test_timetable),
    })
}
