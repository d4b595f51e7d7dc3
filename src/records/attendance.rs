//! 出席状況と出席率見込み（bunker formula）

use tracing::{debug, warn};

use super::types::{AttendanceRecord, Projection};
use crate::error::{ScraperError, UnavailableKind};
use crate::html::{HtmlPage, TableRow};
use crate::pages::{
    PortalPage, ATTENDANCE_IN_PROCESS_MARKER, ATTENDANCE_MESSAGE_ID, ATTENDANCE_TABLE,
};
use crate::session::AuthenticatedSession;
use crate::traits::Transport;

const ATTENDANCE_COLUMNS: usize = 10;

/// 出席率見込みを計算する
///
/// 出席率が基準以下（境界を含む）なら、連続出席が必要な授業数。
/// 基準を超えていれば、基準を割らずに欠席できる授業数。
pub fn apply_bunker_formula(
    percentage_of_attendance: u32,
    total_hours: u32,
    total_present: u32,
    threshold: f64,
) -> Projection {
    let hours = f64::from(total_hours);
    let present = f64::from(total_present);

    if f64::from(percentage_of_attendance) <= threshold * 100.0 {
        Projection::ClassesToAttend(((threshold * hours - present) / (1.0 - threshold)).ceil() as i64)
    } else {
        Projection::ClassesToBunk(((present - threshold * hours) / threshold).floor() as i64)
    }
}

/// 出席ページを解析する
pub fn parse_attendance(markup: &str, threshold: f64) -> Result<Vec<AttendanceRecord>, ScraperError> {
    let page = HtmlPage::parse(markup);

    let rows = match page.table(&ATTENDANCE_TABLE) {
        Ok(rows) => rows,
        Err(ScraperError::TableNotFound(_)) => {
            let message = page.text_by_id(ATTENDANCE_MESSAGE_ID)?.unwrap_or_default();
            if message.contains(ATTENDANCE_IN_PROCESS_MARKER) {
                return Err(ScraperError::Unavailable(UnavailableKind::AttendanceInProcess));
            }
            return Err(ScraperError::Scraping("attendance table not found".into()));
        }
        Err(e) => return Err(e),
    };

    let records: Vec<_> = rows
        .iter()
        .skip(1)
        .filter_map(|row| attendance_record(row, threshold))
        .collect();
    debug!("Parsed {} attendance records", records.len());
    Ok(records)
}

fn attendance_record(row: &TableRow, threshold: f64) -> Option<AttendanceRecord> {
    let course_code = row.first()?.clone();
    if row.len() < ATTENDANCE_COLUMNS {
        warn!(
            "Attendance row for {} has {} cells, missing fields default to zero",
            course_code,
            row.len()
        );
    }

    let count = |index: usize| -> u32 {
        match row.get(index).map(|cell| cell.parse::<u32>()) {
            Some(Ok(value)) => value,
            Some(Err(_)) => {
                warn!("Non-numeric attendance cell {:?} for {}", row[index], course_code);
                0
            }
            None => 0,
        }
    };
    let text = |index: usize| row.get(index).cloned().unwrap_or_default();

    let total_hours = count(1);
    let total_present = count(4);
    let percentage_of_attendance = count(5);

    Some(AttendanceRecord {
        total_hours,
        exemption_hours: count(2),
        total_absent: count(3),
        total_present,
        percentage_of_attendance,
        percentage_with_exemption: count(6),
        percentage_with_exemption_medical: count(7),
        validity_from: text(8),
        validity_to: text(9),
        projection: apply_bunker_formula(percentage_of_attendance, total_hours, total_present, threshold),
        course_code,
    })
}

/// 出席ページを取得して解析する
pub async fn fetch_attendance<T: Transport>(
    session: &AuthenticatedSession<T>,
) -> Result<Vec<AttendanceRecord>, ScraperError> {
    let body = session.get(PortalPage::Attendance).await?;
    parse_attendance(&body, session.config().attendance_threshold())
}
