//! 時間割（履修登録表・週間時間割・試験時間割）

use tracing::{debug, warn};

use super::types::{CourseEntry, TestSlot, WeeklySlot};
use crate::error::{ScraperError, UnavailableKind};
use crate::html::{HtmlPage, TableRow};
use crate::pages::{
    PortalPage, COURSE_TIMETABLE_TABLE, TEST_TIMETABLE_TABLE, WEEKLY_TIMETABLE_TABLE,
};
use crate::session::AuthenticatedSession;
use crate::traits::Transport;

/// 時間割ページの内容
#[derive(Debug)]
pub struct TimetablePage {
    pub courses: Result<Vec<CourseEntry>, ScraperError>,
    pub weekly: Vec<WeeklySlot>,
}

fn cell(row: &TableRow, index: usize) -> String {
    row.get(index).cloned().unwrap_or_default()
}

/// 履修登録表（`TbCourDesc`）
pub fn parse_course_timetable(page: &HtmlPage) -> Result<Vec<CourseEntry>, ScraperError> {
    let rows = page.table(&COURSE_TIMETABLE_TABLE).map_err(|e| match e {
        ScraperError::TableNotFound(_) => ScraperError::Unavailable(UnavailableKind::NoTimetable),
        other => other,
    })?;

    Ok(rows
        .iter()
        .skip(1)
        .filter(|row| !row.is_empty())
        .map(|row| CourseEntry {
            course_code: cell(row, 0),
            course_title: cell(row, 1),
            programme: cell(row, 2),
            semester_number: cell(row, 3),
        })
        .collect())
}

/// コマのテキストを (プログラム, 科目コード) の組に分解する
///
/// 行を2つずつ読む。端数の1行は捨てる。
pub fn decode_slot(day: &str, time_slot: &str, text: &str) -> Vec<WeeklySlot> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    lines
        .chunks_exact(2)
        .map(|pair| WeeklySlot {
            day: day.to_string(),
            time_slot: time_slot.to_string(),
            programme: pair[0].to_string(),
            course_code: pair[1].to_string(),
        })
        .collect()
}

/// 週間時間割（`DtStfTimtab`）。行0はタイトル、行1はコマの時刻、行2以降が曜日。
pub fn parse_weekly_timetable(page: &HtmlPage) -> Result<Vec<WeeklySlot>, ScraperError> {
    let rows = match page.dense_table(&WEEKLY_TIMETABLE_TABLE) {
        Ok(rows) => rows,
        Err(ScraperError::TableNotFound(_)) => {
            warn!("Timetable not found on the page");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    };
    if rows.len() < 3 {
        warn!("Timetable structure is invalid ({} rows)", rows.len());
        return Ok(Vec::new());
    }

    let time_slots = rows[1].get(1..).unwrap_or_default();
    let mut slots = Vec::new();
    for row in &rows[2..] {
        let Some((day, cells)) = row.split_first() else {
            continue;
        };
        if cells.is_empty() {
            continue;
        }
        for (time_slot, text) in time_slots.iter().zip(cells) {
            slots.extend(decode_slot(day, time_slot, text));
        }
    }

    debug!("Parsed {} weekly timetable slots", slots.len());
    Ok(slots)
}

pub fn parse_timetable_page(markup: &str) -> Result<TimetablePage, ScraperError> {
    let page = HtmlPage::parse(markup);
    Ok(TimetablePage {
        courses: parse_course_timetable(&page),
        weekly: parse_weekly_timetable(&page)?,
    })
}

/// 試験時間割（`DGTT`）。表が無ければ空。
pub fn parse_test_timetable(markup: &str) -> Result<Vec<TestSlot>, ScraperError> {
    let rows = match HtmlPage::parse(markup).dense_table(&TEST_TIMETABLE_TABLE) {
        Ok(rows) => rows,
        Err(ScraperError::TableNotFound(_)) => {
            warn!("Test timetable not found on the page");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    };

    Ok(rows
        .iter()
        .skip(1)
        .filter(|row| row.len() >= 6)
        .map(|row| TestSlot {
            date: cell(row, 0),
            day: cell(row, 1),
            session: cell(row, 2),
            course_code: cell(row, 3),
            course_name: cell(row, 4),
            room: cell(row, 5),
        })
        .collect())
}

/// 時間割ページを1回取得し、2種類の表を解析する
pub async fn fetch_timetable<T: Transport>(
    session: &AuthenticatedSession<T>,
) -> Result<TimetablePage, ScraperError> {
    let body = session.get(PortalPage::Timetable).await?;
    parse_timetable_page(&body)
}

pub async fn fetch_test_timetable<T: Transport>(
    session: &AuthenticatedSession<T>,
) -> Result<Vec<TestSlot>, ScraperError> {
    let body = session.get(PortalPage::TestTimetable).await?;
    parse_test_timetable(&body)
}
