//! CA評価点

use tracing::{debug, warn};

use super::types::{CaMarks, CaMarksRecord};
use crate::config::SentinelPolicy;
use crate::error::{ScraperError, UnavailableKind};
use crate::html::{HtmlPage, Locator, TableRow};
use crate::pages::{PortalPage, CA_MARKS_TABLES};
use crate::session::AuthenticatedSession;
use crate::traits::Transport;

/// 未登録を表すセル
const SENTINEL: &str = "*";
/// 見出し2行
const HEADER_ROWS: usize = 2;

fn mark(row: &TableRow, index: usize, policy: SentinelPolicy) -> Option<String> {
    match (row.get(index).map(String::as_str), policy) {
        (Some(SENTINEL) | None, SentinelPolicy::Absent) => None,
        (Some(SENTINEL) | None, SentinelPolicy::Zero) => Some("0".to_string()),
        (Some(value), _) => Some(value.to_string()),
    }
}

fn ca_marks_record(row: &TableRow, policy: SentinelPolicy) -> Option<CaMarksRecord> {
    let course_code = row.first()?.clone();
    if row.len() < 10 {
        warn!("Insufficient CA marks data for {} ({} cells)", course_code, row.len());
    }

    Some(CaMarksRecord {
        course_title: row.get(1).cloned().unwrap_or_default(),
        ca1: mark(row, 2, policy),
        ca2: mark(row, 3, policy),
        ca3: mark(row, 4, policy),
        best_of_ca: mark(row, 5, policy),
        at1: mark(row, 6, policy),
        at2: mark(row, 7, policy),
        ap: mark(row, 8, policy),
        total: mark(row, 9, policy),
        course_code,
    })
}

fn parse_marks_table(
    page: &HtmlPage,
    locator: &Locator,
    policy: SentinelPolicy,
) -> Result<Option<Vec<CaMarksRecord>>, ScraperError> {
    if !page.has_table(locator)? {
        return Ok(None);
    }
    let records: Vec<_> = page
        .table(locator)?
        .iter()
        .skip(HEADER_ROWS)
        .filter_map(|row| ca_marks_record(row, policy))
        .collect();
    debug!("Parsed {} CA marks records from {}", records.len(), locator);
    Ok(Some(records))
}

/// CA評価点ページを解析する。表が2つとも無ければ `NoCaMarks`。
pub fn parse_ca_marks(markup: &str, policy: SentinelPolicy) -> Result<CaMarks, ScraperError> {
    let page = HtmlPage::parse(markup);
    let [first, second] = &CA_MARKS_TABLES;

    match (
        parse_marks_table(&page, first, policy)?,
        parse_marks_table(&page, second, policy)?,
    ) {
        (None, None) => Err(ScraperError::Unavailable(UnavailableKind::NoCaMarks)),
        (first, second) => Ok(CaMarks {
            first: first.unwrap_or_default(),
            second: second.unwrap_or_default(),
        }),
    }
}

pub async fn fetch_ca_marks<T: Transport>(
    session: &AuthenticatedSession<T>,
) -> Result<CaMarks, ScraperError> {
    let body = session.get(PortalPage::CaMarks).await?;
    parse_ca_marks(&body, session.config().sentinel_policy)
}
