//! 成績（今学期の成績表と単位加重GPA）

use tracing::{debug, warn};

use super::types::{ResultSheet, SemesterSummary};
use crate::error::{ScraperError, UnavailableKind};
use crate::html::{HtmlPage, TableRow};
use crate::pages::{PortalPage, COURSE_HISTORY_TABLE, SEMESTER_RESULTS_TABLE};
use crate::session::AuthenticatedSession;
use crate::traits::Transport;

const SEMESTER_COLUMN: usize = 4;
const GRADE_COLUMN: usize = 6;
const CREDIT_COLUMN: usize = 7;

/// 評語 → グレードポイント（未知の評語は0）
pub fn grade_point(grade: &str) -> u32 {
    match grade {
        "O" => 10,
        "A+" => 9,
        "A" => 8,
        "B+" => 7,
        "B" => 6,
        "C+" => 5,
        "C" => 4,
        "W" | "RA" | "SA" => 0,
        _ => 0,
    }
}

/// (評語, 単位) の列から単位加重平均を計算する
///
/// 単位が整数として読めない行は分子・分母の両方から除外する。
/// 合計が `i64` に収まらなくなる行も同様に除外する。
/// 有効な単位の合計が0なら `None`。
pub fn compute_cgpa<'a, I>(courses: I) -> Option<f64>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut weighted: i64 = 0;
    let mut credits: i64 = 0;

    for (grade, credit) in courses {
        let Ok(credit) = credit.parse::<i64>() else {
            continue;
        };
        let sums = i64::from(grade_point(grade))
            .checked_mul(credit)
            .and_then(|points| Some((weighted.checked_add(points)?, credits.checked_add(credit)?)));
        match sums {
            Some((w, c)) => {
                weighted = w;
                credits = c;
            }
            None => warn!("Credit value out of range skipped: {}", credit),
        }
    }

    if credits == 0 {
        return None;
    }
    let cgpa = weighted as f64 / credits as f64;
    Some((cgpa * 1000.0).round() / 1000.0)
}

/// 履修履歴表から学期サマリーを作る
pub fn summarize_courses(rows: &[TableRow]) -> SemesterSummary {
    let data = rows.get(1..).unwrap_or_default();

    let courses = data.iter().filter_map(|row| {
        let grade = row.get(GRADE_COLUMN)?;
        match row.get(CREDIT_COLUMN) {
            Some(credit) => Some((grade.as_str(), credit.as_str())),
            None => {
                warn!("Course row without credit column skipped: {:?}", row.first());
                None
            }
        }
    });

    match compute_cgpa(courses) {
        Some(cgpa) => SemesterSummary {
            latest_semester_number: data
                .first()
                .and_then(|row| row.get(SEMESTER_COLUMN))
                .cloned(),
            latest_semester_cgpa: Some(cgpa),
        },
        None => {
            warn!("No valid credits in course history, CGPA not available");
            SemesterSummary::not_available()
        }
    }
}

pub fn parse_course_history(markup: &str) -> Result<SemesterSummary, ScraperError> {
    let rows = HtmlPage::parse(markup)
        .table(&COURSE_HISTORY_TABLE)
        .map_err(|e| match e {
            ScraperError::TableNotFound(_) => {
                ScraperError::Scraping("Course details table not found".into())
            }
            other => other,
        })?;
    Ok(summarize_courses(&rows))
}

pub fn parse_semester_results(markup: &str) -> Result<ResultSheet, ScraperError> {
    let mut rows = HtmlPage::parse(markup)
        .table(&SEMESTER_RESULTS_TABLE)
        .map_err(|e| match e {
            ScraperError::TableNotFound(_) => {
                ScraperError::Unavailable(UnavailableKind::NoSemesterResults)
            }
            other => other,
        })?
        .into_iter()
        .filter(|row| !row.is_empty());

    let columns = rows.next().unwrap_or_default();
    let rows: Vec<_> = rows.collect();
    debug!("Parsed {} semester result rows", rows.len());
    Ok(ResultSheet { columns, rows })
}

/// 今学期の成績を取得する
pub async fn fetch_semester_results<T: Transport>(
    session: &AuthenticatedSession<T>,
) -> Result<ResultSheet, ScraperError> {
    let body = session.get(PortalPage::SemesterResults).await?;
    parse_semester_results(&body)
}

/// 履修履歴からGPAを取得する
pub async fn fetch_semester_summary<T: Transport>(
    session: &AuthenticatedSession<T>,
) -> Result<SemesterSummary, ScraperError> {
    let body = session.get(PortalPage::CourseHistory).await?;
    parse_course_history(&body)
}
