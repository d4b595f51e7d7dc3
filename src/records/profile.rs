//! 学生プロフィール
//!
//! 学籍情報表（`ItStud`）と住所表（`DlsAddr`）の2つを組み合わせる。
//! どちらの表が欠けても失敗にはせず、該当項目を空文字列にする。

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use super::types::{ContactInfo, FamilyInfo, PersonalInfo, StudentProfile};
use crate::error::ScraperError;
use crate::html::HtmlPage;
use crate::pages::{PortalPage, PROFILE_ACADEMIC_TABLE, PROFILE_ADDRESS_TABLE};
use crate::session::AuthenticatedSession;
use crate::traits::Transport;

/// 住所の行数（父親名の直後から）
const ADDRESS_LINES: usize = 4;

static PARENT_MOBILE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Mobile:(.+)").unwrap());
static PARENT_EMAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Mail :(.+)").unwrap());
static STUDENT_MOBILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Student Mobile:(.+)").unwrap());
static STUDENT_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Student EMail :(.+)").unwrap());

/// 最初に一致した箇所の値（一致しなければ空文字列）
fn capture(pattern: &Regex, text: &str) -> String {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// 学籍情報表の「ラベル : 値 ラベル : 値」をキー（小文字）→値に
fn academic_fields(page: &HtmlPage) -> Result<HashMap<String, String>, ScraperError> {
    let rows = match page.dense_table(&PROFILE_ACADEMIC_TABLE) {
        Ok(rows) => rows,
        Err(ScraperError::TableNotFound(_)) => {
            warn!("Academic details table not found on profile page");
            return Ok(HashMap::new());
        }
        Err(e) => return Err(e),
    };

    let mut fields = HashMap::new();
    for row in rows.iter().filter(|row| row.len() >= 6) {
        fields.insert(row[0].to_lowercase(), row[2].clone());
        fields.insert(row[3].to_lowercase(), row[5].clone());
    }
    Ok(fields)
}

fn address_block(page: &HtmlPage) -> Result<(FamilyInfo, ContactInfo, String), ScraperError> {
    let lines = match page.table_lines(&PROFILE_ADDRESS_TABLE) {
        Ok(lines) => lines,
        Err(ScraperError::TableNotFound(_)) => {
            warn!("Address table not found on profile page");
            return Ok(Default::default());
        }
        Err(e) => return Err(e),
    };

    let family = FamilyInfo {
        father_name: lines.first().cloned().unwrap_or_default(),
    };
    let address = lines
        .iter()
        .skip(1)
        .take(ADDRESS_LINES)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    let contact_text = lines
        .get(1 + ADDRESS_LINES..)
        .unwrap_or_default()
        .join("\n");
    let contact = ContactInfo {
        student_mobile: capture(&STUDENT_MOBILE, &contact_text),
        student_email: capture(&STUDENT_EMAIL, &contact_text),
        parent_mobile: capture(&PARENT_MOBILE, &contact_text),
        parent_email: capture(&PARENT_EMAIL, &contact_text),
    };

    Ok((family, contact, address))
}

pub fn parse_profile(markup: &str) -> Result<StudentProfile, ScraperError> {
    let page = HtmlPage::parse(markup);
    let fields = academic_fields(&page)?;
    let (family, contact, address) = address_block(&page)?;

    let field = |key: &str| fields.get(key).cloned().unwrap_or_default();
    let profile = StudentProfile {
        personal: PersonalInfo {
            name: field("name"),
            roll_number: field("rollno"),
            batch: field("batch"),
            programme: field("programme"),
            resident_status: field("resident-status"),
        },
        family,
        contact,
        address,
    };
    debug!("Parsed profile for {}", profile.personal.roll_number);
    Ok(profile)
}

pub async fn fetch_profile<T: Transport>(
    session: &AuthenticatedSession<T>,
) -> Result<StudentProfile, ScraperError> {
    let body = session.get(PortalPage::Profile).await?;
    parse_profile(&body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[test]
    fn test_parse_profile() {
        let profile = parse_profile(fixtures::PROFILE).unwrap();

        assert_eq!(profile.personal.name, "ARUN KUMAR");
        assert_eq!(profile.personal.roll_number, "21Z201");
        assert_eq!(profile.personal.batch, "2021-2025");
        assert_eq!(profile.personal.programme, "BE CSE");
        assert_eq!(profile.personal.resident_status, "Day Scholar");
        assert_eq!(profile.family.father_name, "R. KUMAR");
        assert_eq!(profile.address, "12, Gandhi Street, Peelamedu, Coimbatore, 641004");
        assert_eq!(profile.contact.parent_mobile, "9876543210");
        assert_eq!(profile.contact.parent_email, "parent@example.com");
        assert_eq!(profile.contact.student_mobile, "9123456780");
        assert_eq!(profile.contact.student_email, "arun@example.com");
    }

    #[test]
    fn test_unmatched_patterns_are_empty() {
        let markup = r#"<table id="DlsAddr"><tr><td>R. KUMAR<br>Line 1<br>Line 2</td></tr></table>"#;
        let profile = parse_profile(markup).unwrap();

        assert_eq!(profile.family.father_name, "R. KUMAR");
        assert_eq!(profile.address, "Line 1, Line 2");
        assert_eq!(profile.contact, ContactInfo::default());
        assert_eq!(profile.personal, PersonalInfo::default());
    }

    #[test]
    fn test_empty_page() {
        let profile = parse_profile("<html></html>").unwrap();
        assert_eq!(profile, StudentProfile::default());
    }
}
