//! テスト用のインメモリポータル

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::ScraperError;
use crate::pages::PortalPage;
use crate::traits::{PortalResponse, Transport};

pub(crate) const BASE_URL: &str = "http://portal.test/studzone2/";

type PostRecord = (String, Vec<(String, String)>, String);

#[derive(Default)]
struct State {
    gets: HashMap<String, (u16, String)>,
    posts: HashMap<String, (u16, String)>,
    requests: Vec<String>,
    post_log: Vec<PostRecord>,
    unreachable: bool,
}

/// URLごとに固定のHTMLを返し、受けたリクエストを記録する
#[derive(Clone, Default)]
pub(crate) struct FakePortal {
    state: Arc<Mutex<State>>,
}

impl FakePortal {
    /// ログインが通り、全ページが揃っているポータル
    pub(crate) fn logged_in() -> Self {
        let portal = Self::default()
            .with_get(BASE_URL, 200, fixtures::LOGIN_PAGE)
            .with_post(BASE_URL, 200, fixtures::LOGIN_OK);

        [
            (PortalPage::Profile, fixtures::PROFILE),
            (PortalPage::Attendance, fixtures::ATTENDANCE),
            (PortalPage::Timetable, fixtures::TIMETABLE),
            (PortalPage::SemesterResults, fixtures::SEMESTER_RESULTS),
            (PortalPage::CourseHistory, fixtures::COURSE_HISTORY),
            (PortalPage::CaMarks, fixtures::CA_MARKS),
            (PortalPage::TestTimetable, fixtures::TEST_TIMETABLE),
        ]
        .into_iter()
        .fold(portal, |portal, (page, body)| portal.with_page(page, 200, body))
    }

    /// 接続できないポータル（全リクエストが `Transport` エラー）
    pub(crate) fn unreachable() -> Self {
        let portal = Self::default();
        portal.lock().unreachable = true;
        portal
    }

    pub(crate) fn with_get(self, url: &str, status: u16, body: &str) -> Self {
        self.lock().gets.insert(url.to_string(), (status, body.to_string()));
        self
    }

    pub(crate) fn with_post(self, url: &str, status: u16, body: &str) -> Self {
        self.lock().posts.insert(url.to_string(), (status, body.to_string()));
        self
    }

    pub(crate) fn with_page(self, page: PortalPage, status: u16, body: &str) -> Self {
        let url = format!("{BASE_URL}{}", page.path());
        self.with_get(&url, status, body)
    }

    /// "GET url" / "POST url" 形式のリクエスト履歴
    pub(crate) fn requests(&self) -> Vec<String> {
        self.lock().requests.clone()
    }

    /// (url, form, referer)
    pub(crate) fn posts(&self) -> Vec<PostRecord> {
        self.lock().post_log.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    fn respond(url: &str, entry: Option<&(u16, String)>) -> PortalResponse {
        let (status, body) = entry.cloned().unwrap_or((404, String::new()));
        PortalResponse {
            status,
            url: url.to_string(),
            body,
        }
    }
}

#[async_trait]
impl Transport for FakePortal {
    async fn get(&self, url: &str) -> Result<PortalResponse, ScraperError> {
        let mut state = self.lock();
        state.requests.push(format!("GET {url}"));
        if state.unreachable {
            return Err(ScraperError::Transport(format!("connection refused: {url}")));
        }
        Ok(Self::respond(url, state.gets.get(url)))
    }

    async fn post_form(
        &self,
        url: &str,
        form: &[(&'static str, String)],
        referer: &str,
    ) -> Result<PortalResponse, ScraperError> {
        let mut state = self.lock();
        state.requests.push(format!("POST {url}"));
        state.post_log.push((
            url.to_string(),
            form.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
            referer.to_string(),
        ));
        if state.unreachable {
            return Err(ScraperError::Transport(format!("connection refused: {url}")));
        }
        Ok(Self::respond(url, state.posts.get(url)))
    }
}

pub(crate) mod fixtures {
    pub(crate) const LOGIN_PAGE: &str = r#"<html><body>
        <form method="post" action="./" id="form1">
          <input type="hidden" name="__LASTFOCUS" id="__LASTFOCUS" value="" />
          <input type="hidden" name="__VIEWSTATE" id="__VIEWSTATE" value="dDwtMTA4" />
          <input type="hidden" name="__VIEWSTATEGENERATOR" id="__VIEWSTATEGENERATOR" value="C2EE9ABB" />
          <input type="hidden" name="__EVENTVALIDATION" id="__EVENTVALIDATION" value="/wEdAAU" />
          <input name="txtusercheck" type="text" id="txtusercheck" />
          <input name="txtpwdcheck" type="password" id="txtpwdcheck" />
          <input type="submit" name="abcd3" value="Login" id="abcd3" />
        </form></body></html>"#;

    pub(crate) const LOGIN_OK: &str =
        r#"<html><body><span id="lblName">Welcome, ARUN KUMAR</span></body></html>"#;

    pub(crate) const LOGIN_REJECTED: &str = r#"<html><body>
        <span id="Message" style="color:Red">Invalid Username or Password</span>
        </body></html>"#;

    pub(crate) const PROFILE: &str = r#"<html><body>
        <table id="ItStud">
          <tr><td>Name</td><td>:</td><td>ARUN KUMAR</td><td>RollNo</td><td>:</td><td>21Z201</td></tr>
          <tr><td>Batch</td><td>:</td><td>2021-2025</td><td>Programme</td><td>:</td><td>BE CSE</td></tr>
          <tr><td>Resident-Status</td><td>:</td><td>Day Scholar</td><td>Section</td><td>:</td><td>A</td></tr>
          <tr><td>Photo</td></tr>
        </table>
        <table id="DlsAddr"><tr><td>
          R. KUMAR<br>12, Gandhi Street<br>Peelamedu<br>Coimbatore<br>641004<br>
          Mobile: 9876543210<br>Mail : parent@example.com<br>
          Student Mobile: 9123456780<br>Student EMail : arun@example.com
        </td></tr></table>
        </body></html>"#;

    pub(crate) const ATTENDANCE: &str = r#"<html><body>
        <table class="cssbody">
          <tr><td>Course Code</td><td>Total Hours</td><td>Exemption Hours</td><td>Total Absent</td>
              <td>Total Present</td><td>Percentage</td><td>% With Exemp</td><td>% With Exemp Med</td>
              <td>From</td><td>To</td></tr>
          <tr><td>21Z501</td><td>40</td><td>0</td><td>4</td><td>36</td><td>90</td><td>90</td><td>90</td>
              <td>01-08-2024</td><td>30-09-2024</td></tr>
          <tr><td>21Z502</td><td>40</td><td>0</td><td>12</td><td>28</td><td>70</td><td>70</td><td>70</td>
              <td>01-08-2024</td><td>30-09-2024</td></tr>
        </table></body></html>"#;

    pub(crate) const ATTENDANCE_IN_PROCESS: &str = r#"<html><body>
        <span id="Message">Attendance Percentage Updation On Process</span>
        </body></html>"#;

    pub(crate) const TIMETABLE: &str = r#"<html><body>
        <table id="TbCourDesc">
          <tr><td>Course Code</td><td>Course Title</td><td>Programme</td><td>Sem</td></tr>
          <tr><td>21Z501</td><td>Compiler Design</td><td>BE CSE</td><td>5</td></tr>
          <tr><td>21Z502</td><td>Computer Networks</td><td>BE CSE</td><td>5</td></tr>
        </table>
        <table id="DtStfTimtab">
          <tr><td>Weekly Timetable</td></tr>
          <tr><td>Day</td><td>9:00</td><td>10:00</td></tr>
          <tr><td>Monday</td><td>BE CSE<br>21Z501<br>BE CSE<br>21Z502</td><td></td></tr>
          <tr><td>Tuesday</td><td>&nbsp;</td><td>BE CSE<br>21Z502</td></tr>
        </table></body></html>"#;

    pub(crate) const SEMESTER_RESULTS: &str = r#"<html><body>
        <table id="DgResult">
          <tr><td>Sem</td><td>Course Code</td><td>Course Title</td><td>Grade</td><td>Result</td></tr>
          <tr><td>5</td><td>21Z501</td><td>Compiler Design</td><td>A+</td><td>PASS</td></tr>
        </table></body></html>"#;

    pub(crate) const COURSE_HISTORY: &str = r#"<html><body>
        <table id="PDGCourse">
          <tr><td>S.No</td><td>Code</td><td>Title</td><td>Type</td><td>Sem</td><td>Month</td><td>Grade</td><td>Credit</td></tr>
          <tr><td>1</td><td>21Z401</td><td>Operating Systems</td><td>Theory</td><td>4</td><td>APR-2024</td><td>O</td><td>4</td></tr>
          <tr><td>2</td><td>21Z402</td><td>Databases</td><td>Theory</td><td>4</td><td>APR-2024</td><td>B</td><td>3</td></tr>
        </table></body></html>"#;

    pub(crate) const CA_MARKS: &str = r#"<html><body>
        <table id="8^1580">
          <tr><td>Theory Courses</td></tr>
          <tr><td>Code</td><td>Title</td><td>CA1</td><td>CA2</td><td>CA3</td><td>Best</td><td>AT1</td><td>AT2</td><td>AP</td><td>Total</td></tr>
          <tr><td>21Z501</td><td>Compiler Design</td><td>18</td><td>*</td><td>0</td><td>18</td><td>9</td><td>*</td><td>5</td><td>32</td></tr>
        </table>
        </body></html>"#;

    pub(crate) const CA_MARKS_EMPTY: &str =
        r#"<html><body><span id="Message">No records found</span></body></html>"#;

    pub(crate) const TEST_TIMETABLE: &str = r#"<html><body>
        <table id="DGTT">
          <tr><td>Date</td><td>Day</td><td>Session</td><td>Code</td><td>Name</td><td>Room</td></tr>
          <tr><td>14-10-2024</td><td>Monday</td><td>FN</td><td>21Z501</td><td>Compiler Design</td><td>J101</td></tr>
        </table></body></html>"#;
}
