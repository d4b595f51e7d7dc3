//! ポータルのページとテーブル識別子
//!
//! ここにある識別子はライブポータルとの連携契約。サイト側が変わるまで固定。

use crate::html::Locator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortalPage {
    Profile,
    Attendance,
    Timetable,
    SemesterResults,
    CourseHistory,
    CaMarks,
    TestTimetable,
}

impl PortalPage {
    pub fn path(self) -> &'static str {
        match self {
            Self::Profile => "AttWfStudProfile.aspx",
            Self::Attendance => "AttWfPercView.aspx",
            Self::Timetable => "AttWfStudTimtab.aspx",
            Self::SemesterResults => "FrmEpsStudResult.aspx",
            Self::CourseHistory => "AttWfStudCourseSelection.aspx",
            Self::CaMarks => "CAMarks_View.aspx",
            Self::TestTimetable => "FrmEpsTestTimetable.aspx",
        }
    }
}

impl std::fmt::Display for PortalPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

pub const ATTENDANCE_TABLE: Locator = Locator::Class("cssbody");
pub const ATTENDANCE_MESSAGE_ID: &str = "Message";
pub const ATTENDANCE_IN_PROCESS_MARKER: &str = "On Process";

pub const PROFILE_ACADEMIC_TABLE: Locator = Locator::Id("ItStud");
pub const PROFILE_ADDRESS_TABLE: Locator = Locator::Id("DlsAddr");

pub const COURSE_TIMETABLE_TABLE: Locator = Locator::Id("TbCourDesc");
pub const WEEKLY_TIMETABLE_TABLE: Locator = Locator::Id("DtStfTimtab");
pub const TEST_TIMETABLE_TABLE: Locator = Locator::Id("DGTT");

pub const SEMESTER_RESULTS_TABLE: Locator = Locator::Id("DgResult");
pub const COURSE_HISTORY_TABLE: Locator = Locator::Id("PDGCourse");

pub const CA_MARKS_TABLES: [Locator; 2] = [Locator::Id("8^1580"), Locator::Id("8^1590")];
