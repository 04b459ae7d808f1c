//! Per-variant crawl tables: which source labels map to which output fields,
//! how free text resolves to a region, and which columns lead the export.

use crate::cli::ProfileKind;

pub const TITLE: &str = "Title";
pub const CATEGORY: &str = "Category";
pub const AGENCY: &str = "Agency";
pub const LOCATION: &str = "Location";
pub const PERIOD_START: &str = "PeriodStart";
pub const PERIOD_END: &str = "PeriodEnd";
pub const DEADLINE: &str = "Deadline";
pub const HITS: &str = "Hits";
pub const LINK: &str = "Link";
pub const CONTENT: &str = "Content";

/// Columns kept in the export for downstream consumers but never filled.
pub const PLACEHOLDER_COLUMNS: [&str; 2] = [DEADLINE, HITS];

pub const PERIOD_SEPARATOR: &str = " ~ ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    Canonical(&'static str),
    /// Split on [`PERIOD_SEPARATOR`] into start and end.
    Period,
    /// Like `Period`, but no further table rows are read afterwards.
    PeriodTerminator,
}

#[derive(Debug, Clone)]
pub struct CrawlProfile {
    pub kind: ProfileKind,
    pub labels: &'static [(&'static str, FieldRule)],
    pub regions: &'static [(&'static str, &'static str)],
    pub columns: &'static [&'static str],
    pub capture_link: bool,
    pub ensure_agency: bool,
}

impl CrawlProfile {
    pub fn for_kind(kind: ProfileKind) -> Self {
        match kind {
            ProfileKind::Program => Self {
                kind,
                labels: PROGRAM_LABELS,
                regions: PROGRAM_REGIONS,
                columns: PROGRAM_COLUMNS,
                capture_link: true,
                ensure_agency: false,
            },
            ProfileKind::Agency => Self {
                kind,
                labels: AGENCY_LABELS,
                regions: AGENCY_REGIONS,
                columns: AGENCY_COLUMNS,
                capture_link: false,
                ensure_agency: true,
            },
        }
    }

    pub fn rule_for(&self, label: &str) -> Option<FieldRule> {
        self.labels
            .iter()
            .find(|(source, _)| *source == label)
            .map(|(_, rule)| *rule)
    }
}

const PROGRAM_LABELS: &[(&str, FieldRule)] = &[
    ("제목", FieldRule::Canonical(TITLE)),
    ("지원사항", FieldRule::Canonical(CATEGORY)),
    ("프로그램 기간", FieldRule::Period),
    ("접수 기간", FieldRule::PeriodTerminator),
    ("내용", FieldRule::Canonical(CONTENT)),
];

const AGENCY_LABELS: &[(&str, FieldRule)] = &[
    ("제목", FieldRule::Canonical(TITLE)),
    ("지원사항", FieldRule::Canonical(CATEGORY)),
    ("시행기관", FieldRule::Canonical(AGENCY)),
    ("프로그램 기간", FieldRule::Period),
    ("내용", FieldRule::Canonical(CONTENT)),
];

const PROGRAM_COLUMNS: &[&str] = &[
    TITLE,
    CATEGORY,
    LOCATION,
    PERIOD_START,
    PERIOD_END,
    DEADLINE,
    HITS,
    LINK,
    CONTENT,
];

const AGENCY_COLUMNS: &[&str] = &[
    TITLE,
    CATEGORY,
    AGENCY,
    LOCATION,
    PERIOD_START,
    PERIOD_END,
    DEADLINE,
    HITS,
    LINK,
    CONTENT,
];

// Order matters: the first alias found in the text wins, so short forms
// shadow longer ones declared after them.
const PROGRAM_REGIONS: &[(&str, &str)] = &[
    ("서울", "서울특별시"),
    ("부산", "부산광역시"),
    ("대구", "대구광역시"),
    ("인천", "인천광역시"),
    ("광주", "광주광역시"),
    ("대전", "대전광역시"),
    ("울산", "울산광역시"),
    ("세종", "세종특별자치시"),
    ("경기", "경기도"),
    ("경기도", "경기도"),
    ("강원", "강원도"),
    ("강원도", "강원도"),
    ("충북", "충청북도"),
    ("충청북도", "충청북도"),
    ("충남", "충청남도"),
    ("충청남도", "충청남도"),
    ("전북", "전라북도"),
    ("전라북도", "전라북도"),
    ("전남", "전라남도"),
    ("전라남도", "전라남도"),
    ("경북", "경상북도"),
    ("경상북도", "경상북도"),
    ("경남", "경상남도"),
    ("경상남도", "경상남도"),
    ("제주도", "제주특별자치도"),
    ("제주", "제주특별자치도"),
];

const AGENCY_REGIONS: &[(&str, &str)] = &[
    ("서울", "서울특별시"),
    ("부산", "부산광역시"),
    ("대구", "대구광역시"),
    ("인천", "인천광역시"),
    ("광주", "광주광역시"),
    ("대전", "대전광역시"),
    ("울산", "울산광역시"),
    ("세종", "세종특별자치시"),
    ("경기", "경기도"),
    ("경기도", "경기도"),
    ("강원", "강원특별자치도"),
    ("강원도", "강원도"),
    ("충북", "충청북도"),
    ("충청북도", "충청북도"),
    ("충남", "충청남도"),
    ("충청남도", "충청남도"),
    ("전북", "전라북도"),
    ("전라북도", "전라북도"),
    ("전남", "전라남도"),
    ("전라남도", "전라남도"),
    ("경북", "경상북도"),
    ("경상북도", "경상북도"),
    ("경남", "경상남도"),
    ("경상남도", "경상남도"),
    ("제주도", "제주특별자치도"),
    ("제주", "제주특별자치도"),
];
