//! Screening configuration: filter rules, classifier rules, presets.
//!
//! All keyword lists and thresholds live here as data so that callers can
//! tune the screen without touching predicate or classifier logic. The
//! defaults reproduce the production screen for the MOEX government bond
//! board.

use crate::domain::Rating;

/// How many instruments the shortlist keeps after ranking.
pub const DEFAULT_SHORTLIST_LIMIT: usize = 10;

/// Minimum days to maturity a bond must still have.
pub const DEFAULT_MIN_DAYS_TO_MATURITY: i64 = 30;

/// Currency assumed when the feed omits the column entirely.
pub const DEFAULT_CURRENCY: &str = "RUB";

/// Face value assumed when the feed omits it.
pub const DEFAULT_FACE_VALUE: f64 = 1000.0;

const OFFER_MARKERS: [&str; 9] = [
    "оферта", "оферты", "оферте", "call", "put", "досрочн", "досроч", "погашен", "погашени",
];

const AMORTIZATION_MARKERS: [&str; 4] = ["аморт", "амортизац", "погашен", "погашени"];

/// Named minimum-issue-size floors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IssueFloor {
    /// 1 billion; the production default for the reliable screen.
    Conservative,
    /// 100 million; admits smaller issues for a wider net.
    Broad,
    /// Caller-chosen floor.
    Custom(f64),
}

impl IssueFloor {
    pub const fn min_issue_size(self) -> f64 {
        match self {
            Self::Conservative => 1_000_000_000.0,
            Self::Broad => 100_000_000.0,
            Self::Custom(floor) => floor,
        }
    }
}

/// Predicate behavior when the fetched table lacks a required column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaTolerance {
    /// Apply every predicate; a record missing the needed field fails it.
    Strict,
    /// Skip a predicate whose column the feed did not deliver at all.
    Tolerant,
}

/// Rules consumed by the predicate filter chain.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterRules {
    pub tolerance: SchemaTolerance,
    /// Listing tier a bond must sit on (1 = most liquid).
    pub required_listing_tier: u8,
    pub required_currency: String,
    pub min_days_to_maturity: i64,
    /// Lowercased substrings flagging a put/call or early redemption.
    pub offer_markers: Vec<String>,
    /// Lowercased substrings flagging principal amortization.
    pub amortization_markers: Vec<String>,
    pub issue_floor: IssueFloor,
}

impl Default for FilterRules {
    fn default() -> Self {
        Self {
            tolerance: SchemaTolerance::Strict,
            required_listing_tier: 1,
            required_currency: String::from(DEFAULT_CURRENCY),
            min_days_to_maturity: DEFAULT_MIN_DAYS_TO_MATURITY,
            offer_markers: OFFER_MARKERS.iter().map(|m| String::from(*m)).collect(),
            amortization_markers: AMORTIZATION_MARKERS
                .iter()
                .map(|m| String::from(*m))
                .collect(),
            issue_floor: IssueFloor::Conservative,
        }
    }
}

impl FilterRules {
    /// Strict rules with the conservative issue floor.
    pub fn conservative() -> Self {
        Self::default()
    }

    /// Schema-tolerant rules with the broad issue floor, for feeds that
    /// deliver partial column sets.
    pub fn tolerant() -> Self {
        Self {
            tolerance: SchemaTolerance::Tolerant,
            issue_floor: IssueFloor::Broad,
            ..Self::default()
        }
    }

    pub fn with_issue_floor(mut self, floor: IssueFloor) -> Self {
        self.issue_floor = floor;
        self
    }
}

/// One classifier rule: first whose markers match assigns its tier.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierRule {
    pub rating: Rating,
    /// Substrings matched against the lowercased short name.
    pub short_name_markers: Vec<String>,
    /// Substrings matched against the lowercased full name.
    pub full_name_markers: Vec<String>,
}

impl ClassifierRule {
    fn new(rating: Rating, short_name_markers: &[&str], full_name_markers: &[&str]) -> Self {
        Self {
            rating,
            short_name_markers: short_name_markers.iter().map(|m| String::from(*m)).collect(),
            full_name_markers: full_name_markers.iter().map(|m| String::from(*m)).collect(),
        }
    }
}

/// Ordered rule list for the issuer-name rating heuristic.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    pub rules: Vec<ClassifierRule>,
    pub fallback: Rating,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            rules: vec![
                ClassifierRule::new(Rating::AaaSovereign, &["офз"], &["федеральн"]),
                ClassifierRule::new(
                    Rating::AaStateCorp,
                    &[],
                    &["вэб", "ржд", "росатом", "роснефт", "газпром", "транснефт"],
                ),
                ClassifierRule::new(Rating::ASystemicBank, &[], &["сбербанк", "втб"]),
                ClassifierRule::new(
                    Rating::ALargeCorp,
                    &[],
                    &["газпром", "лукойл", "сургутнефтегаз"],
                ),
            ],
            fallback: Rating::BbbOther,
        }
    }
}

/// Everything the screener engine needs to run one refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenConfig {
    pub rules: FilterRules,
    pub classifier: ClassifierConfig,
    pub limit: usize,
    pub default_currency: String,
    pub default_face_value: f64,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            rules: FilterRules::default(),
            classifier: ClassifierConfig::default(),
            limit: DEFAULT_SHORTLIST_LIMIT,
            default_currency: String::from(DEFAULT_CURRENCY),
            default_face_value: DEFAULT_FACE_VALUE,
        }
    }
}

impl ScreenConfig {
    pub fn tolerant() -> Self {
        Self {
            rules: FilterRules::tolerant(),
            ..Self::default()
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}
