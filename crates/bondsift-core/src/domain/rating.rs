use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Heuristic reliability tier, not an agency credit grade.
///
/// Variants are declared from most to least reliable so that the derived
/// `Ord` matches ranking order: sovereign debt first, everything
/// unrecognized last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    /// Federal loan bonds (ОФЗ).
    AaaSovereign,
    /// State-owned corporations (ВЭБ, РЖД, Росатом, ...).
    AaStateCorp,
    /// Systemically important banks.
    ASystemicBank,
    /// Large private issuers.
    ALargeCorp,
    /// Everything else.
    BbbOther,
}

impl Rating {
    /// 1-based rank position, 1 = most reliable.
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::AaaSovereign => 1,
            Self::AaStateCorp => 2,
            Self::ASystemicBank => 3,
            Self::ALargeCorp => 4,
            Self::BbbOther => 5,
        }
    }

    /// Human-readable tier label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::AaaSovereign => "AAA (ОФЗ)",
            Self::AaStateCorp => "AA (госкорпорация)",
            Self::ASystemicBank => "A+ (системный банк)",
            Self::ALargeCorp => "A (крупная компания)",
            Self::BbbOther => "BBB (иные эмитенты)",
        }
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
