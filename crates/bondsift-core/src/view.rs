//! Shortlist view: the compact per-row projection of a snapshot.

use serde::{Deserialize, Serialize};

use crate::domain::{RankedBond, Rating, Ticker, UtcTimestamp};

/// Character budget for a row's display name.
pub const SHORTLIST_NAME_CHARS: usize = 25;

/// One shortlist line, ready for table or message rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortlistRow {
    /// 1-based position in the ranked shortlist.
    pub ordinal: usize,
    pub ticker: Ticker,
    /// Short name truncated to [`SHORTLIST_NAME_CHARS`].
    pub name: String,
    pub rating: Rating,
    pub coupon_percent: Option<f64>,
    pub years_to_maturity: Option<f64>,
}

/// A rendered shortlist; pure data, no markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortlistView {
    pub generated_at: UtcTimestamp,
    pub rows: Vec<ShortlistRow>,
}

impl ShortlistView {
    /// Project a ranked snapshot into display rows.
    pub fn from_snapshot(bonds: &[RankedBond]) -> Self {
        let rows = bonds
            .iter()
            .enumerate()
            .map(|(index, bond)| ShortlistRow {
                ordinal: index + 1,
                ticker: bond.ticker.clone(),
                name: truncate_name(&bond.short_name, SHORTLIST_NAME_CHARS),
                rating: bond.rating,
                coupon_percent: bond.coupon_percent,
                years_to_maturity: bond.years_to_maturity,
            })
            .collect();

        Self {
            generated_at: UtcTimestamp::now(),
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Truncate to `max_chars` characters and mark the cut with an ellipsis.
/// Counts characters, not bytes, so Cyrillic names cut safely.
pub(crate) fn truncate_name(name: &str, max_chars: usize) -> String {
    if name.chars().count() > max_chars {
        let kept: String = name.chars().take(max_chars).collect();
        format!("{kept}...")
    } else {
        String::from(name)
    }
}
