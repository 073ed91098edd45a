use serde::{Deserialize, Serialize};

use crate::{MarketDate, Rating, Ticker};

/// One bond as normalized from the exchange listing table.
///
/// Every field except the ticker is optional: the feed omits columns and
/// leaves cells null, and the normalizer never fails a row over bad data.
/// Missing names normalize to the empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityRecord {
    pub ticker: Ticker,
    pub short_name: String,
    pub full_name: String,
    pub issue_size: Option<f64>,
    pub coupon_percent: Option<f64>,
    pub coupon_period_days: Option<u32>,
    pub maturity_date: Option<MarketDate>,
    pub listing_tier: Option<u8>,
    pub face_value: Option<f64>,
    pub currency: Option<String>,
    pub yield_close: Option<f64>,
}

impl SecurityRecord {
    /// Bare record with only the ticker set; remaining fields default to
    /// absent. Primarily a convenience for tests and fixtures.
    pub fn new(ticker: Ticker) -> Self {
        Self {
            ticker,
            short_name: String::new(),
            full_name: String::new(),
            issue_size: None,
            coupon_percent: None,
            coupon_period_days: None,
            maturity_date: None,
            listing_tier: None,
            face_value: None,
            currency: None,
            yield_close: None,
        }
    }
}

/// A bond that survived the filter chain, enriched with computed fields
/// and schema defaults (currency `RUB`, face value 1000).
///
/// Snapshots are `Vec<RankedBond>`: immutable once stored, replaced
/// wholesale on refresh. Serde round-trips so session stores can persist
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedBond {
    pub ticker: Ticker,
    pub short_name: String,
    pub full_name: String,
    pub rating: Rating,
    pub coupon_percent: Option<f64>,
    pub coupon_period_days: Option<u32>,
    pub coupon_frequency: u32,
    pub maturity_date: Option<MarketDate>,
    /// One-decimal years until maturity; absent only when the feed carried
    /// no maturity column at all (tolerant screening).
    pub years_to_maturity: Option<f64>,
    pub issue_size: Option<f64>,
    pub face_value: f64,
    pub currency: String,
    pub listing_tier: Option<u8>,
    pub yield_close: Option<f64>,
}

/// One scheduled coupon payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponEvent {
    pub date: MarketDate,
    /// Payment amount in the bond's currency; the feed leaves it null for
    /// coupons that are not yet determined.
    pub amount: Option<f64>,
}
