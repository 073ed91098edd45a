//! # Domain Models
//!
//! Canonical bond-domain types for bondsift.
//!
//! ## Overview
//!
//! Strongly-typed models shared by the normalizer, the screening pipeline
//! and the session layer. All models are designed to be:
//!
//! - **Type-safe**: tickers and dates are validated newtypes, not strings
//! - **Honest about absence**: feed gaps are `Option`, never sentinel values
//! - **Serializable**: full serde support for snapshots and CLI output
//!
//! ## Models
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Ticker`] | Validated exchange security id (SECID) |
//! | [`MarketDate`] | `YYYY-MM-DD` calendar date |
//! | [`UtcTimestamp`] | RFC3339 UTC timestamp for snapshot bookkeeping |
//! | [`Rating`] | Five-tier reliability heuristic |
//! | [`SecurityRecord`] | One bond as normalized from the listing table |
//! | [`RankedBond`] | Filtered bond with computed rating/frequency/maturity |
//! | [`CouponEvent`] | One scheduled coupon payment |

mod date;
mod rating;
mod security;
mod ticker;
mod timestamp;

pub use date::MarketDate;
pub use rating::Rating;
pub use security::{CouponEvent, RankedBond, SecurityRecord};
pub use ticker::Ticker;
pub use timestamp::UtcTimestamp;
