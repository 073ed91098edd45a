//! Securities feed trait.
//!
//! This module defines the adapter contract (`SecuritiesFeed`) that every
//! market-data implementation must follow. The contract is deliberately
//! degraded: fetches never fail, they return empty data instead. The engine
//! decides what an empty result means ([`ScreenError::SourceUnavailable`]
//! for the board listing, a shorter detail view for coupons).
//!
//! [`ScreenError::SourceUnavailable`]: crate::ScreenError::SourceUnavailable
//!
//! # Example
//!
//! ```rust,ignore
//! use bondsift_core::{MoexIssFeed, SecuritiesFeed, Ticker};
//!
//! async fn preview(feed: &MoexIssFeed) -> Result<(), Box<dyn std::error::Error>> {
//!     let table = feed.fetch_securities().await;
//!     println!("{} raw rows", table.row_count());
//!
//!     let ticker = Ticker::parse("SU26238RMFS4")?;
//!     for event in feed.fetch_coupon_schedule(&ticker).await {
//!         println!("coupon on {}", event.date);
//!     }
//!
//!     Ok(())
//! }
//! ```

use std::future::Future;
use std::pin::Pin;

use crate::domain::{CouponEvent, Ticker};
use crate::table::RawTable;

/// Contract for fetching bond market data.
///
/// Implementations swallow transport and decoding failures and return empty
/// data, logging the cause at `warn` level. Callers therefore never see a
/// transport error type, only the absence of rows.
pub trait SecuritiesFeed: Send + Sync {
    /// Fetches the full board listing as a raw column/row table.
    ///
    /// Returns [`RawTable::empty`] when the upstream is unreachable, answers
    /// with a non-success status after retries, or sends a malformed payload.
    fn fetch_securities<'a>(&'a self) -> Pin<Box<dyn Future<Output = RawTable> + Send + 'a>>;

    /// Fetches the coupon schedule for a single instrument.
    ///
    /// Events are returned in upstream order, past dates included; callers
    /// apply their own date window. Returns an empty vector on any failure.
    fn fetch_coupon_schedule<'a>(
        &'a self,
        ticker: &'a Ticker,
    ) -> Pin<Box<dyn Future<Output = Vec<CouponEvent>> + Send + 'a>>;
}
