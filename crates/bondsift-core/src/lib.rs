//! # Bondsift Core
//!
//! Bond reliability screening engine over the Moscow Exchange ISS feed.
//!
//! ## Overview
//!
//! This crate reduces a raw exchange bond listing to a ranked shortlist of
//! reliable instruments:
//!
//! - **Record normalizer** turning tabular ISS blocks into typed records
//! - **Predicate filter chain** (listing tier, currency, coupon, maturity
//!   horizon, offer/amortization clauses, issue floor) in strict or
//!   schema-tolerant form
//! - **Rating heuristic** grading issuers into five tiers by name keywords
//! - **Coupon frequency estimator** with banded rounding
//! - **Deterministic ranker**: rating first, coupon yield second
//! - **Session snapshots** so detail and "back" actions reuse the last
//!   shortlist without re-fetching
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | MOEX ISS feed adapter |
//! | [`detail`] | Detail card assembly for one shortlisted bond |
//! | [`domain`] | Domain models (Ticker, MarketDate, SecurityRecord, RankedBond) |
//! | [`engine`] | The screener façade (`refresh` / `current` / `details`) |
//! | [`error`] | Screening and validation error types |
//! | [`feed`] | Securities feed trait with the failure-to-empty contract |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`retry`] | Retry policy and backoff for the feed adapter |
//! | [`screen`] | Filter, classifier, frequency and ranking stages |
//! | [`session`] | Per-session snapshot stores |
//! | [`table`] | Raw listing table and the record normalizer |
//! | [`view`] | Shortlist view projection |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use bondsift_core::{
//!     InMemorySnapshotStore, MoexIssFeed, ReqwestHttpClient, Screener, Ticker,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let feed = MoexIssFeed::with_http_client(Arc::new(ReqwestHttpClient::new()));
//!     let screener = Screener::new(Arc::new(feed), Arc::new(InMemorySnapshotStore::new()));
//!
//!     let shortlist = screener.refresh("local").await?;
//!     for row in &shortlist.rows {
//!         println!("{}. {} {}", row.ordinal, row.ticker, row.rating);
//!     }
//!
//!     let detail = screener.details("local", &Ticker::parse("SU26238RMFS4")?).await?;
//!     println!("coupon pays {:.2} {}", detail.coupon_value, detail.currency);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / Bot      │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Screener Engine │────▶│ Snapshot Store   │
//! └────────┬────────┘     │ (memory / file)  │
//!          │              └──────────────────┘
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Securities Feed │────▶│ HTTP Client      │
//! │ (MOEX ISS)      │     │ (reqwest/none)   │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ Screen Pipeline │
//! │ filter→rate→rank│
//! └─────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! The feed never errors outward: transport failures degrade to empty
//! data, and the engine decides what emptiness means:
//!
//! ```rust
//! use bondsift_core::ScreenError;
//!
//! fn explain(error: &ScreenError) -> String {
//!     format!("{} ({})", error.user_hint(), error.code())
//! }
//! ```

pub mod adapters;
pub mod detail;
pub mod domain;
pub mod engine;
pub mod error;
pub mod feed;
pub mod http_client;
pub mod retry;
pub mod screen;
pub mod session;
pub mod table;
pub mod view;

// Feed adapter
pub use adapters::{MoexIssFeed, DEFAULT_BOARD, DEFAULT_ISS_BASE_URL};

// Detail assembly
pub use detail::{assemble, BondDetail, ISSUER_NAME_CHARS, MAX_NEXT_COUPONS};

// Domain models
pub use domain::{
    CouponEvent, MarketDate, RankedBond, Rating, SecurityRecord, Ticker, UtcTimestamp,
};

// Screener façade
pub use engine::Screener;

// Error types
pub use error::{ScreenError, ValidationError};

// Feed contract
pub use feed::SecuritiesFeed;

// HTTP client types
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient,
};

// Retry policy
pub use retry::{Backoff, RetryConfig};

// Screening pipeline
pub use screen::{
    apply_filters, classify, enrich, payments_per_year, rank, ClassifierConfig, ClassifierRule,
    FilterRules, IssueFloor, SchemaTolerance, ScreenConfig, DEFAULT_SHORTLIST_LIMIT,
};

// Session stores
pub use session::{InMemorySnapshotStore, SnapshotStore, DEFAULT_SNAPSHOT_TTL};

// Normalization
pub use table::{normalize, Column, ColumnPresence, RawTable, SecurityBatch};

// Views
pub use view::{ShortlistRow, ShortlistView, SHORTLIST_NAME_CHARS};
