//! The screening pipeline: filter, classify, estimate, rank.
//!
//! # Stages
//!
//! | Stage | Entry point | Notes |
//! |-------|------------|-------|
//! | Predicate filter | [`apply_filters`] | seven ordered reliability predicates |
//! | Rating heuristic | [`classify`] | issuer-name keywords, five tiers |
//! | Coupon frequency | [`payments_per_year`] | banded rounding of `365 / period` |
//! | Enrichment | [`enrich`] | computed fields plus schema defaults |
//! | Ranking | [`rank`] | stable sort, rating then coupon, truncated |
//!
//! Every stage is a pure function over owned data; the engine composes
//! them around the feed and session collaborators.

pub mod config;
pub mod filter;
pub mod frequency;
pub mod rank;
pub mod rating;

pub use config::{
    ClassifierConfig, ClassifierRule, FilterRules, IssueFloor, SchemaTolerance, ScreenConfig,
    DEFAULT_CURRENCY, DEFAULT_FACE_VALUE, DEFAULT_MIN_DAYS_TO_MATURITY, DEFAULT_SHORTLIST_LIMIT,
};
pub use filter::apply_filters;
pub use frequency::payments_per_year;
pub use rank::{enrich, rank};
pub use rating::classify;
