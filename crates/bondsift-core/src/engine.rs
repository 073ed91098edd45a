//! The screener engine: one façade over feed, pipeline and sessions.
//!
//! Holds no state of its own; every refresh derives the shortlist from a
//! fresh fetch and hands the snapshot to the session store. `current` and
//! `details` work purely off the stored snapshot, so a "back" action or a
//! detail card never re-screens the market.

use std::sync::Arc;

use log::{debug, info};

use crate::detail::{assemble, BondDetail};
use crate::domain::{MarketDate, Ticker};
use crate::error::ScreenError;
use crate::feed::SecuritiesFeed;
use crate::screen::{apply_filters, enrich, rank, ScreenConfig};
use crate::session::SnapshotStore;
use crate::table::normalize;
use crate::view::ShortlistView;

/// Orchestrates fetch → normalize → filter → enrich → rank → store.
#[derive(Clone)]
pub struct Screener {
    feed: Arc<dyn SecuritiesFeed>,
    sessions: Arc<dyn SnapshotStore>,
    config: ScreenConfig,
}

impl Screener {
    pub fn new(feed: Arc<dyn SecuritiesFeed>, sessions: Arc<dyn SnapshotStore>) -> Self {
        Self::with_config(feed, sessions, ScreenConfig::default())
    }

    pub fn with_config(
        feed: Arc<dyn SecuritiesFeed>,
        sessions: Arc<dyn SnapshotStore>,
        config: ScreenConfig,
    ) -> Self {
        Self {
            feed,
            sessions,
            config,
        }
    }

    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    /// Run a full screen and replace the session's snapshot.
    ///
    /// # Errors
    ///
    /// - [`ScreenError::SourceUnavailable`] when the fetch yields no
    ///   usable records (the snapshot is left untouched);
    /// - [`ScreenError::NoMatchingRecords`] when the filters legitimately
    ///   empty the set (likewise nothing is stored).
    pub async fn refresh(&self, session_key: &str) -> Result<ShortlistView, ScreenError> {
        let table = self.feed.fetch_securities().await;
        let batch = normalize(&table);
        if batch.records.is_empty() {
            return Err(ScreenError::SourceUnavailable);
        }

        let today = MarketDate::today_utc();
        let candidates = batch.records.len();
        let filtered = apply_filters(batch.records, &batch.columns, &self.config.rules, today);
        if filtered.is_empty() {
            debug!("screen: all {candidates} candidates failed the filters");
            return Err(ScreenError::NoMatchingRecords);
        }

        let shortlist = rank(enrich(filtered, &self.config, today), self.config.limit);
        info!(
            "screen: session {session_key} shortlisted {} of {candidates} bonds",
            shortlist.len()
        );

        let view = ShortlistView::from_snapshot(&shortlist);
        self.sessions.store(session_key, shortlist).await;

        Ok(view)
    }

    /// Re-render the stored shortlist without re-fetching.
    ///
    /// # Errors
    ///
    /// [`ScreenError::StaleSnapshot`] when the session has no stored
    /// shortlist (never screened, expired, or explicitly dropped).
    pub async fn current(&self, session_key: &str) -> Result<ShortlistView, ScreenError> {
        let snapshot = self
            .sessions
            .load(session_key)
            .await
            .ok_or_else(|| ScreenError::stale_snapshot(session_key))?;

        Ok(ShortlistView::from_snapshot(&snapshot))
    }

    /// Assemble the detail card for one shortlisted bond.
    ///
    /// The coupon schedule fetch honors the degraded feed contract: a
    /// failure shortens the card (no upcoming coupons) instead of
    /// failing it.
    ///
    /// # Errors
    ///
    /// - [`ScreenError::StaleSnapshot`] when the session has no snapshot;
    /// - [`ScreenError::RecordNotFound`] when `ticker` is not in it.
    pub async fn details(
        &self,
        session_key: &str,
        ticker: &Ticker,
    ) -> Result<BondDetail, ScreenError> {
        let snapshot = self
            .sessions
            .load(session_key)
            .await
            .ok_or_else(|| ScreenError::stale_snapshot(session_key))?;

        let bond = snapshot
            .iter()
            .find(|bond| &bond.ticker == ticker)
            .ok_or_else(|| ScreenError::record_not_found(ticker.as_str()))?;

        let schedule = self.feed.fetch_coupon_schedule(ticker).await;

        Ok(assemble(bond, &schedule, MarketDate::today_utc()))
    }
}
