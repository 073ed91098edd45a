use thiserror::Error;

/// Validation and contract errors exposed by `bondsift-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("ticker cannot be empty")]
    EmptyTicker,
    #[error("ticker length {len} exceeds max {max}")]
    TickerTooLong { len: usize, max: usize },
    #[error("ticker contains invalid character '{ch}' at index {index}")]
    TickerInvalidChar { ch: char, index: usize },

    #[error("date must be YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },
    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },
}

/// Screening pipeline outcomes that the caller must surface to the user.
///
/// | Variant | Meaning | Suggested user action |
/// |---------|---------|-----------------------|
/// | [`SourceUnavailable`](Self::SourceUnavailable) | Feed returned no usable records | Try again later |
/// | [`NoMatchingRecords`](Self::NoMatchingRecords) | Filters legitimately emptied the set | Relax the criteria |
/// | [`StaleSnapshot`](Self::StaleSnapshot) | No shortlist stored for the session | Run a fresh screen |
/// | [`RecordNotFound`](Self::RecordNotFound) | Ticker absent from the stored shortlist | Run a fresh screen |
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScreenError {
    #[error("market data source returned no usable records")]
    SourceUnavailable,
    #[error("no bonds passed the reliability filters")]
    NoMatchingRecords,
    #[error("no stored shortlist for session '{session}'")]
    StaleSnapshot { session: String },
    #[error("ticker '{ticker}' is not in the current shortlist")]
    RecordNotFound { ticker: String },
}

impl ScreenError {
    /// No stored shortlist for `session`.
    pub fn stale_snapshot(session: impl Into<String>) -> Self {
        Self::StaleSnapshot {
            session: session.into(),
        }
    }

    /// `ticker` absent from the stored shortlist.
    pub fn record_not_found(ticker: impl Into<String>) -> Self {
        Self::RecordNotFound {
            ticker: ticker.into(),
        }
    }

    /// Stable machine-readable code for logs and structured output.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::SourceUnavailable => "screen.source_unavailable",
            Self::NoMatchingRecords => "screen.no_matching_records",
            Self::StaleSnapshot { .. } => "screen.stale_snapshot",
            Self::RecordNotFound { .. } => "screen.record_not_found",
        }
    }

    /// One-line recovery hint suitable for end users.
    pub const fn user_hint(&self) -> &'static str {
        match self {
            Self::SourceUnavailable => "the exchange feed did not respond; try again later",
            Self::NoMatchingRecords => {
                "no bonds meet the reliability criteria; try a broader issue-size floor"
            }
            Self::StaleSnapshot { .. } => "the shortlist has expired; run 'screen' again",
            Self::RecordNotFound { .. } => {
                "that ticker is not in the current shortlist; run 'screen' again"
            }
        }
    }
}
