// Test library shared by the engine behavior suites.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use serde_json::{json, Value};

pub use std::sync::Arc;

pub use bondsift_core::{
    BondDetail, CouponEvent, InMemorySnapshotStore, MarketDate, RankedBond, Rating, RawTable,
    ScreenConfig, ScreenError, Screener, SecuritiesFeed, ShortlistView, SnapshotStore, Ticker,
};

/// Listing-table columns in the order [`bond_table`] emits cells.
pub const LISTING_COLUMNS: [&str; 11] = [
    "SECID",
    "SHORTNAME",
    "SECNAME",
    "ISSUESIZE",
    "COUPONPERCENT",
    "COUPONPERIOD",
    "MATDATE",
    "LISTLEVEL",
    "FACEVALUE",
    "CURRENCY",
    "YIELDCLOSE",
];

/// One listing row; [`BondRow::eligible`] defaults to a bond that
/// survives every filter of the conservative screen.
#[derive(Debug, Clone)]
pub struct BondRow {
    pub ticker: String,
    pub short_name: String,
    pub full_name: String,
    pub issue_size: Option<f64>,
    pub coupon_percent: Option<f64>,
    pub coupon_period: Option<u32>,
    pub maturity: Option<String>,
    pub listing_tier: Option<u8>,
    pub face_value: Option<f64>,
    pub currency: Option<String>,
    pub yield_close: Option<f64>,
}

impl BondRow {
    /// A sovereign issue that passes the conservative screen unchanged:
    /// tier 1, RUB, 7.5% coupon every 182 days, matures in 400 days,
    /// 5 billion issued.
    pub fn eligible(ticker: &str) -> Self {
        Self {
            ticker: String::from(ticker),
            short_name: String::from("ОФЗ 26238"),
            full_name: String::from("Российская Федерация выпуск 26238"),
            issue_size: Some(5_000_000_000.0),
            coupon_percent: Some(7.5),
            coupon_period: Some(182),
            maturity: Some(MarketDate::today_utc().plus_days(400).format_iso()),
            listing_tier: Some(1),
            face_value: Some(1000.0),
            currency: Some(String::from("RUB")),
            yield_close: Some(13.2),
        }
    }

    pub fn named(mut self, short_name: &str, full_name: &str) -> Self {
        self.short_name = String::from(short_name);
        self.full_name = String::from(full_name);
        self
    }

    pub fn with_coupon(mut self, percent: Option<f64>) -> Self {
        self.coupon_percent = percent;
        self
    }

    fn cells(&self) -> Vec<Value> {
        vec![
            json!(self.ticker),
            json!(self.short_name),
            json!(self.full_name),
            opt_cell(self.issue_size),
            opt_cell(self.coupon_percent),
            self.coupon_period.map_or(Value::Null, |v| json!(v)),
            self.maturity.as_deref().map_or(Value::Null, |v| json!(v)),
            self.listing_tier.map_or(Value::Null, |v| json!(v)),
            opt_cell(self.face_value),
            self.currency.as_deref().map_or(Value::Null, |v| json!(v)),
            opt_cell(self.yield_close),
        ]
    }
}

fn opt_cell(value: Option<f64>) -> Value {
    value.map_or(Value::Null, |v| json!(v))
}

/// Build a listing table out of rows, matching the ISS block shape.
pub fn bond_table(rows: &[BondRow]) -> RawTable {
    RawTable::new(
        LISTING_COLUMNS.iter().map(|c| String::from(*c)).collect(),
        rows.iter().map(BondRow::cells).collect(),
    )
}

/// A coupon event `days` from today.
pub fn coupon_in(days: i64, amount: Option<f64>) -> CouponEvent {
    CouponEvent {
        date: MarketDate::today_utc().plus_days(days),
        amount,
    }
}

/// Deterministic feed double: a fixed listing table plus per-ticker
/// coupon schedules.
pub struct ScriptedFeed {
    securities: RawTable,
    coupons: HashMap<String, Vec<CouponEvent>>,
}

impl ScriptedFeed {
    pub fn listing(rows: &[BondRow]) -> Self {
        Self {
            securities: bond_table(rows),
            coupons: HashMap::new(),
        }
    }

    /// A feed whose upstream yielded nothing, as after a failed fetch.
    pub fn empty() -> Self {
        Self {
            securities: RawTable::empty(),
            coupons: HashMap::new(),
        }
    }

    pub fn with_coupons(mut self, ticker: &str, events: Vec<CouponEvent>) -> Self {
        self.coupons.insert(String::from(ticker), events);
        self
    }
}

impl SecuritiesFeed for ScriptedFeed {
    fn fetch_securities<'a>(&'a self) -> Pin<Box<dyn Future<Output = RawTable> + Send + 'a>> {
        Box::pin(async move { self.securities.clone() })
    }

    fn fetch_coupon_schedule<'a>(
        &'a self,
        ticker: &'a Ticker,
    ) -> Pin<Box<dyn Future<Output = Vec<CouponEvent>> + Send + 'a>> {
        Box::pin(async move {
            self.coupons
                .get(ticker.as_str())
                .cloned()
                .unwrap_or_default()
        })
    }
}

/// Engine wired to a scripted feed and a fresh in-memory store.
pub fn screener_over(feed: ScriptedFeed) -> Screener {
    Screener::new(Arc::new(feed), Arc::new(InMemorySnapshotStore::new()))
}

/// Same, but sharing the caller's store for cross-refresh assertions.
pub fn screener_with_store(feed: ScriptedFeed, store: Arc<InMemorySnapshotStore>) -> Screener {
    Screener::new(Arc::new(feed), store)
}
