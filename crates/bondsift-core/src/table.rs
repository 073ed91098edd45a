//! Raw listing table and the record normalizer.
//!
//! The ISS feed delivers tabular blocks as parallel arrays: a list of
//! column names plus rows of heterogeneous JSON cells. This module turns
//! that shape into typed [`SecurityRecord`]s without ever failing a row
//! over bad data: unparseable cells become absent fields, and only a row
//! with no usable ticker is dropped (counted, never raised).

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{MarketDate, SecurityRecord, Ticker};

/// Listing-table columns the screener understands, by exact ISS header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Secid,
    ShortName,
    SecName,
    IssueSize,
    CouponPercent,
    CouponPeriod,
    MatDate,
    ListLevel,
    FaceValue,
    Currency,
    YieldClose,
}

impl Column {
    /// Wire header name as it appears in the ISS `columns` array.
    pub const fn header(self) -> &'static str {
        match self {
            Self::Secid => "SECID",
            Self::ShortName => "SHORTNAME",
            Self::SecName => "SECNAME",
            Self::IssueSize => "ISSUESIZE",
            Self::CouponPercent => "COUPONPERCENT",
            Self::CouponPeriod => "COUPONPERIOD",
            Self::MatDate => "MATDATE",
            Self::ListLevel => "LISTLEVEL",
            Self::FaceValue => "FACEVALUE",
            Self::Currency => "CURRENCY",
            Self::YieldClose => "YIELDCLOSE",
        }
    }
}

/// Raw tabular payload: column headers plus rows of JSON cells.
///
/// Mirrors one ISS block (`{"columns": [...], "data": [[...]]}`), so an
/// adapter can deserialize a block straight into this type. Rows may be
/// ragged; cell access is bounds-checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    columns: Vec<String>,
    #[serde(rename = "data")]
    rows: Vec<Vec<Value>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn column_index(&self, column: Column) -> Option<usize> {
        let header = column.header();
        self.columns.iter().position(|name| name == header)
    }

    /// Append another block's columns to every row, used to merge the
    /// ISS `marketdata` block into the securities block. Caller must
    /// ensure the row counts match.
    pub(crate) fn merge_columns(&mut self, other: RawTable) {
        self.columns.extend(other.columns);
        for (row, extra) in self.rows.iter_mut().zip(other.rows) {
            row.extend(extra);
        }
    }
}

/// Which screener-relevant columns the fetched table actually carried.
///
/// Schema-tolerant filtering skips predicates whose column is absent
/// here instead of failing every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPresence {
    pub ticker: bool,
    pub short_name: bool,
    pub full_name: bool,
    pub issue_size: bool,
    pub coupon_percent: bool,
    pub coupon_period: bool,
    pub maturity: bool,
    pub listing_tier: bool,
    pub face_value: bool,
    pub currency: bool,
    pub yield_close: bool,
}

impl ColumnPresence {
    pub fn detect(table: &RawTable) -> Self {
        let has = |column| table.column_index(column).is_some();
        Self {
            ticker: has(Column::Secid),
            short_name: has(Column::ShortName),
            full_name: has(Column::SecName),
            issue_size: has(Column::IssueSize),
            coupon_percent: has(Column::CouponPercent),
            coupon_period: has(Column::CouponPeriod),
            maturity: has(Column::MatDate),
            listing_tier: has(Column::ListLevel),
            face_value: has(Column::FaceValue),
            currency: has(Column::Currency),
            yield_close: has(Column::YieldClose),
        }
    }

    pub const fn has(self, column: Column) -> bool {
        match column {
            Column::Secid => self.ticker,
            Column::ShortName => self.short_name,
            Column::SecName => self.full_name,
            Column::IssueSize => self.issue_size,
            Column::CouponPercent => self.coupon_percent,
            Column::CouponPeriod => self.coupon_period,
            Column::MatDate => self.maturity,
            Column::ListLevel => self.listing_tier,
            Column::FaceValue => self.face_value,
            Column::Currency => self.currency,
            Column::YieldClose => self.yield_close,
        }
    }

    /// Presence matrix for a complete listing table.
    pub const fn full() -> Self {
        Self {
            ticker: true,
            short_name: true,
            full_name: true,
            issue_size: true,
            coupon_percent: true,
            coupon_period: true,
            maturity: true,
            listing_tier: true,
            face_value: true,
            currency: true,
            yield_close: true,
        }
    }
}

/// Output of [`normalize`]: typed records plus the schema actually seen.
#[derive(Debug, Clone, PartialEq)]
pub struct SecurityBatch {
    pub records: Vec<SecurityRecord>,
    pub columns: ColumnPresence,
    /// Rows dropped because no usable ticker could be read.
    pub skipped_rows: usize,
}

/// Normalize a raw listing table into typed records.
///
/// Per-cell coercion rules:
/// - numbers may arrive as JSON numbers or numeric strings;
/// - dates must be `YYYY-MM-DD`; anything else (including the ISS
///   perpetual placeholder `0000-00-00`) normalizes to absent;
/// - missing name cells normalize to the empty string;
/// - a row without a parseable SECID is skipped and counted.
pub fn normalize(table: &RawTable) -> SecurityBatch {
    let columns = ColumnPresence::detect(table);

    let secid = table.column_index(Column::Secid);
    let short_name = table.column_index(Column::ShortName);
    let full_name = table.column_index(Column::SecName);
    let issue_size = table.column_index(Column::IssueSize);
    let coupon_percent = table.column_index(Column::CouponPercent);
    let coupon_period = table.column_index(Column::CouponPeriod);
    let maturity = table.column_index(Column::MatDate);
    let listing_tier = table.column_index(Column::ListLevel);
    let face_value = table.column_index(Column::FaceValue);
    let currency = table.column_index(Column::Currency);
    let yield_close = table.column_index(Column::YieldClose);

    let mut records = Vec::with_capacity(table.row_count());
    let mut skipped_rows = 0usize;

    for row in table.rows() {
        let ticker = cell(row, secid)
            .and_then(cell_text)
            .and_then(|raw| Ticker::parse(raw).ok());
        let Some(ticker) = ticker else {
            skipped_rows += 1;
            continue;
        };

        records.push(SecurityRecord {
            ticker,
            short_name: cell_text_or_empty(cell(row, short_name)),
            full_name: cell_text_or_empty(cell(row, full_name)),
            issue_size: cell(row, issue_size).and_then(cell_f64),
            coupon_percent: cell(row, coupon_percent).and_then(cell_f64),
            coupon_period_days: cell(row, coupon_period).and_then(cell_u32),
            maturity_date: cell(row, maturity)
                .and_then(cell_text)
                .and_then(|raw| MarketDate::parse(raw).ok()),
            listing_tier: cell(row, listing_tier).and_then(cell_u8),
            face_value: cell(row, face_value).and_then(cell_f64),
            currency: cell(row, currency)
                .and_then(cell_text)
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(str::to_owned),
            yield_close: cell(row, yield_close).and_then(cell_f64),
        });
    }

    if skipped_rows > 0 {
        debug!(
            "normalize: skipped {skipped_rows} of {} rows without a usable ticker",
            table.row_count()
        );
    }

    SecurityBatch {
        records,
        columns,
        skipped_rows,
    }
}

fn cell<'a>(row: &'a [Value], index: Option<usize>) -> Option<&'a Value> {
    index
        .and_then(|position| row.get(position))
        .filter(|value| !value.is_null())
}

fn cell_text(value: &Value) -> Option<&str> {
    value.as_str()
}

fn cell_text_or_empty(value: Option<&Value>) -> String {
    value
        .and_then(cell_text)
        .map(str::to_owned)
        .unwrap_or_default()
}

fn cell_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn cell_u32(value: &Value) -> Option<u32> {
    cell_f64(value).filter(|v| (0.0..(u32::MAX as f64)).contains(v)).map(|v| v as u32)
}

fn cell_u8(value: &Value) -> Option<u8> {
    cell_f64(value).filter(|v| (0.0..=(u8::MAX as f64)).contains(v)).map(|v| v as u8)
}
