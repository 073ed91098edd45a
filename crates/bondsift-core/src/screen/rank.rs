//! Enrichment and deterministic ranking of screened records.

use std::cmp::Ordering;

use crate::domain::{MarketDate, RankedBond, SecurityRecord};
use crate::screen::config::ScreenConfig;
use crate::screen::frequency::payments_per_year;
use crate::screen::rating::classify;

const DAYS_PER_CIVIL_YEAR: f64 = 365.25;

/// Attach computed fields and schema defaults to filtered records.
///
/// Rating, coupon frequency and one-decimal years-to-maturity are
/// computed exactly once here; ranking and views only read them.
pub fn enrich(
    records: Vec<SecurityRecord>,
    config: &ScreenConfig,
    today: MarketDate,
) -> Vec<RankedBond> {
    records
        .into_iter()
        .map(|record| enrich_one(record, config, today))
        .collect()
}

fn enrich_one(record: SecurityRecord, config: &ScreenConfig, today: MarketDate) -> RankedBond {
    let rating = classify(&record.short_name, &record.full_name, &config.classifier);
    let coupon_frequency = payments_per_year(record.coupon_period_days);
    let years_to_maturity = record
        .maturity_date
        .map(|date| round_one_decimal(today.days_until(date) as f64 / DAYS_PER_CIVIL_YEAR));

    RankedBond {
        ticker: record.ticker,
        short_name: record.short_name,
        full_name: record.full_name,
        rating,
        coupon_percent: record.coupon_percent,
        coupon_period_days: record.coupon_period_days,
        coupon_frequency,
        maturity_date: record.maturity_date,
        years_to_maturity,
        issue_size: record.issue_size,
        face_value: record.face_value.unwrap_or(config.default_face_value),
        currency: record
            .currency
            .unwrap_or_else(|| config.default_currency.clone()),
        listing_tier: record.listing_tier,
        yield_close: record.yield_close,
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Sort by reliability then coupon, keep the top `limit`.
///
/// Stable sort: primary key rating ascending (sovereign first),
/// secondary coupon percent descending with absent coupons last within
/// a tier; remaining ties keep their pre-sort order.
pub fn rank(mut bonds: Vec<RankedBond>, limit: usize) -> Vec<RankedBond> {
    bonds.sort_by(|a, b| {
        a.rating
            .cmp(&b.rating)
            .then_with(|| coupon_descending(a.coupon_percent, b.coupon_percent))
    });
    bonds.truncate(limit);
    bonds
}

fn coupon_descending(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(left), Some(right)) => right.partial_cmp(&left).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
