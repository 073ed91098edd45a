//! Predicate filter chain over normalized records.
//!
//! Seven predicates applied in a fixed order, each a pure set
//! intersection that preserves the incoming record order. Under
//! [`SchemaTolerance::Tolerant`] a predicate whose backing column the
//! feed never delivered is skipped instead of wiping the set.

use log::debug;

use crate::domain::{MarketDate, SecurityRecord};
use crate::screen::config::{FilterRules, SchemaTolerance};
use crate::table::{Column, ColumnPresence};

/// Run the reliability predicates over `records`.
///
/// Predicate order: listing tier, currency, positive coupon, maturity
/// horizon, offer markers, amortization markers, issue floor. A record
/// whose needed field is absent fails the predicate under strict rules;
/// name predicates treat an absent name as the empty string, which never
/// matches a marker.
pub fn apply_filters(
    mut records: Vec<SecurityRecord>,
    columns: &ColumnPresence,
    rules: &FilterRules,
    today: MarketDate,
) -> Vec<SecurityRecord> {
    let applies = |column: Column| match rules.tolerance {
        SchemaTolerance::Strict => true,
        SchemaTolerance::Tolerant => columns.has(column),
    };

    let before = records.len();

    if applies(Column::ListLevel) {
        records.retain(|record| record.listing_tier == Some(rules.required_listing_tier));
    }

    if applies(Column::Currency) {
        records
            .retain(|record| record.currency.as_deref() == Some(rules.required_currency.as_str()));
    }

    if applies(Column::CouponPercent) {
        records.retain(|record| record.coupon_percent.is_some_and(|pct| pct > 0.0));
    }

    if applies(Column::MatDate) {
        let horizon = today.plus_days(rules.min_days_to_maturity);
        records.retain(|record| record.maturity_date.is_some_and(|date| date > horizon));
    }

    if applies(Column::SecName) {
        records.retain(|record| !name_contains_any(&record.full_name, &rules.offer_markers));
        records
            .retain(|record| !name_contains_any(&record.full_name, &rules.amortization_markers));
    }

    if applies(Column::IssueSize) {
        let floor = rules.issue_floor.min_issue_size();
        records.retain(|record| record.issue_size.is_some_and(|size| size >= floor));
    }

    debug!("filter: kept {} of {before} records", records.len());

    records
}

fn name_contains_any(name: &str, markers: &[String]) -> bool {
    let lowered = name.to_lowercase();
    markers.iter().any(|marker| lowered.contains(marker.as_str()))
}
