//! Detail assembly for one shortlisted bond.

use serde::{Deserialize, Serialize};

use crate::domain::{CouponEvent, MarketDate, RankedBond, Rating, Ticker};
use crate::view::truncate_name;

/// Character budget for the full issuer name.
pub const ISSUER_NAME_CHARS: usize = 50;

/// How many upcoming coupons a detail view shows.
pub const MAX_NEXT_COUPONS: usize = 3;

const DAYS_PER_YEAR: f64 = 365.0;

/// Everything a detail card shows about one bond.
///
/// Assembled read-only from a snapshot entry plus its coupon schedule;
/// `ticker`, `rating` and `coupon_percent` pass through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondDetail {
    pub ticker: Ticker,
    pub short_name: String,
    /// Full name truncated to [`ISSUER_NAME_CHARS`].
    pub issuer_name: String,
    pub rating: Rating,
    pub coupon_percent: Option<f64>,
    /// Cash amount of one coupon payment, `0.0` when not computable.
    pub coupon_value: f64,
    pub coupon_frequency: u32,
    pub coupon_period_days: Option<u32>,
    pub maturity_date: Option<MarketDate>,
    pub years_to_maturity: Option<f64>,
    pub issue_size: Option<f64>,
    /// Issue size with space-separated thousands groups.
    pub issue_size_display: String,
    pub face_value: f64,
    pub currency: String,
    /// Last close yield, falling back to the coupon percent.
    pub yield_close: Option<f64>,
    /// Strictly future coupons, ascending, at most [`MAX_NEXT_COUPONS`].
    pub next_coupons: Vec<CouponEvent>,
}

/// Assemble the detail card for one snapshot entry.
///
/// The coupon window is enforced here regardless of what the feed sent:
/// only dates strictly after `today` survive, sorted ascending, capped.
pub fn assemble(bond: &RankedBond, schedule: &[CouponEvent], today: MarketDate) -> BondDetail {
    let mut next_coupons: Vec<CouponEvent> = schedule
        .iter()
        .filter(|event| event.date > today)
        .cloned()
        .collect();
    next_coupons.sort_by_key(|event| event.date);
    next_coupons.truncate(MAX_NEXT_COUPONS);

    BondDetail {
        ticker: bond.ticker.clone(),
        short_name: bond.short_name.clone(),
        issuer_name: truncate_name(&bond.full_name, ISSUER_NAME_CHARS),
        rating: bond.rating,
        coupon_percent: bond.coupon_percent,
        coupon_value: coupon_value(bond),
        coupon_frequency: bond.coupon_frequency,
        coupon_period_days: bond.coupon_period_days,
        maturity_date: bond.maturity_date,
        years_to_maturity: bond.years_to_maturity,
        issue_size: bond.issue_size,
        issue_size_display: group_thousands(bond.issue_size),
        face_value: bond.face_value,
        currency: bond.currency.clone(),
        yield_close: bond.yield_close.or(bond.coupon_percent),
        next_coupons,
    }
}

/// One coupon payment in cash terms: `face * pct/100 * period/365`,
/// rounded to 2 decimals. Any missing or zero input makes the amount
/// non-computable, yielding `0.0`.
fn coupon_value(bond: &RankedBond) -> f64 {
    let face = bond.face_value;
    if face <= 0.0 {
        return 0.0;
    }
    let Some(percent) = bond.coupon_percent.filter(|p| *p > 0.0) else {
        return 0.0;
    };
    let Some(period) = bond.coupon_period_days.filter(|d| *d > 0) else {
        return 0.0;
    };

    let value = face * (percent / 100.0) * (f64::from(period) / DAYS_PER_YEAR);
    (value * 100.0).round() / 100.0
}

fn group_thousands(value: Option<f64>) -> String {
    let Some(value) = value else {
        return String::from("0");
    };

    let digits = (value.round().abs() as u64).to_string();
    let length = digits.len();
    let mut grouped = String::with_capacity(length + length / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (length - index) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> MarketDate {
        MarketDate::parse("2024-06-01").expect("valid date")
    }

    fn sovereign() -> RankedBond {
        RankedBond {
            ticker: Ticker::parse("SU26238RMFS4").expect("valid"),
            short_name: String::from("ОФЗ 26238"),
            full_name: String::from("Российская Федерация выпуск 26238"),
            rating: Rating::AaaSovereign,
            coupon_percent: Some(7.5),
            coupon_period_days: Some(182),
            coupon_frequency: 2,
            maturity_date: Some(MarketDate::parse("2041-05-15").expect("valid")),
            years_to_maturity: Some(16.9),
            issue_size: Some(5_000_000_000.0),
            face_value: 1000.0,
            currency: String::from("RUB"),
            listing_tier: Some(1),
            yield_close: Some(13.2),
        }
    }

    fn event(date: &str, amount: Option<f64>) -> CouponEvent {
        CouponEvent {
            date: MarketDate::parse(date).expect("valid date"),
            amount,
        }
    }

    #[test]
    fn coupon_cash_uses_the_period_formula() {
        let detail = assemble(&sovereign(), &[], today());
        // 1000 * 7.5% * 182/365
        assert_eq!(detail.coupon_value, 37.4);
    }

    #[test]
    fn coupon_cash_is_zero_when_any_input_is_missing() {
        let mut bond = sovereign();
        bond.coupon_percent = None;
        assert_eq!(assemble(&bond, &[], today()).coupon_value, 0.0);

        let mut bond = sovereign();
        bond.coupon_period_days = Some(0);
        assert_eq!(assemble(&bond, &[], today()).coupon_value, 0.0);

        let mut bond = sovereign();
        bond.face_value = 0.0;
        assert_eq!(assemble(&bond, &[], today()).coupon_value, 0.0);
    }

    #[test]
    fn issue_size_groups_thousands_with_spaces() {
        let detail = assemble(&sovereign(), &[], today());
        assert_eq!(detail.issue_size_display, "5 000 000 000");

        let mut bond = sovereign();
        bond.issue_size = Some(999.0);
        assert_eq!(assemble(&bond, &[], today()).issue_size_display, "999");

        bond.issue_size = None;
        assert_eq!(assemble(&bond, &[], today()).issue_size_display, "0");
    }

    #[test]
    fn issuer_name_is_cut_at_the_character_budget() {
        let mut bond = sovereign();
        bond.full_name = "и".repeat(60);

        let detail = assemble(&bond, &[], today());
        assert!(detail.issuer_name.ends_with("..."));
        assert_eq!(detail.issuer_name.chars().count(), ISSUER_NAME_CHARS + 3);
    }

    #[test]
    fn next_coupons_are_future_only_ascending_and_capped() {
        let schedule = [
            event("2025-05-21", Some(37.4)),
            event("2024-05-22", Some(37.4)), // already paid
            event("2024-06-01", Some(37.4)), // today is not future
            event("2026-05-20", None),
            event("2024-11-20", Some(37.4)),
            event("2025-11-19", Some(37.4)),
        ];

        let detail = assemble(&sovereign(), &schedule, today());

        let dates: Vec<String> = detail
            .next_coupons
            .iter()
            .map(|e| e.date.to_string())
            .collect();
        assert_eq!(dates, ["2024-11-20", "2025-05-21", "2025-11-19"]);
    }

    #[test]
    fn yield_close_falls_back_to_the_coupon() {
        let with_close = assemble(&sovereign(), &[], today());
        assert_eq!(with_close.yield_close, Some(13.2));

        let mut bond = sovereign();
        bond.yield_close = None;
        let fallback = assemble(&bond, &[], today());
        assert_eq!(fallback.yield_close, Some(7.5));
    }

    #[test]
    fn identity_fields_pass_through_unchanged() {
        let bond = sovereign();
        let detail = assemble(&bond, &[], today());

        assert_eq!(detail.ticker, bond.ticker);
        assert_eq!(detail.rating, bond.rating);
        assert_eq!(detail.coupon_percent, bond.coupon_percent);
        assert_eq!(detail.short_name, bond.short_name);
    }
}
