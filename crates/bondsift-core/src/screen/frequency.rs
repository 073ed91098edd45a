//! Coupon payment frequency estimator.

const DAYS_PER_YEAR: f64 = 365.0;

/// Estimate coupon payments per year from the period in days.
///
/// Periods jitter around calendar-aligned values (182 vs 183 days), so
/// the raw `365 / period` ratio is snapped to the standard annual,
/// semi-annual and quarterly frequencies before falling back to plain
/// rounding. Absent or zero periods estimate to 0.
pub fn payments_per_year(coupon_period_days: Option<u32>) -> u32 {
    let Some(period) = coupon_period_days.filter(|days| *days > 0) else {
        return 0;
    };

    let raw = DAYS_PER_YEAR / f64::from(period);

    if raw < 1.5 {
        1
    } else if raw < 2.5 {
        2
    } else if raw < 4.0 {
        4
    } else {
        raw.round() as u32
    }
}
