use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime};

use crate::ValidationError;

const ISO_DATE: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Calendar date in the exchange's `YYYY-MM-DD` wire form.
///
/// The ISS feed marks perpetual bonds with the placeholder `0000-00-00`,
/// which fails to parse here; the normalizer maps that to an absent date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarketDate(Date);

impl MarketDate {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Date::parse(input, ISO_DATE)
            .map(Self)
            .map_err(|_| ValidationError::InvalidDate {
                value: input.to_owned(),
            })
    }

    pub const fn from_date(date: Date) -> Self {
        Self(date)
    }

    /// Current UTC calendar date.
    pub fn today_utc() -> Self {
        Self(OffsetDateTime::now_utc().date())
    }

    pub const fn into_inner(self) -> Date {
        self.0
    }

    /// Date `days` after this one. Saturates at the calendar bounds.
    pub fn plus_days(self, days: i64) -> Self {
        self.0
            .checked_add(Duration::days(days))
            .map(Self)
            .unwrap_or(self)
    }

    /// Whole days from this date until `other` (negative when `other` is past).
    pub fn days_until(self, other: Self) -> i64 {
        (other.0 - self.0).whole_days()
    }

    pub fn format_iso(self) -> String {
        self.0
            .format(ISO_DATE)
            .expect("MarketDate must be ISO formattable")
    }
}

impl Display for MarketDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_iso())
    }
}

impl Serialize for MarketDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_iso())
    }
}

impl<'de> Deserialize<'de> for MarketDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_date() {
        let parsed = MarketDate::parse("2031-05-15").expect("must parse");
        assert_eq!(parsed.format_iso(), "2031-05-15");
    }

    #[test]
    fn rejects_perpetual_placeholder() {
        let err = MarketDate::parse("0000-00-00").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidDate { .. }));
    }

    #[test]
    fn rejects_non_iso_forms() {
        assert!(MarketDate::parse("15.05.2031").is_err());
        assert!(MarketDate::parse("2031/05/15").is_err());
        assert!(MarketDate::parse("").is_err());
    }

    #[test]
    fn day_arithmetic_is_consistent() {
        let base = MarketDate::parse("2030-01-01").expect("must parse");
        let later = base.plus_days(30);
        assert_eq!(later.format_iso(), "2030-01-31");
        assert_eq!(base.days_until(later), 30);
        assert_eq!(later.days_until(base), -30);
    }

    #[test]
    fn dates_order_chronologically() {
        let earlier = MarketDate::parse("2030-01-01").expect("must parse");
        let later = MarketDate::parse("2030-06-01").expect("must parse");
        assert!(earlier < later);
    }
}
