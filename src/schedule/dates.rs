//! Calendar-day arithmetic.
//!
//! Everything here works on `NaiveDate`, which carries no time of day and no
//! zone, so a DST switch or host locale can never move a date.

use chrono::{Datelike, Duration, NaiveDate};

/// Wire format for dates crossing the persistence boundary.
pub const ISO_FORMAT: &str = "%Y-%m-%d";

/// Shift `date` by `days` calendar days; negative moves backwards.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

/// Signed number of calendar days from `a` to `b`.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days()
}

/// Today's local calendar date.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse `YYYY-MM-DD`. An empty string means "unset".
pub fn parse_iso(s: &str) -> Result<Option<NaiveDate>, chrono::ParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(s, ISO_FORMAT).map(Some)
}

/// Inverse of [`parse_iso`]: unset dates become `""`.
pub fn format_iso(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(ISO_FORMAT).to_string())
        .unwrap_or_default()
}

/// Monday and Sunday of the week containing `date`.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let monday = add_days(date, -i64::from(date.weekday().num_days_from_monday()));
    (monday, add_days(monday, 6))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, ISO_FORMAT).unwrap()
    }

    #[test]
    fn add_days_crosses_dst_and_leap_boundaries() {
        // US and EU spring-forward weekends.
        assert_eq!(add_days(date("2024-03-09"), 1), date("2024-03-10"));
        assert_eq!(add_days(date("2024-03-31"), 1), date("2024-04-01"));
        assert_eq!(add_days(date("2024-02-28"), 1), date("2024-02-29"));
        assert_eq!(add_days(date("2023-02-28"), 1), date("2023-03-01"));
        assert_eq!(add_days(date("2025-01-01"), -1), date("2024-12-31"));
    }

    #[test]
    fn days_between_is_signed() {
        assert_eq!(days_between(date("2025-03-01"), date("2025-03-15")), 14);
        assert_eq!(days_between(date("2025-03-15"), date("2025-03-01")), -14);
        assert_eq!(days_between(date("2025-03-15"), date("2025-03-15")), 0);
    }

    #[test]
    fn iso_parsing_treats_blank_as_unset() {
        assert_eq!(parse_iso("").unwrap(), None);
        assert_eq!(parse_iso("  ").unwrap(), None);
        assert_eq!(parse_iso("2025-07-04").unwrap(), Some(date("2025-07-04")));
        assert!(parse_iso("07/04/2025").is_err());
        assert_eq!(format_iso(None), "");
        assert_eq!(format_iso(Some(date("2025-07-04"))), "2025-07-04");
    }

    #[test]
    fn week_bounds_run_monday_to_sunday() {
        // 2025-06-08 is a Sunday.
        assert_eq!(
            week_bounds(date("2025-06-08")),
            (date("2025-06-02"), date("2025-06-08"))
        );
        assert_eq!(
            week_bounds(date("2025-06-02")),
            (date("2025-06-02"), date("2025-06-08"))
        );
    }

    proptest! {
        #[test]
        fn add_then_measure_is_identity(offset in -20_000i64..20_000, n in -5_000i64..5_000) {
            let base = add_days(date("2000-01-01"), offset);
            prop_assert_eq!(days_between(base, add_days(base, n)), n);
        }

        #[test]
        fn days_between_is_antisymmetric(a in -20_000i64..20_000, b in -20_000i64..20_000) {
            let origin = date("2000-01-01");
            let (x, y) = (add_days(origin, a), add_days(origin, b));
            prop_assert_eq!(days_between(x, y), -days_between(y, x));
        }
    }
}
