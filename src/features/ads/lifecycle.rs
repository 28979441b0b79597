//! Ad expiry bookkeeping.
//!
//! Pure date arithmetic: whether an ad is still shown, when a new or edited ad
//! stops being shown, and how much time is left, in the wording used on the
//! Lithuanian dashboard.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Europe::Vilnius;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::DEFAULT_DURATION_MONTHS;

const MILLIS_PER_DAY: i64 = 86_400_000;
const EXPIRED_LABEL: &str = "Pasibaigusi";
const UNKNOWN_LABEL: &str = "-";

/// Anything carrying an optional expiry timestamp. `None` means perpetual.
pub trait HasValidity {
    fn valid_until(&self) -> Option<DateTime<Utc>>;
}

/// An ad is shown while it has no expiry or the expiry is still ahead.
pub fn is_ad_active<A: HasValidity + ?Sized>(ad: Option<&A>, now: DateTime<Utc>) -> bool {
    match ad {
        None => false,
        Some(ad) => match ad.valid_until() {
            None => true,
            Some(until) => until > now,
        },
    }
}

/// Parse a timestamp typed into an admin form.
///
/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM[:SS]` (taken as Vilnius wall-clock
/// time, which is what a datetime-local input sends) and a bare `YYYY-MM-DD`
/// (midnight UTC).
pub fn parse_date_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Vilnius
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc));
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[derive(Debug, Clone)]
pub struct ValidUntilInput<'a> {
    /// Expiry typed by the admin; wins when it parses
    pub explicit: Option<&'a str>,
    pub base_date: DateTime<Utc>,
    /// Requested duration; ignored unless positive
    pub months: Option<i32>,
    pub fallback_months: i32,
}

impl<'a> ValidUntilInput<'a> {
    pub fn new(base_date: DateTime<Utc>, months: Option<i32>) -> Self {
        Self {
            explicit: None,
            base_date,
            months,
            fallback_months: DEFAULT_DURATION_MONTHS,
        }
    }

    pub fn with_explicit(mut self, explicit: Option<&'a str>) -> Self {
        self.explicit = explicit;
        self
    }
}

/// Expiry for a new or edited ad.
///
/// An explicit, parseable date wins. Otherwise `months` (or the fallback) are
/// added to the base date. Returns `None` only when the result is not
/// representable.
pub fn compute_valid_until(input: ValidUntilInput<'_>) -> Option<DateTime<Utc>> {
    if let Some(explicit) = input.explicit.and_then(parse_date_time) {
        return Some(explicit);
    }

    let months = input
        .months
        .filter(|m| *m > 0)
        .unwrap_or(input.fallback_months);

    add_months_with_overflow(input.base_date, months)
}

/// Calendar month addition where a day missing from the target month spills
/// into the next one: Jan 31 + 1 month is Mar 3 (Mar 2 in leap years).
fn add_months_with_overflow(base: DateTime<Utc>, months: i32) -> Option<DateTime<Utc>> {
    let naive = base.naive_utc();
    let total = i64::from(naive.year()) * 12 + i64::from(naive.month0()) + i64::from(months);
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month0 = u32::try_from(total.rem_euclid(12)).ok()?;

    let first_of_month = NaiveDate::from_ymd_opt(year, month0 + 1, 1)?;
    let date = first_of_month.checked_add_signed(Duration::days(i64::from(naive.day()) - 1))?;

    Some(Utc.from_utc_datetime(&date.and_time(naive.time())))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RemainingTime {
    /// e.g. "1 m. 2 mėn. 5 d.", "Pasibaigusi" or "-"
    pub label: String,
    /// Whole days left, rounded down; negative once expired
    pub total_days: Option<i64>,
}

/// Time left until `valid_until`, using 365-day years and 30-day months.
pub fn remaining_time_info(valid_until: Option<DateTime<Utc>>, now: DateTime<Utc>) -> RemainingTime {
    let Some(valid_until) = valid_until else {
        return RemainingTime {
            label: UNKNOWN_LABEL.to_string(),
            total_days: None,
        };
    };

    let diff_ms = (valid_until - now).num_milliseconds();
    let total_days = diff_ms.div_euclid(MILLIS_PER_DAY);

    if diff_ms <= 0 {
        return RemainingTime {
            label: EXPIRED_LABEL.to_string(),
            total_days: Some(total_days),
        };
    }

    let years = total_days / 365;
    let months = (total_days % 365) / 30;
    let days = (total_days % 365) % 30;

    let mut parts = Vec::with_capacity(3);
    if years > 0 {
        parts.push(format!("{} m.", years));
    }
    if months > 0 {
        parts.push(format!("{} mėn.", months));
    }
    if days > 0 || parts.is_empty() {
        parts.push(format!("{} d.", days));
    }

    RemainingTime {
        label: parts.join(" "),
        total_days: Some(total_days),
    }
}

/// `YYYY-MM-DD` in Vilnius time, empty when absent
pub fn format_vilnius_date(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|v| v.with_timezone(&Vilnius).format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// `YYYY-MM-DD HH:MM` in Vilnius time, empty when absent
pub fn format_vilnius_date_time(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|v| v.with_timezone(&Vilnius).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture(Option<DateTime<Utc>>);

    impl HasValidity for Fixture {
        fn valid_until(&self) -> Option<DateTime<Utc>> {
            self.0
        }
    }

    fn utc(raw: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_missing_ad_is_inactive() {
        assert!(!is_ad_active::<Fixture>(None, Utc::now()));
    }

    #[test]
    fn test_perpetual_ad_is_active() {
        assert!(is_ad_active(Some(&Fixture(None)), Utc::now()));
    }

    #[test]
    fn test_expired_ad_is_inactive() {
        let ad = Fixture(Some(utc("2024-01-01T00:00:00Z")));
        assert!(!is_ad_active(Some(&ad), utc("2025-01-01T00:00:00Z")));
    }

    #[test]
    fn test_expiry_boundary_is_inactive() {
        let now = utc("2025-06-01T12:00:00Z");
        assert!(!is_ad_active(Some(&Fixture(Some(now))), now));
        assert!(is_ad_active(
            Some(&Fixture(Some(now + Duration::seconds(1)))),
            now
        ));
    }

    #[test]
    fn test_compute_adds_calendar_months() {
        let base = utc("2025-01-15T10:30:00Z");
        let result = compute_valid_until(ValidUntilInput::new(base, Some(3)));
        assert_eq!(result, Some(utc("2025-04-15T10:30:00Z")));

        let result = compute_valid_until(ValidUntilInput::new(base, Some(12)));
        assert_eq!(result, Some(utc("2026-01-15T10:30:00Z")));
    }

    #[test]
    fn test_compute_month_overflow_rolls_forward() {
        let result = compute_valid_until(ValidUntilInput::new(utc("2025-01-31T00:00:00Z"), Some(1)));
        assert_eq!(result, Some(utc("2025-03-03T00:00:00Z")));

        let result = compute_valid_until(ValidUntilInput::new(utc("2024-01-31T00:00:00Z"), Some(1)));
        assert_eq!(result, Some(utc("2024-03-02T00:00:00Z")));
    }

    #[test]
    fn test_compute_falls_back_for_non_positive_months() {
        let base = utc("2025-05-01T00:00:00Z");
        let expected = Some(utc("2026-05-01T00:00:00Z"));
        assert_eq!(compute_valid_until(ValidUntilInput::new(base, None)), expected);
        assert_eq!(compute_valid_until(ValidUntilInput::new(base, Some(0))), expected);
        assert_eq!(compute_valid_until(ValidUntilInput::new(base, Some(-3))), expected);
    }

    #[test]
    fn test_compute_prefers_explicit_date() {
        let base = utc("2025-05-01T00:00:00Z");
        let input = ValidUntilInput::new(base, Some(6)).with_explicit(Some("2025-12-24T00:00:00Z"));
        assert_eq!(compute_valid_until(input), Some(utc("2025-12-24T00:00:00Z")));
    }

    #[test]
    fn test_compute_ignores_unparseable_explicit_date() {
        let base = utc("2025-05-01T00:00:00Z");
        let input = ValidUntilInput::new(base, Some(6)).with_explicit(Some("kitą savaitę"));
        assert_eq!(compute_valid_until(input), Some(utc("2025-11-01T00:00:00Z")));
    }

    #[test]
    fn test_parse_date_time_formats() {
        assert_eq!(
            parse_date_time("2025-03-10"),
            Some(utc("2025-03-10T00:00:00Z"))
        );
        // Vilnius is UTC+2 in winter, UTC+3 in summer
        assert_eq!(
            parse_date_time("2025-01-10T12:00"),
            Some(utc("2025-01-10T10:00:00Z"))
        );
        assert_eq!(
            parse_date_time("2025-07-10T12:00"),
            Some(utc("2025-07-10T09:00:00Z"))
        );
        assert_eq!(parse_date_time("   "), None);
        assert_eq!(parse_date_time("2025-13-40"), None);
    }

    #[test]
    fn test_remaining_time_composite_label() {
        let now = utc("2025-01-01T00:00:00Z");
        let info = remaining_time_info(Some(now + Duration::days(400)), now);
        assert_eq!(info.label, "1 m. 1 mėn. 5 d.");
        assert_eq!(info.total_days, Some(400));
    }

    #[test]
    fn test_remaining_time_partial_day() {
        let now = utc("2025-01-01T00:00:00Z");
        let info = remaining_time_info(Some(now + Duration::hours(5)), now);
        assert_eq!(info.label, "0 d.");
        assert_eq!(info.total_days, Some(0));

        let info = remaining_time_info(Some(now + Duration::days(60)), now);
        assert_eq!(info.label, "2 mėn.");
    }

    #[test]
    fn test_remaining_time_expired_and_missing() {
        let now = utc("2025-01-01T00:00:00Z");
        let info = remaining_time_info(Some(now - Duration::hours(36)), now);
        assert_eq!(info.label, "Pasibaigusi");
        assert_eq!(info.total_days, Some(-2));

        let info = remaining_time_info(None, now);
        assert_eq!(info.label, "-");
        assert_eq!(info.total_days, None);
    }

    #[test]
    fn test_vilnius_formatting() {
        let value = Some(utc("2025-06-30T22:30:00Z"));
        assert_eq!(format_vilnius_date(value), "2025-07-01");
        assert_eq!(format_vilnius_date_time(value), "2025-07-01 01:30");
        assert_eq!(format_vilnius_date(None), "");
    }
}
