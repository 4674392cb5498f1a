//! Business time zone helpers
//!
//! Orders carry UTC timestamps; the ledger's calendar dates live in the
//! configured business time zone. Day windows are half-open, callers use
//! `start <= ts < end` semantics.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::{CoreError, Result};

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| CoreError::validation(format!("Invalid date format: {}", date)))
}

/// Today's calendar date in the business time zone
pub fn today_in(tz: Tz) -> NaiveDate {
    chrono::Utc::now().with_timezone(&tz).date_naive()
}

/// Reject dates after today (business time zone)
pub fn validate_not_future(date: NaiveDate, tz: Tz) -> Result<()> {
    let today = today_in(tz);
    if date > today {
        return Err(CoreError::validation(format!(
            "Date {} is in the future (today is {})",
            date, today
        )));
    }
    Ok(())
}

/// Calendar date a UTC timestamp falls on in the business time zone
pub fn business_date_of(at: DateTime<Utc>, tz: Tz) -> NaiveDate {
    at.with_timezone(&tz).date_naive()
}

/// Local midnight of `date` as a UTC instant
///
/// DST gap fallback: if local midnight does not exist, fall back to the
/// naive timestamp read as UTC.
fn date_start_utc(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let naive = date.and_hms_opt(0, 0, 0).unwrap();
    naive
        .and_local_timezone(tz)
        .latest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc())
}

/// Half-open UTC window covering `date` in the business time zone
pub fn day_window_utc(date: NaiveDate, tz: Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    let next = date.succ_opt().unwrap_or(date);
    (date_start_utc(date, tz), date_start_utc(next, tz))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_date_valid() {
        assert_eq!(
            parse_date("2024-01-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_parse_date_invalid() {
        assert!(parse_date("01/01/2024").is_err());
        assert!(parse_date("2024-13-01").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_validate_not_future_rejects_tomorrow() {
        let tomorrow = today_in(Tz::UTC).succ_opt().unwrap();
        assert!(validate_not_future(tomorrow, Tz::UTC).is_err());
        assert!(validate_not_future(today_in(Tz::UTC), Tz::UTC).is_ok());
    }

    #[test]
    fn test_day_window_is_half_open_24h_in_utc() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let (start, end) = day_window_utc(date, Tz::UTC);
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 6, 16, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_day_window_respects_business_time_zone() {
        // Madrid is UTC+1 in winter: local midnight is 23:00 UTC the day before
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let (start, end) = day_window_utc(date, chrono_tz::Europe::Madrid);
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 1, 9, 23, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 1, 10, 23, 0, 0).unwrap());
    }

    #[test]
    fn test_business_date_shifts_near_midnight() {
        // 23:30 UTC on Jan 9 is already Jan 10 in Madrid
        let at = Utc.with_ymd_and_hms(2024, 1, 9, 23, 30, 0).unwrap();
        assert_eq!(
            business_date_of(at, chrono_tz::Europe::Madrid),
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
        );
        assert_eq!(
            business_date_of(at, Tz::UTC),
            NaiveDate::from_ymd_opt(2024, 1, 9).unwrap()
        );
    }
}
