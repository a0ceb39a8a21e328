//! Timestamp-derived names for captured files.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};

/// Builds a `YYYY-MM-DD-HHMMSS`-shaped name from a capture instant.
///
/// Date and hour come from the instant's own time zone while the minute
/// pair comes from its UTC view, and the final pair is the first two
/// digits of the zero-padded millisecond value rather than seconds.
pub fn date_like_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String {
    let utc_minute = now.with_timezone(&Utc).minute();
    let millis = now.timestamp_subsec_millis().min(999);
    let millis = format!("{millis:02}");

    format!(
        "{}-{:02}-{:02}-{:02}{:02}{}",
        now.year(),
        now.month(),
        now.day(),
        now.hour(),
        utc_minute,
        &millis[..2]
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate};
    use proptest::prelude::*;

    fn utc(h: u32, m: u32, s: u32, ms: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_milli_opt(h, m, s, ms)
            .unwrap()
            .and_utc()
    }

    #[test]
    fn test_zero_padded_components() {
        assert_eq!(date_like_name(&utc(9, 5, 59, 7)), "2024-03-07-090507");
    }

    #[test]
    fn test_trailing_pair_from_milliseconds() {
        // Seconds are ignored; 123 ms contributes "12".
        assert_eq!(date_like_name(&utc(14, 30, 1, 123)), "2024-03-07-143012");
        assert_eq!(date_like_name(&utc(14, 30, 1, 50)), "2024-03-07-143050");
    }

    #[test]
    fn test_minutes_follow_utc() {
        let offset = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();
        let local = utc(10, 0, 0, 0).with_timezone(&offset);
        // Local 15:30, UTC minute 00.
        assert_eq!(date_like_name(&local), "2024-03-07-150000");
    }

    proptest! {
        #[test]
        fn prop_name_shape(h in 0u32..24, m in 0u32..60, s in 0u32..60, ms in 0u32..1000) {
            let name = date_like_name(&utc(h, m, s, ms));
            prop_assert_eq!(name.len(), 17);
            prop_assert!(name.starts_with("2024-03-07-"));
            prop_assert!(name[11..].chars().all(|c| c.is_ascii_digit()));
        }
    }
}
