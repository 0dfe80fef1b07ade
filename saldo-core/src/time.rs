//! Calendar helpers: local day keys and relative day labels.

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;

/// Default zone for deriving calendar days when none is configured.
pub const DEFAULT_TZ: Tz = chrono_tz::America::Sao_Paulo;

/// Calendar day of `instant` in `tz`. Grouping keys come from here, never
/// from the raw UTC date.
pub fn local_day(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Today's calendar day in `tz`.
pub fn today(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

/// Relative display label for a day group.
///
/// Same day -> "Today"; one day back -> "Yesterday"; within the trailing
/// 7-day window -> weekday name; anything else -> short `DD/MM` date.
/// Pure in both arguments so callers re-evaluate it per render.
pub fn day_label(day: NaiveDate, today: NaiveDate) -> String {
    match (today - day).num_days() {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => weekday_name(day.weekday()).to_string(),
        _ => format!("{:02}/{:02}", day.day(), day.month()),
    }
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_today_label_for_any_reference_day() {
        for day in [date(2023, 7, 19), date(2024, 2, 29), date(2026, 1, 1)] {
            assert_eq!(day_label(day, day), "Today");
        }
    }

    #[test]
    fn test_yesterday_and_weekday_window() {
        let today = date(2023, 7, 19); // a Wednesday
        assert_eq!(day_label(date(2023, 7, 18), today), "Yesterday");
        assert_eq!(day_label(date(2023, 7, 17), today), "Monday");
        assert_eq!(day_label(date(2023, 7, 13), today), "Thursday");
    }

    #[test]
    fn test_older_days_use_short_date() {
        let today = date(2023, 7, 19);
        // Exactly 7 days back falls out of the weekday window.
        assert_eq!(day_label(date(2023, 7, 12), today), "12/07");
        assert_eq!(day_label(date(2023, 1, 3), today), "03/01");
    }

    #[test]
    fn test_future_days_use_short_date() {
        let today = date(2023, 7, 19);
        assert_eq!(day_label(date(2023, 7, 20), today), "20/07");
    }

    #[test]
    fn test_local_day_crosses_midnight() {
        // 01:30 UTC is still the previous evening in São Paulo (UTC-3).
        let instant = Utc.with_ymd_and_hms(2023, 7, 20, 1, 30, 0).unwrap();
        assert_eq!(local_day(instant, DEFAULT_TZ), date(2023, 7, 19));
    }
}
