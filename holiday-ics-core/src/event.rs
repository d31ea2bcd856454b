//! All-day calendar events.

use chrono::{Days, NaiveDate};

/// Default domain appended to every event UID.
pub const DEFAULT_UID_DOMAIN: &str = "mycalendar";

/// One all-day entry in the generated calendar.
///
/// `end` is exclusive, always the day after `start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub summary: String,
    pub uid: String,
}

impl CalendarEvent {
    /// Build an all-day event for `date`.
    ///
    /// Returns `None` only when `date` is the last representable day and has
    /// no exclusive end.
    pub fn all_day(date: NaiveDate, label: &str, uid_domain: &str) -> Option<Self> {
        let end = date.checked_add_days(Days::new(1))?;
        Some(CalendarEvent {
            start: date,
            end,
            summary: label.to_string(),
            uid: event_uid(date, label, uid_domain),
        })
    }
}

/// UID for an event: compact date, label with spaces turned into
/// underscores, and the domain suffix.
///
/// Two events with the same date and label share a UID.
pub fn event_uid(date: NaiveDate, label: &str, uid_domain: &str) -> String {
    format!(
        "{}_{}@{}",
        date.format("%Y%m%d"),
        label.replace(' ', "_"),
        uid_domain
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn end_is_the_following_day() {
        let event = CalendarEvent::all_day(date(2024, 2, 14), "Valentine", "mycalendar").unwrap();
        assert_eq!(event.start, date(2024, 2, 14));
        assert_eq!(event.end, date(2024, 2, 15));
    }

    #[test]
    fn end_rolls_over_month_and_year() {
        let leap_day = CalendarEvent::all_day(date(2024, 2, 29), "x", "d").unwrap();
        assert_eq!(leap_day.end, date(2024, 3, 1));

        let new_years_eve = CalendarEvent::all_day(date(2024, 12, 31), "x", "d").unwrap();
        assert_eq!(new_years_eve.end, date(2025, 1, 1));
    }

    #[test]
    fn uid_replaces_spaces_and_appends_domain() {
        let event = CalendarEvent::all_day(date(2024, 10, 1), "🔴 休假", "mycalendar").unwrap();
        assert_eq!(event.uid, "20241001_🔴_休假@mycalendar");
        assert_eq!(event.summary, "🔴 休假");
    }

    #[test]
    fn same_date_and_label_share_uid() {
        let a = CalendarEvent::all_day(date(2024, 5, 1), "Labour Day", "d").unwrap();
        let b = CalendarEvent::all_day(date(2024, 5, 1), "Labour Day", "d").unwrap();
        assert_eq!(a.uid, b.uid);
    }

    #[test]
    fn last_representable_day_has_no_event() {
        assert!(CalendarEvent::all_day(NaiveDate::MAX, "x", "d").is_none());
    }
}
