//! Lunar (Chinese lunisolar) to solar date conversion.

use std::ops::RangeInclusive;

use chrono::NaiveDate;
use icu_calendar::Date;
use icu_calendar::cal::Chinese;
use icu_calendar::types::MonthCode;
use tinystr::TinyAsciiStr;

use crate::error::{HolidayIcsError, HolidayIcsResult};

/// Lunar years the converter accepts. ICU's Chinese calendar panics instead
/// of erroring for years far outside its data, so anything else is refused
/// up front.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1900..=2100;

/// Converts a Chinese calendar date to its Gregorian equivalent.
///
/// `year` is the Gregorian year in which the lunar year begins, `month` is
/// the month number (1-12) and `leap` selects the intercalary month of that
/// number.
pub trait LunarConverter {
    fn to_solar(&self, year: i32, month: u8, day: u8, leap: bool) -> HolidayIcsResult<NaiveDate>;
}

/// [`LunarConverter`] backed by ICU4X's Chinese calendar with its baked
/// astronomical data.
#[derive(Debug, Clone)]
pub struct IcuLunarConverter {
    calendar: Chinese,
}

impl IcuLunarConverter {
    pub fn new() -> Self {
        IcuLunarConverter {
            calendar: Chinese::new(),
        }
    }
}

impl Default for IcuLunarConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl LunarConverter for IcuLunarConverter {
    fn to_solar(&self, year: i32, month: u8, day: u8, leap: bool) -> HolidayIcsResult<NaiveDate> {
        let conversion_error = |reason: String| HolidayIcsError::LunarConversion {
            year,
            month,
            day,
            leap,
            reason,
        };

        if !SUPPORTED_YEARS.contains(&year) {
            return Err(conversion_error("year out of supported range".into()));
        }
        if !(1..=12).contains(&month) {
            return Err(conversion_error(format!("month {month} is out of range")));
        }
        if !(1..=30).contains(&day) {
            return Err(conversion_error(format!("day {day} is out of range")));
        }

        let code = month_code(month, leap)
            .ok_or_else(|| conversion_error("could not build month code".into()))?;

        let lunar = Date::try_new_from_codes(None, year, code, day, self.calendar.clone())
            .map_err(|e| conversion_error(e.to_string()))?;

        let iso = lunar.to_iso();
        NaiveDate::from_ymd_opt(
            iso.extended_year(),
            u32::from(iso.month().ordinal),
            u32::from(iso.day_of_month().0),
        )
        .ok_or_else(|| conversion_error("solar date out of range".into()))
    }
}

/// `M07` for the seventh month, `M07L` for a leap seventh month.
fn month_code(month: u8, leap: bool) -> Option<MonthCode> {
    let suffix = if leap { "L" } else { "" };
    format!("M{month:02}{suffix}")
        .parse::<TinyAsciiStr<4>>()
        .ok()
        .map(MonthCode)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn qixi_matches_known_dates() {
        let converter = IcuLunarConverter::new();
        assert_eq!(converter.to_solar(2023, 7, 7, false).unwrap(), date(2023, 8, 22));
        assert_eq!(converter.to_solar(2024, 7, 7, false).unwrap(), date(2024, 8, 10));
        // 2025 has a leap sixth month before the seventh
        assert_eq!(converter.to_solar(2025, 7, 7, false).unwrap(), date(2025, 8, 29));
    }

    #[test]
    fn lunar_new_year_and_mid_autumn() {
        let converter = IcuLunarConverter::new();
        assert_eq!(converter.to_solar(2024, 1, 1, false).unwrap(), date(2024, 2, 10));
        assert_eq!(converter.to_solar(2024, 8, 15, false).unwrap(), date(2024, 9, 17));
    }

    #[test]
    fn leap_month_exists_only_in_leap_years() {
        let converter = IcuLunarConverter::new();
        assert_eq!(converter.to_solar(2023, 2, 1, true).unwrap(), date(2023, 3, 22));

        let err = converter.to_solar(2024, 7, 7, true).unwrap_err();
        assert!(matches!(
            err,
            HolidayIcsError::LunarConversion { year: 2024, leap: true, .. }
        ));
    }

    #[test]
    fn out_of_range_fields_are_rejected() {
        let converter = IcuLunarConverter::new();
        assert!(converter.to_solar(2024, 13, 1, false).is_err());
        assert!(converter.to_solar(2024, 0, 1, false).is_err());
        assert!(converter.to_solar(2024, 7, 31, false).is_err());
    }

    #[test]
    fn far_out_years_are_rejected_without_panicking() {
        let converter = IcuLunarConverter::new();
        for year in [80000, -70000, 262142, -262143, 1899, 2101] {
            let err = converter.to_solar(year, 7, 7, false).unwrap_err();
            assert!(
                matches!(&err, HolidayIcsError::LunarConversion { reason, .. } if reason == "year out of supported range"),
                "year {year}: {err}"
            );
        }
    }

    #[test]
    fn supported_range_edges_convert() {
        let converter = IcuLunarConverter::new();
        assert!(converter.to_solar(*SUPPORTED_YEARS.start(), 7, 7, false).is_ok());
        assert!(converter.to_solar(*SUPPORTED_YEARS.end(), 7, 7, false).is_ok());
    }

    #[test]
    fn month_codes() {
        assert_eq!(month_code(7, false).unwrap().0.as_str(), "M07");
        assert_eq!(month_code(12, true).unwrap().0.as_str(), "M12L");
    }
}
