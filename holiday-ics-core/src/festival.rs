//! Festival generation: fixed Gregorian dates and lunar-calendar dates.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{HolidayIcsError, HolidayIcsResult};
use crate::lunar::LunarConverter;

/// A festival resolved to a Gregorian date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FestivalEntry {
    pub date: NaiveDate,
    pub label: String,
}

/// A festival defined on the Chinese lunisolar calendar, e.g. Qixi on the
/// 7th day of the 7th month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LunarFestival {
    pub month: u8,
    pub day: u8,
    #[serde(default)]
    pub leap: bool,
    pub label: String,
}

/// Resolve one `MM-DD` festival key in `year`.
pub fn fixed_festival(year: i32, key: &str, label: &str) -> HolidayIcsResult<FestivalEntry> {
    let date = NaiveDate::parse_from_str(&format!("{year}-{key}"), "%Y-%m-%d").map_err(|_| {
        HolidayIcsError::InvalidFestivalDate {
            year,
            key: key.to_string(),
        }
    })?;

    Ok(FestivalEntry {
        date,
        label: label.to_string(),
    })
}

/// All fixed festivals for `year`, in month-day order.
///
/// Keys that are not a date in this year (`02-29` in a common year) come
/// back as errors so the caller can report and skip them.
pub fn fixed_festivals(
    year: i32,
    festivals: &BTreeMap<String, String>,
) -> Vec<HolidayIcsResult<FestivalEntry>> {
    festivals
        .iter()
        .map(|(key, label)| fixed_festival(year, key, label))
        .collect()
}

/// Lunar festivals for the lunar year starting in `year`.
pub fn lunar_festivals(
    year: i32,
    festivals: &[LunarFestival],
    converter: &dyn LunarConverter,
) -> Vec<HolidayIcsResult<FestivalEntry>> {
    festivals
        .iter()
        .map(|festival| {
            let date = converter.to_solar(year, festival.month, festival.day, festival.leap)?;
            Ok(FestivalEntry {
                date,
                label: festival.label.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn festival_map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    /// Fixed answers for a handful of years; anything else fails.
    struct TableConverter;

    impl LunarConverter for TableConverter {
        fn to_solar(&self, year: i32, month: u8, day: u8, leap: bool) -> HolidayIcsResult<NaiveDate> {
            match (year, month, day, leap) {
                (2024, 7, 7, false) => Ok(date(2024, 8, 10)),
                (2025, 7, 7, false) => Ok(date(2025, 8, 29)),
                _ => Err(HolidayIcsError::LunarConversion {
                    year,
                    month,
                    day,
                    leap,
                    reason: "not in table".into(),
                }),
            }
        }
    }

    #[test]
    fn fixed_festivals_land_on_their_month_day() {
        let map = festival_map(&[("12-25", "Christmas"), ("02-14", "Valentine")]);
        let entries: Vec<_> = fixed_festivals(2024, &map)
            .into_iter()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(
            entries,
            vec![
                FestivalEntry {
                    date: date(2024, 2, 14),
                    label: "Valentine".into()
                },
                FestivalEntry {
                    date: date(2024, 12, 25),
                    label: "Christmas".into()
                },
            ]
        );
    }

    #[test]
    fn leap_day_festival_only_in_leap_years() {
        let map = festival_map(&[("02-29", "Leap Day")]);

        assert!(fixed_festivals(2024, &map)[0].is_ok());

        let common_year = fixed_festivals(2025, &map);
        assert!(matches!(
            &common_year[0],
            Err(HolidayIcsError::InvalidFestivalDate { year: 2025, key }) if key == "02-29"
        ));
    }

    #[test]
    fn malformed_key_is_an_error() {
        assert!(fixed_festival(2024, "14/02", "x").is_err());
        assert!(fixed_festival(2024, "13-01", "x").is_err());
    }

    #[test]
    fn lunar_festival_uses_converter() {
        let qixi = vec![LunarFestival {
            month: 7,
            day: 7,
            leap: false,
            label: "Qixi".into(),
        }];

        let entries = lunar_festivals(2024, &qixi, &TableConverter);
        assert_eq!(
            entries[0].as_ref().unwrap(),
            &FestivalEntry {
                date: date(2024, 8, 10),
                label: "Qixi".into()
            }
        );
    }

    #[test]
    fn failed_lunar_conversion_is_reported_not_raised() {
        let qixi = vec![LunarFestival {
            month: 7,
            day: 7,
            leap: false,
            label: "Qixi".into(),
        }];

        let entries = lunar_festivals(1800, &qixi, &TableConverter);
        assert_eq!(entries.len(), 1);
        assert!(matches!(
            entries[0],
            Err(HolidayIcsError::LunarConversion { year: 1800, .. })
        ));
    }
}
