//! Year range selection.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Which calendar years a run covers, relative to the reference date.
///
/// Both policies include the next year, whose data is usually published late
/// in the current one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YearPolicy {
    /// Previous, current and next year.
    #[default]
    Surrounding,
    /// Current and next year.
    Upcoming,
}

impl YearPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            YearPolicy::Surrounding => "surrounding",
            YearPolicy::Upcoming => "upcoming",
        }
    }
}

impl fmt::Display for YearPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for YearPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "surrounding" => Ok(YearPolicy::Surrounding),
            "upcoming" => Ok(YearPolicy::Upcoming),
            other => Err(format!(
                "unknown year policy '{other}' (expected 'surrounding' or 'upcoming')"
            )),
        }
    }
}

/// Years to cover for the given reference date, in ascending order.
pub fn select_years(reference: NaiveDate, policy: YearPolicy) -> Vec<i32> {
    years_around(reference.year(), policy)
}

/// Same as [`select_years`] but starting from a bare year.
pub fn years_around(year: i32, policy: YearPolicy) -> Vec<i32> {
    match policy {
        YearPolicy::Surrounding => vec![year - 1, year, year + 1],
        YearPolicy::Upcoming => vec![year, year + 1],
    }
}
