//! Core library for holiday-ics.
//!
//! Builds an iCalendar document of Chinese public holidays, make-up workdays
//! and festivals:
//! - `years` picks the calendar years to cover
//! - `holiday` fetches the official adjustment data for each year
//! - `festival` and `lunar` produce fixed-date and lunar-calendar festivals
//! - `event` and `ics` turn dates into `VEVENT` blocks and a full document
//! - `pipeline` composes all of the above into a single run

pub mod config;
pub mod error;
pub mod event;
pub mod festival;
pub mod holiday;
pub mod ics;
pub mod lunar;
pub mod output;
pub mod pipeline;
pub mod years;

pub use crate::config::HolidayConfig;
pub use crate::error::{FetchError, HolidayIcsError, HolidayIcsResult};
pub use crate::event::CalendarEvent;
pub use crate::years::YearPolicy;
