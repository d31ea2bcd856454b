//! Official holiday / make-up workday data.
//!
//! The feed publishes one JSON document per year with a `days` array:
//!
//! ```json
//! {"year": 2024, "days": [{"name": "元旦", "date": "2024-01-01", "isOffDay": true}]}
//! ```

mod transport;

pub use transport::{HttpTransport, Transport};

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::Labels;
use crate::error::{FetchError, HolidayIcsError, HolidayIcsResult};
use crate::event::CalendarEvent;

/// One day that is either a mandated holiday (off) or a make-up workday.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HolidayRecord {
    pub date: NaiveDate,
    #[serde(rename = "isOffDay")]
    pub is_off_day: bool,
    #[serde(default)]
    pub name: Option<String>,
}

/// A year's worth of holiday data as published by the feed.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidayDocument {
    #[serde(default)]
    pub year: Option<i32>,
    pub days: Vec<HolidayRecord>,
}

/// Holiday data for one year together with the URL that served it.
#[derive(Debug, Clone)]
pub struct FetchedYear {
    pub source: String,
    pub days: Vec<HolidayRecord>,
}

/// Tries each source URL in order until one yields a parseable document.
pub struct HolidayFetcher<T: Transport> {
    transport: T,
    sources: Vec<String>,
}

impl<T: Transport> HolidayFetcher<T> {
    /// `sources` are URL templates with a `{year}` placeholder.
    pub fn new(transport: T, sources: Vec<String>) -> Self {
        HolidayFetcher { transport, sources }
    }

    /// Fetch the data for `year`.
    ///
    /// Every failed attempt is kept in the returned error; nothing is retried
    /// beyond moving on to the next source.
    pub fn fetch_year(&self, year: i32) -> HolidayIcsResult<FetchedYear> {
        let mut attempts = Vec::new();

        for template in &self.sources {
            let url = source_url(template, year);
            info!(year, url = %url, "Fetching holiday data");

            match self.fetch_document(&url) {
                Ok(document) => {
                    if let Some(published) = document.year.filter(|y| *y != year) {
                        warn!(year, published, url = %url, "Source published data for a different year");
                    }
                    debug!(year, days = document.days.len(), url = %url, "Fetched holiday data");
                    return Ok(FetchedYear {
                        source: url,
                        days: document.days,
                    });
                }
                Err(e) => {
                    debug!(year, error = %e, "Source failed, trying next");
                    attempts.push(e);
                }
            }
        }

        Err(HolidayIcsError::NoHolidayData { year, attempts })
    }

    fn fetch_document(&self, url: &str) -> Result<HolidayDocument, FetchError> {
        let body = self.transport.get(url)?;
        serde_json::from_str(&body).map_err(|source| FetchError::Parse {
            url: url.to_string(),
            source,
        })
    }
}

/// Expand a source template for `year`.
pub fn source_url(template: &str, year: i32) -> String {
    template.replace("{year}", &year.to_string())
}

/// Summary for a record: off-day or workday label, optionally followed by
/// the holiday's name.
pub fn record_label(record: &HolidayRecord, labels: &Labels) -> String {
    let label = if record.is_off_day {
        &labels.off_day
    } else {
        &labels.workday
    };

    match &record.name {
        Some(name) if labels.append_holiday_name && !name.is_empty() => {
            format!("{label} ({name})")
        }
        _ => label.clone(),
    }
}

/// One all-day event per record, in source order.
pub fn holiday_events(records: &[HolidayRecord], labels: &Labels, uid_domain: &str) -> Vec<CalendarEvent> {
    records
        .iter()
        .filter_map(|record| CalendarEvent::all_day(record.date, &record_label(record, labels), uid_domain))
        .collect()
}
