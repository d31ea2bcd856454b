//! Error types for holiday-ics.

use thiserror::Error;

/// A single failed attempt to fetch holiday data from one source URL.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },

    #[error("could not parse holiday data from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            FetchError::Transport { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Parse { url, .. } => url,
        }
    }
}

/// Errors that can occur while generating the holiday calendar.
#[derive(Error, Debug)]
pub enum HolidayIcsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No holiday data for {year} ({} source(s) tried)", .attempts.len())]
    NoHolidayData { year: i32, attempts: Vec<FetchError> },

    #[error("Could not convert lunar date {year}-{month:02}-{day:02} (leap: {leap}) to solar: {reason}")]
    LunarConversion {
        year: i32,
        month: u8,
        day: u8,
        leap: bool,
        reason: String,
    },

    #[error("Festival '{key}' is not a valid date in {year}")]
    InvalidFestivalDate { year: i32, key: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for holiday-ics operations.
pub type HolidayIcsResult<T> = Result<T, HolidayIcsError>;
