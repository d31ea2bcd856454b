//! HTTP transport for the holiday feed.

use std::time::Duration;

use crate::error::{FetchError, HolidayIcsError, HolidayIcsResult};

/// Fetches the body of a URL.
///
/// Implementations return `FetchError::Status` for non-success responses and
/// `FetchError::Transport` for everything that prevents a response.
pub trait Transport {
    fn get(&self, url: &str) -> Result<String, FetchError>;
}

/// Blocking HTTP transport with a per-request timeout.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> HolidayIcsResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("holiday-ics/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HolidayIcsError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(HttpTransport { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<String, FetchError> {
        let transport_error = |e: reqwest::Error| FetchError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self.client.get(url).send().map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().map_err(transport_error)
    }
}
