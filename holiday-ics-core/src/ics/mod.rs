//! ICS document generation.

mod generate;

pub use generate::generate_ics;

use serde::{Deserialize, Serialize};

/// Calendar-level properties written into the document header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarMetadata {
    /// `PRODID`
    pub product_id: String,
    /// `X-WR-CALNAME`
    pub name: String,
    /// `X-WR-TIMEZONE`; a display hint only, events are all-day dates.
    pub timezone: String,
}

impl Default for CalendarMetadata {
    fn default() -> Self {
        CalendarMetadata {
            product_id: "-//My Custom Holiday Calendar//CN".to_string(),
            name: "大陸休假 & 節日".to_string(),
            timezone: "Asia/Shanghai".to_string(),
        }
    }
}
