//! ICS file generation.

use chrono::NaiveDate;
use icalendar::{Calendar, Component, EventLike, Property, ValueType};

use super::CalendarMetadata;
use crate::error::HolidayIcsResult;
use crate::event::CalendarEvent;

/// Generate the full .ics document for `events`, in the given order.
pub fn generate_ics(metadata: &CalendarMetadata, events: &[CalendarEvent]) -> HolidayIcsResult<String> {
    let mut cal = Calendar::new();
    cal.append_property(Property::new("METHOD", "PUBLISH"));
    cal.append_property(Property::new("X-WR-CALNAME", &metadata.name));
    cal.append_property(Property::new("X-WR-TIMEZONE", &metadata.timezone));

    for event in events {
        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&event.uid);
        ics_event.summary(&event.summary);

        // DTSTAMP is required; pinned to the start date so reruns are byte-identical
        ics_event.add_property("DTSTAMP", event.start.format("%Y%m%dT000000Z").to_string());

        add_date_property(&mut ics_event, "DTSTART", event.start);
        add_date_property(&mut ics_event, "DTEND", event.end);

        ics_event.add_property("TRANSP", "TRANSPARENT");

        cal.push(ics_event.done());
    }

    let cal = cal.done();

    Ok(set_product_id(&cal.to_string(), &metadata.product_id))
}

/// Content lines longer than this many octets are folded (RFC 5545 3.1).
const MAX_LINE_OCTETS: usize = 75;

/// The icalendar crate always writes its own PRODID; swap in ours.
fn set_product_id(ics: &str, product_id: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str(&fold_line(&format!("PRODID:{product_id}")));
        } else {
            result.push_str(line);
        }
        result.push_str("\r\n");
    }

    result
}

/// Fold a content line into chunks of at most [`MAX_LINE_OCTETS`] octets,
/// continuation lines starting with a space. Never splits a UTF-8 sequence.
fn fold_line(line: &str) -> String {
    let mut folded = String::with_capacity(line.len() + line.len() / MAX_LINE_OCTETS * 3);
    let mut width = 0;

    for c in line.chars() {
        if width + c.len_utf8() > MAX_LINE_OCTETS {
            folded.push_str("\r\n ");
            width = 1;
        }
        folded.push(c);
        width += c.len_utf8();
    }

    folded
}

/// Add a `VALUE=DATE` property (all-day form).
fn add_date_property(ics_event: &mut icalendar::Event, name: &str, date: NaiveDate) {
    let mut prop = Property::new(name, date.format("%Y%m%d").to_string());
    prop.append_parameter(ValueType::Date);
    ics_event.append_property(prop);
}
