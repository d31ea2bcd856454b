//! The generation pipeline: years → holidays → festivals → events → document.

use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::config::HolidayConfig;
use crate::error::{HolidayIcsError, HolidayIcsResult};
use crate::event::CalendarEvent;
use crate::festival::{self, FestivalEntry};
use crate::holiday::{self, HolidayFetcher, HttpTransport, Transport};
use crate::ics;
use crate::lunar::{IcuLunarConverter, LunarConverter};
use crate::output;
use crate::years;

/// What happened for one year of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearReport {
    pub year: i32,
    /// URL that served the holiday data, `None` if every source failed.
    pub holiday_source: Option<String>,
    pub holiday_events: usize,
    pub festival_events: usize,
    /// Human-readable reasons for everything skipped in this year.
    pub skipped: Vec<String>,
}

impl YearReport {
    fn new(year: i32) -> Self {
        YearReport {
            year,
            holiday_source: None,
            holiday_events: 0,
            festival_events: 0,
            skipped: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub years: Vec<YearReport>,
}

impl GenerationReport {
    pub fn total_events(&self) -> usize {
        self.years
            .iter()
            .map(|y| y.holiday_events + y.festival_events)
            .sum()
    }

    /// Years for which no holiday source succeeded.
    pub fn years_without_holidays(&self) -> Vec<i32> {
        self.years
            .iter()
            .filter(|y| y.holiday_source.is_none())
            .map(|y| y.year)
            .collect()
    }
}

/// Events in output order plus the per-year report.
#[derive(Debug, Clone)]
pub struct Generated {
    pub events: Vec<CalendarEvent>,
    pub report: GenerationReport,
}

/// Result of a full run, after the file has been written.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub path: PathBuf,
    pub years: Vec<i32>,
    pub report: GenerationReport,
    pub bytes: usize,
}

pub struct Generator<T: Transport, L: LunarConverter> {
    config: HolidayConfig,
    fetcher: HolidayFetcher<T>,
    converter: L,
}

impl Generator<HttpTransport, IcuLunarConverter> {
    /// Generator using the real HTTP feed and ICU lunar data.
    pub fn from_config(config: HolidayConfig) -> HolidayIcsResult<Self> {
        config.validate()?;
        let transport = HttpTransport::new(config.timeout())?;
        Ok(Generator::new(config, transport, IcuLunarConverter::new()))
    }
}

impl<T: Transport, L: LunarConverter> Generator<T, L> {
    pub fn new(config: HolidayConfig, transport: T, converter: L) -> Self {
        let fetcher = HolidayFetcher::new(transport, config.sources.clone());
        Generator {
            config,
            fetcher,
            converter,
        }
    }

    pub fn config(&self) -> &HolidayConfig {
        &self.config
    }

    /// Build every event for `years`.
    ///
    /// Holiday events for all years come first, in fetch order, followed by
    /// each year's fixed and then lunar festivals. Failures are logged and
    /// recorded in the report; they never abort generation.
    pub fn generate(&self, years: &[i32]) -> Generated {
        let mut reports: Vec<YearReport> = years.iter().copied().map(YearReport::new).collect();

        let mut events = Vec::new();
        for report in &mut reports {
            events.extend(self.holiday_events(report));
        }
        for report in &mut reports {
            events.extend(self.festival_events(report));
        }

        Generated {
            events,
            report: GenerationReport { years: reports },
        }
    }

    /// Render `events` as a complete ICS document.
    pub fn render(&self, events: &[CalendarEvent]) -> HolidayIcsResult<String> {
        ics::generate_ics(&self.config.calendar, events)
    }

    /// Run the whole pipeline for `reference` and write the output file.
    pub fn run(&self, reference: NaiveDate) -> HolidayIcsResult<RunOutcome> {
        let years = years::select_years(reference, self.config.years);
        info!(?years, policy = %self.config.years, "Generating holiday calendar");

        let generated = self.generate(&years);
        let content = self.render(&generated.events)?;

        let path = self.config.output_path();
        output::write_calendar(&path, &content)?;
        info!(path = %path.display(), events = generated.events.len(), "Calendar written");

        Ok(RunOutcome {
            path,
            years,
            report: generated.report,
            bytes: content.len(),
        })
    }

    fn holiday_events(&self, report: &mut YearReport) -> Vec<CalendarEvent> {
        let year = report.year;

        match self.fetcher.fetch_year(year) {
            Ok(fetched) => {
                let events =
                    holiday::holiday_events(&fetched.days, &self.config.labels, &self.config.uid_domain);
                info!(year, events = events.len(), source = %fetched.source, "Holiday data loaded");
                report.holiday_source = Some(fetched.source);
                report.holiday_events = events.len();
                events
            }
            Err(e) => {
                if let HolidayIcsError::NoHolidayData { attempts, .. } = &e {
                    for attempt in attempts {
                        warn!(year, url = attempt.url(), error = %attempt, "Holiday source failed");
                    }
                }
                warn!(year, error = %e, "Could not find holiday data, skipping year");
                report.skipped.push(e.to_string());
                Vec::new()
            }
        }
    }

    fn festival_events(&self, report: &mut YearReport) -> Vec<CalendarEvent> {
        let year = report.year;

        let entries = festival::fixed_festivals(year, &self.config.festivals)
            .into_iter()
            .chain(festival::lunar_festivals(
                year,
                &self.config.lunar_festivals,
                &self.converter,
            ));

        let mut events = Vec::new();
        for entry in entries {
            match entry.map(|e| self.festival_event(year, e)) {
                Ok(Some(event)) => events.push(event),
                Ok(None) => {}
                Err(e) => {
                    warn!(year, error = %e, "Skipping festival");
                    report.skipped.push(e.to_string());
                }
            }
        }

        report.festival_events = events.len();
        events
    }

    fn festival_event(&self, year: i32, entry: FestivalEntry) -> Option<CalendarEvent> {
        let event = CalendarEvent::all_day(entry.date, &entry.label, &self.config.uid_domain);
        if event.is_none() {
            warn!(year, date = %entry.date, label = %entry.label, "Festival date has no following day, skipping");
        }
        event
    }
}
