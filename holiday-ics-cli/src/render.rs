//! Terminal rendering for run results.

use holiday_ics_core::pipeline::{RunOutcome, YearReport};
use owo_colors::OwoColorize;

/// Extension trait for colored terminal output.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for YearReport {
    fn render(&self) -> String {
        let holidays = match &self.holiday_source {
            Some(_) => format!("{} holiday events", self.holiday_events).green().to_string(),
            None => "no holiday data".yellow().to_string(),
        };

        let mut lines = vec![format!(
            "  {} {}, {} festival events",
            self.year.bold(),
            holidays,
            self.festival_events
        )];
        for reason in &self.skipped {
            lines.push(format!("     {} {}", "skipped:".dimmed(), reason.dimmed()));
        }
        lines.join("\n")
    }
}

impl Render for RunOutcome {
    fn render(&self) -> String {
        let mut lines: Vec<String> = self.report.years.iter().map(|y| y.render()).collect();

        let missing = self.report.years_without_holidays();
        if !missing.is_empty() {
            let years: Vec<String> = missing.iter().map(|y| y.to_string()).collect();
            lines.push(format!(
                "{} Could not find holiday data for {}",
                "!".yellow(),
                years.join(", ")
            ));
        }

        lines.push(format!(
            "{} Wrote {} events to {}",
            "✓".green(),
            self.report.total_events(),
            self.path.display()
        ));
        lines.join("\n")
    }
}
