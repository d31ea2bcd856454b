mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use holiday_ics_core::pipeline::Generator;
use holiday_ics_core::{HolidayConfig, YearPolicy};
use tracing_subscriber::EnvFilter;

use render::Render;

#[derive(Parser)]
#[command(name = "holiday-ics")]
#[command(version)]
#[command(about = "Generate an ICS calendar of Chinese public holidays, make-up workdays and festivals")]
struct Cli {
    /// Config file (defaults to <config dir>/holiday-ics/config.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where to write the calendar
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Which years to cover: "surrounding" (previous, current, next) or "upcoming" (current, next)
    #[arg(long)]
    years: Option<YearPolicy>,

    /// Use this year as the current year instead of today's date
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..=9999))]
    base_year: Option<i32>,

    /// Holiday source URL template with a {year} placeholder; repeat to add mirrors
    #[arg(long = "source")]
    sources: Vec<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration.
    fn apply(&self, config: &mut HolidayConfig) {
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(years) = self.years {
            config.years = years;
        }
        if !self.sources.is_empty() {
            config.sources = self.sources.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
    }

    fn reference_date(&self) -> Result<NaiveDate> {
        match self.base_year {
            Some(year) => NaiveDate::from_ymd_opt(year, 1, 1)
                .with_context(|| format!("Year {year} is out of range")),
            None => Ok(Local::now().date_naive()),
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Effective configuration as TOML, for `--print-config`.
fn render_config(config: &HolidayConfig) -> Result<String> {
    config.to_toml().context("Failed to render configuration")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = HolidayConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply(&mut config);
    config.validate().context("Invalid configuration")?;

    if cli.print_config {
        print!("{}", render_config(&config)?);
        return Ok(());
    }

    let reference = cli.reference_date()?;
    let generator = Generator::from_config(config)?;
    let outcome = generator
        .run(reference)
        .with_context(|| format!("Failed to generate {}", generator.config().output_path().display()))?;

    println!("{}", outcome.render());

    Ok(())
}
