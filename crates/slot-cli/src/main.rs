//! `slots` CLI — inspect a day's bookable appointment slots from the command line.
//!
//! Works on a day-export file: the JSON the booking backend dumps for one
//! day, with the business window and each provider's bookings and absences.
//!
//! ## Usage
//!
//! ```sh
//! # Merged bookable times for the day (stdin → stdout)
//! slots day < day.json
//!
//! # From a file, with a 30 minute cadence
//! slots day -i day.json --step 30
//!
//! # Full slot list as JSON
//! slots day -i day.json --json
//!
//! # Explain every candidate decision for one provider
//! slots trace -i day.json --provider anna
//!
//! # Is 13:00 still bookable? (exit 1 when not)
//! slots check -i day.json --at 13:00
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use slot_engine::{
    day_slots, day_slots_traced, localize, BusinessWindow, Interval, ProviderProfile,
    ProviderSchedule, TimeOfDay, DEFAULT_STEP_MINUTES, SALON_UTC_OFFSET_HOURS,
};
use std::io::{self, Read};
use std::process;

#[derive(Parser)]
#[command(name = "slots", version, about = "Appointment slot availability CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the merged bookable times for the day
    Day {
        /// Day export file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Minutes between candidate starts
        #[arg(long, default_value_t = DEFAULT_STEP_MINUTES)]
        step: i64,
        /// Hours added to stored UTC timestamps when localizing them
        #[arg(long, default_value_t = SALON_UTC_OFFSET_HOURS)]
        offset_hours: i64,
        /// Print the full slot list as JSON instead of one time per line
        #[arg(long)]
        json: bool,
    },
    /// Explain why every candidate was kept or dropped
    Trace {
        /// Day export file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Only trace this provider
        #[arg(long)]
        provider: Option<String>,
        /// Minutes between candidate starts
        #[arg(long, default_value_t = DEFAULT_STEP_MINUTES)]
        step: i64,
        /// Hours added to stored UTC timestamps when localizing them
        #[arg(long, default_value_t = SALON_UTC_OFFSET_HOURS)]
        offset_hours: i64,
    },
    /// Check whether a start time is bookable (exit 1 when it is not)
    Check {
        /// Day export file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Start time to check, as HH:mm
        #[arg(long)]
        at: String,
        /// Only consider this provider
        #[arg(long)]
        provider: Option<String>,
        /// Minutes between candidate starts
        #[arg(long, default_value_t = DEFAULT_STEP_MINUTES)]
        step: i64,
        /// Hours added to stored UTC timestamps when localizing them
        #[arg(long, default_value_t = SALON_UTC_OFFSET_HOURS)]
        offset_hours: i64,
    },
}

// ---------------------------------------------------------------------------
// Day-export file format
// ---------------------------------------------------------------------------

/// One interval endpoint from the day file: either a wall-clock `"HH:mm"`
/// string or an RFC 3339 UTC timestamp that still needs localizing.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
struct Endpoint(String);

impl Endpoint {
    fn resolve(&self, offset_hours: i64) -> Result<TimeOfDay> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.0) {
            return Ok(localize(dt.with_timezone(&Utc), offset_hours));
        }
        self.0.parse().with_context(|| {
            format!(
                "Invalid time '{}': expected HH:mm or an RFC 3339 timestamp",
                self.0
            )
        })
    }
}

#[derive(Deserialize)]
struct IntervalEntry {
    start: Endpoint,
    end: Endpoint,
}

#[derive(Deserialize)]
struct ProviderEntry {
    id: String,
    /// Treatment length in minutes; wins over `duration_seconds`.
    #[serde(default)]
    duration_minutes: Option<i64>,
    /// Raw upstream duration in seconds, as the backend stores it.
    #[serde(default)]
    duration_seconds: Option<i64>,
    #[serde(default)]
    booked: Vec<IntervalEntry>,
    #[serde(default)]
    absences: Vec<IntervalEntry>,
}

#[derive(Deserialize)]
struct DayFile {
    opening: Endpoint,
    closing: Endpoint,
    providers: Vec<ProviderEntry>,
}

struct LoadedDay {
    window: BusinessWindow,
    schedules: Vec<ProviderSchedule>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Day {
            input,
            output,
            step,
            offset_hours,
            json,
        } => {
            let day = load_day(input.as_deref(), offset_hours)?;
            let slots = day_slots(day.window, &day.schedules, step);

            let rendered = if json {
                let mut text = serde_json::to_string_pretty(&slots)?;
                text.push('\n');
                text
            } else {
                let mut text = String::new();
                for slot in &slots {
                    text.push_str(&slot.time.to_string());
                    text.push('\n');
                }
                text
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Trace {
            input,
            provider,
            step,
            offset_hours,
        } => {
            let day = load_day(input.as_deref(), offset_hours)?;
            let schedules = retain_provider(day.schedules, provider.as_deref())?;

            day_slots_traced(day.window, &schedules, step, |tr| {
                println!("{:<16} {}  {}", tr.provider_id, tr.candidate, tr.outcome);
            });
        }
        Commands::Check {
            input,
            at,
            provider,
            step,
            offset_hours,
        } => {
            let at: TimeOfDay = at
                .parse()
                .with_context(|| format!("Invalid --at time '{}'", at))?;

            let day = load_day(input.as_deref(), offset_hours)?;
            let schedules = retain_provider(day.schedules, provider.as_deref())?;
            let slots = day_slots(day.window, &schedules, step);

            match slots.iter().find(|slot| slot.time == at) {
                Some(slot) => {
                    println!(
                        "bookable: {} at {} ({} min)",
                        slot.time, slot.provider_id, slot.duration_minutes
                    );
                }
                None => {
                    println!("not bookable: {}", at);
                    process::exit(1);
                }
            }
        }
    }

    Ok(())
}

/// Read and resolve a day export into engine inputs.
///
/// Interval endpoints and the window accept both already-localized `"HH:mm"`
/// strings and stored RFC 3339 UTC timestamps; timestamps go through the
/// fixed `--offset-hours` localization.
fn load_day(input: Option<&str>, offset_hours: i64) -> Result<LoadedDay> {
    let raw = read_input(input)?;
    let day: DayFile = serde_json::from_str(&raw).context("Failed to parse day file JSON")?;

    let window = BusinessWindow::new(
        day.opening.resolve(offset_hours)?,
        day.closing.resolve(offset_hours)?,
    )?;

    let schedules = day
        .providers
        .iter()
        .map(|entry| {
            Ok(ProviderSchedule::new(
                provider_profile(entry),
                resolve_intervals(&entry.booked, offset_hours)?,
                resolve_intervals(&entry.absences, offset_hours)?,
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(LoadedDay { window, schedules })
}

fn provider_profile(entry: &ProviderEntry) -> ProviderProfile {
    match entry.duration_minutes {
        Some(minutes) => ProviderProfile::new(entry.id.clone(), minutes),
        None => ProviderProfile::from_upstream_seconds(entry.id.clone(), entry.duration_seconds),
    }
}

fn resolve_intervals(entries: &[IntervalEntry], offset_hours: i64) -> Result<Vec<Interval>> {
    entries
        .iter()
        .map(|entry| {
            Ok(Interval {
                start: entry.start.resolve(offset_hours)?,
                end: entry.end.resolve(offset_hours)?,
            })
        })
        .collect()
}

/// Keep only the named provider's schedule when `--provider` was given.
fn retain_provider(
    schedules: Vec<ProviderSchedule>,
    provider: Option<&str>,
) -> Result<Vec<ProviderSchedule>> {
    match provider {
        None => Ok(schedules),
        Some(id) => {
            let filtered: Vec<ProviderSchedule> = schedules
                .into_iter()
                .filter(|s| s.provider.id == id)
                .collect();
            if filtered.is_empty() {
                anyhow::bail!("Unknown provider id '{}'", id);
            }
            Ok(filtered)
        }
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
