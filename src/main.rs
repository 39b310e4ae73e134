mod client;
mod commands;
mod config;
mod logging;
mod render;

use anyhow::{Context, Result};
use calgrid_core::EventStatus;
use calgrid_core::grid::{ViewMode, shift_period};
use calgrid_core::protocol::EventsQueryParams;
use chrono::{Datelike, Duration, Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::client::Client;
use crate::commands::new::NewArgs;
use crate::commands::update::EventChanges;

/// Days shown by `list` when --to is not given
const LIST_DAYS: i64 = 3;

#[derive(Parser)]
#[command(name = "calgrid")]
#[command(about = "Week and month calendar views over a local event store and the meeting API")]
struct Cli {
    /// Config file (defaults to ~/.config/calgrid/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the hour grid of one day
    Day {
        /// Day to show (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Show the Sunday-to-Saturday week around a date
    Week {
        /// Any day of the week to show (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Move by this many weeks from --date (e.g. -1 for last week)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        shift: i32,
    },
    /// Show the month grid
    Month {
        /// Month to show (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,

        /// Move by this many months from --month
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        shift: i32,
    },
    /// List events grouped by day
    List {
        /// First day (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        from: Option<String>,

        /// Last day (YYYY-MM-DD, defaults to three days after --from)
        #[arg(long)]
        to: Option<String>,
    },
    /// Show every field of one event
    Show {
        /// Event id (see `calgrid list`)
        id: u64,
    },
    /// Create an event
    New {
        /// Event title
        title: String,

        /// Day of the event (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Start time (HH:MM, defaults to now rounded down to the quarter hour)
        #[arg(short, long)]
        start: Option<String>,

        /// End time (HH:MM, defaults to one hour after the start)
        #[arg(short, long)]
        end: Option<String>,

        /// Event description
        #[arg(long)]
        description: Option<String>,

        /// Event location
        #[arg(short, long)]
        location: Option<String>,

        /// Guest email, repeat for several guests
        #[arg(short, long = "guest")]
        guests: Vec<String>,

        #[arg(long, value_enum, default_value_t = StatusArg::Confirmed)]
        status: StatusArg,

        /// Category (defaults to MEETING)
        #[arg(long)]
        category: Option<String>,

        /// Priority from 0 (undefined) to 9 (lowest), defaults to 2
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=9))]
        priority: Option<u8>,

        /// Create the event through the meeting API instead of only locally
        #[arg(long)]
        remote: bool,
    },
    /// Change fields of an event
    Update {
        /// Event id (see `calgrid list`)
        id: u64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        date: Option<String>,

        #[arg(short, long)]
        start: Option<String>,

        #[arg(short, long)]
        end: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// New location (empty string clears it)
        #[arg(short, long)]
        location: Option<String>,

        #[arg(long, value_enum)]
        status: Option<StatusArg>,

        /// Guest email, repeat for several guests (replaces the guest list)
        #[arg(short, long = "guest")]
        guests: Vec<String>,

        /// New category (empty string clears it)
        #[arg(long)]
        category: Option<String>,

        /// Priority from 0 (undefined) to 9 (lowest)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=9))]
        priority: Option<u8>,

        /// Send the change to the meeting API
        #[arg(long)]
        remote: bool,
    },
    /// Delete an event
    Delete {
        /// Event id (see `calgrid list`)
        id: u64,

        /// Delete through the meeting API
        #[arg(long)]
        remote: bool,
    },
    /// Replace local events with the ones from the meeting API
    Pull {
        /// Only events from this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Only events until this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Only events of this organizer
        #[arg(long)]
        user: Option<String>,

        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Confirmed,
    Tentative,
    Cancelled,
}

impl From<StatusArg> for EventStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Confirmed => EventStatus::Confirmed,
            StatusArg::Tentative => EventStatus::Tentative,
            StatusArg::Cancelled => EventStatus::Cancelled,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let cfg = config::load_config(cli.config.as_deref())?;
    let store_path = cfg.store_path();
    let geometry = cfg.geometry();
    let now = Local::now().naive_local();
    let today = now.date();

    match cli.command {
        Commands::Day { date } => {
            let date = parse_date_arg(date.as_deref(), today)?;
            commands::day::run(&store_path, date, geometry, now)
        }
        Commands::Week { date, shift } => {
            let date = parse_date_arg(date.as_deref(), today)?;
            let date = shift_period(date, ViewMode::Week, shift)
                .context("Date out of range")?;
            commands::week::run(&store_path, date, geometry, now)
        }
        Commands::Month { month, shift } => {
            let first = match month.as_deref() {
                Some(s) => parse_month_arg(s)?,
                None => today.with_day(1).unwrap_or(today),
            };
            let first = shift_period(first, ViewMode::Month, shift)
                .context("Date out of range")?;
            commands::month::run(&store_path, first.year(), first.month(), today)
        }
        Commands::List { from, to } => {
            let from = parse_date_arg(from.as_deref(), today)?;
            let to = parse_date_arg(to.as_deref(), from + Duration::days(LIST_DAYS))?;
            commands::list::run(&store_path, from, to, today)
        }
        Commands::Show { id } => commands::show::run(&store_path, id),
        Commands::New {
            title,
            date,
            start,
            end,
            description,
            location,
            guests,
            status,
            category,
            priority,
            remote,
        } => {
            let args = NewArgs {
                title,
                date: parse_date_arg(date.as_deref(), today)?,
                start,
                end,
                description,
                location,
                guests,
                status: status.into(),
                category,
                priority,
            };
            let draft = commands::new::build_draft(args, now.time())?;
            let client = remote_client(remote, &cfg.api_base_url)?;
            commands::new::run(&store_path, draft, &cfg.uid_domain, client.as_ref()).await
        }
        Commands::Update {
            id,
            title,
            date,
            start,
            end,
            description,
            location,
            status,
            guests,
            category,
            priority,
            remote,
        } => {
            let changes = EventChanges {
                title,
                date: date.as_deref().map(calgrid_core::parse_date).transpose()?,
                start,
                end,
                description,
                location,
                status: status.map(Into::into),
                guests: Some(guests).filter(|g| !g.is_empty()),
                category,
                priority,
            };
            let client = remote_client(remote, &cfg.api_base_url)?;
            commands::update::run(&store_path, id, changes, client.as_ref()).await
        }
        Commands::Delete { id, remote } => {
            let client = remote_client(remote, &cfg.api_base_url)?;
            commands::delete::run(&store_path, id, client.as_ref()).await
        }
        Commands::Pull { from, to, user, status } => {
            let params = EventsQueryParams {
                start_date: from.as_deref().map(validated_date).transpose()?,
                end_date: to.as_deref().map(validated_date).transpose()?,
                user_id: user,
                status: status.map(Into::into),
            };
            let client = Client::new(cfg.api_base_url.clone())?;
            commands::pull::run(&client, &store_path, params).await
        }
    }
}

fn remote_client(remote: bool, base_url: &str) -> Result<Option<Client>> {
    if remote {
        Ok(Some(Client::new(base_url)?))
    } else {
        Ok(None)
    }
}

/// Parse a YYYY-MM-DD argument, falling back to `default` when absent.
fn parse_date_arg(arg: Option<&str>, default: NaiveDate) -> Result<NaiveDate> {
    match arg {
        Some(s) => Ok(calgrid_core::parse_date(s)?),
        None => Ok(default),
    }
}

/// Parse a YYYY-MM argument into the first day of that month.
fn parse_month_arg(arg: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", arg.trim()), "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid month '{}'. Expected YYYY-MM", arg))
}

fn validated_date(arg: &str) -> Result<String> {
    Ok(calgrid_core::format_date(calgrid_core::parse_date(arg)?))
}
