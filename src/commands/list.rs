use anyhow::Result;
use calgrid_core::{Event, parse_clock, parse_date};
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use std::path::Path;

use crate::render::{Render, render_day_header};

pub fn run(store_path: &Path, from: NaiveDate, to: NaiveDate, today: NaiveDate) -> Result<()> {
    let events = super::load_snapshot(store_path)?;

    let mut in_range: Vec<(NaiveDate, &Event)> = events
        .iter()
        .filter_map(|event| parse_date(&event.date).ok().map(|date| (date, event)))
        .filter(|(date, _)| *date >= from && *date <= to)
        .collect();

    // Sort by date, then start time
    in_range.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| start_key(a.1).cmp(&start_key(b.1))));

    if in_range.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    // Group events by day and print
    let mut current_date: Option<NaiveDate> = None;

    for (date, event) in in_range {
        if current_date != Some(date) {
            if current_date.is_some() {
                println!();
            }
            println!("{}", render_day_header(date, today));
            current_date = Some(date);
        }

        let id_tag = format!("#{}", event.id);
        println!("  {} {}", event.render(), id_tag.dimmed());
    }

    Ok(())
}

/// Unparseable start times sort last within their day.
fn start_key(event: &Event) -> u32 {
    parse_clock(&event.time).unwrap_or(u32::MAX)
}
