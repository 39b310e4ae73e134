use anyhow::Result;
use calgrid_core::grid::current_time_marker;
use calgrid_core::layout::geometry::RowGeometry;
use calgrid_core::layout::layout_day;
use chrono::{NaiveDate, NaiveDateTime};
use std::path::Path;

use crate::render::{render_day, render_day_header};

pub fn run(store_path: &Path, date: NaiveDate, geometry: RowGeometry, now: NaiveDateTime) -> Result<()> {
    let events = super::load_snapshot(store_path)?;
    let layout = layout_day(&events, date, geometry);
    let marker = current_time_marker(&[date], now, geometry);

    println!("{}", render_day_header(date, now.date()));
    println!("{}", render_day(&layout, marker.as_ref(), now));

    Ok(())
}
