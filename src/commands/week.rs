use anyhow::Result;
use calgrid_core::grid::current_time_marker;
use calgrid_core::layout::geometry::RowGeometry;
use calgrid_core::layout::layout_week;
use chrono::{NaiveDate, NaiveDateTime};
use std::path::Path;

use crate::render::render_week;

pub fn run(store_path: &Path, date: NaiveDate, geometry: RowGeometry, now: NaiveDateTime) -> Result<()> {
    let events = super::load_snapshot(store_path)?;
    let layout = layout_week(&events, date, geometry);
    let marker = current_time_marker(&layout.dates(), now, geometry);

    println!("{}", render_week(&layout, marker.as_ref(), now));

    Ok(())
}
