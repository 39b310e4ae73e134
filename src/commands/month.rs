use anyhow::Result;
use calgrid_core::grid::month_grid;
use chrono::NaiveDate;
use std::path::Path;

use crate::render::render_month;

pub fn run(store_path: &Path, year: i32, month: u32, today: NaiveDate) -> Result<()> {
    let events = super::load_snapshot(store_path)?;
    let grid = month_grid(year, month)?;

    println!("{}", render_month(&grid, &events, today));

    Ok(())
}
