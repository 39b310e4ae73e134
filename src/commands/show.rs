use anyhow::Result;
use std::path::Path;

use crate::render::{EventDetail, Render};

pub fn run(store_path: &Path, id: u64) -> Result<()> {
    let events = super::load_snapshot(store_path)?;
    let event = events
        .iter()
        .find(|e| e.id == id)
        .ok_or_else(|| anyhow::anyhow!("Event #{} not found. Run `calgrid list` to see event ids", id))?;

    println!("{}", EventDetail(event).render());

    Ok(())
}
