//! Core types for calgrid.
//!
//! This crate provides everything the CLI needs that is not terminal or network specific:
//! - `Event` and the wire types of the mock meeting API (`protocol`)
//! - the week-view layout engine (`layout`)
//! - month and week grid math (`grid`) and small time helpers (`time`)
//! - the local JSON event store (`store`)

pub mod error;
pub mod event;
pub mod grid;
pub mod layout;
pub mod protocol;
pub mod store;
pub mod time;

pub use error::{CalGridError, CalGridResult};
pub use event::*;
