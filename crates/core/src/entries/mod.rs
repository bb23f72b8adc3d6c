//! Gate entries and per-event attendance: records and the write path.

mod model;
mod service;

pub use model::*;
pub use service::*;
