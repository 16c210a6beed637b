//! Input handling for Undertow
//!
//! This crate starts at the per-tick snapshot: device polling lives with
//! the embedding application, which forwards presses and releases here.

mod pilot;
mod snapshot;

pub use pilot::{Control, PilotController};
pub use snapshot::InputSnapshot;
