//! Platform glue
//!
//! Handles the parts the simulation leaves to its host:
//! - Time (repeating timers with owned cancellation)
//! - Input events (key names to game commands)

pub mod input;
pub mod time;

pub use input::{Command, command_for_key};
pub use time::{Clock, Timer, TimerKind};
