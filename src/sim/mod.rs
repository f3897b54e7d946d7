//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Time enters only as discrete ticks, driven from outside
//! - No rendering or platform dependencies

pub mod collision;
pub mod movement;
pub mod scoring;
pub mod state;
pub mod tick;

pub use collision::{GeometryOracle, NoLayout, Rect, hits_edge_sentinel, overlaps, touches_boundary};
pub use movement::advance_step;
pub use scoring::{collect_target, periodic_target, sped_up};
pub use state::{Axis, Direction, GameEvent, GamePhase, GameState};
pub use tick::tick;
