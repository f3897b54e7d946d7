//! Collect Object - a grid arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, scoring, phases)
//! - `platform`: Timer queue and key mapping for the frontend
//! - `session`: Drives the simulation from the timers
//! - `ui`: View selection and the geometry the presenter reports back
//! - `settings`: Player configuration

pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
pub mod ui;

pub use session::Session;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use glam::IVec2;

    /// Arena is a square, in pixels
    pub const ARENA_SIZE: i32 = 480;
    /// Marker and target edge length
    pub const MARKER_SIZE: i32 = 20;
    pub const TARGET_SIZE: i32 = 20;
    /// Distance covered by one tick or key press
    pub const STEP: i32 = 10;

    /// Lowest and highest coordinate the marker may hold
    pub const MIN_COORD: i32 = 0;
    pub const MAX_COORD: i32 = ARENA_SIZE;

    /// Coordinate that also counts as an edge hit. Unreachable with a step of 10
    /// starting from 10; kept so other step sizes still lose on it.
    pub const EDGE_SENTINEL: i32 = 495;

    /// Movement tick period (ms)
    pub const INITIAL_SPEED_MS: u32 = 500;
    pub const MIN_SPEED_MS: u32 = 100;
    pub const SPEED_UP_MS: u32 = 50;

    /// Points per collected target
    pub const POINTS_PER_COLLECT: u32 = 10;

    /// Target spawns on a 48x48 grid of 10px cells
    pub const TARGET_GRID_CELLS: i32 = 48;
    /// The periodic relocator never places a target closer than this to the wall
    pub const PERIODIC_TARGET_FLOOR: i32 = 10;
    /// Independent target shuffle period (ms)
    pub const RELOCATE_PERIOD_MS: u64 = 10_000;

    pub const START_POSITION: IVec2 = IVec2::new(10, 10);
    pub const START_TARGET: IVec2 = IVec2::new(100, 100);
}

/// Clamp a single coordinate into the arena
#[inline]
pub fn clamp_coord(value: i32) -> i32 {
    value.clamp(consts::MIN_COORD, consts::MAX_COORD)
}

