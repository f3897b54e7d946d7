//! Game state and core simulation types
//!
//! Everything the movement, collision and scoring code reads or writes lives here.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start button
    AwaitingStart,
    /// Marker is on the field
    Running,
    /// Marker touched the wall
    Lost,
}

/// Axis the marker travels along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// Travel direction: an axis plus a sign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Direction {
    pub axis: Axis,
    /// True when the coordinate grows each step
    pub increment: bool,
}

impl Direction {
    pub const RIGHT: Self = Self::new(Axis::X, true);
    pub const LEFT: Self = Self::new(Axis::X, false);
    pub const DOWN: Self = Self::new(Axis::Y, true);
    pub const UP: Self = Self::new(Axis::Y, false);

    pub const fn new(axis: Axis, increment: bool) -> Self {
        Self { axis, increment }
    }

    /// Signed per-step offset along the active axis
    #[inline]
    pub fn delta(&self) -> i32 {
        if self.increment { STEP } else { -STEP }
    }
}

impl Default for Direction {
    fn default() -> Self {
        Self::RIGHT
    }
}

/// Things that happened during a state mutation, drained by the frontend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Moved { position: IVec2 },
    Collected { score: u32 },
    TargetRelocated { target: IVec2 },
    Lost { score: u32 },
    Restarted,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Marker top-left corner
    pub position: IVec2,
    /// Target top-left corner
    pub target: IVec2,
    pub score: u32,
    /// Movement tick period (ms)
    pub speed_ms: u32,
    pub direction: Direction,
    /// Marker advances on its own each tick
    pub auto_move: bool,
    pub phase: GamePhase,
    pub(crate) rng: Pcg32,
    /// Pending events (not part of the game snapshot)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed
    ///
    /// With `start_running` the start prompt is skipped, as the game did originally.
    pub fn new(seed: u64, start_running: bool) -> Self {
        Self {
            seed,
            position: START_POSITION,
            target: START_TARGET,
            score: 0,
            speed_ms: INITIAL_SPEED_MS,
            direction: Direction::default(),
            auto_move: true,
            phase: if start_running {
                GamePhase::Running
            } else {
                GamePhase::AwaitingStart
            },
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Movement ticks only happen in this condition
    #[inline]
    pub fn ticking(&self) -> bool {
        self.phase == GamePhase::Running && self.auto_move
    }

    /// AwaitingStart -> Running
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::AwaitingStart {
            return false;
        }
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::Started);
        log::info!("Game started");
        true
    }

    /// Lost -> Running with a fresh marker, score and speed
    ///
    /// The target is left wherever it is.
    pub fn restart(&mut self) -> bool {
        if self.phase != GamePhase::Lost {
            return false;
        }
        self.position = START_POSITION;
        self.score = 0;
        self.speed_ms = INITIAL_SPEED_MS;
        self.auto_move = true;
        self.direction = Direction::default();
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::Restarted);
        log::info!("Game restarted");
        self.resolve_overlap();
        true
    }

    /// Running -> Lost
    pub(crate) fn lose(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.phase = GamePhase::Lost;
        self.events.push(GameEvent::Lost { score: self.score });
        log::info!("Marker hit the wall at {} with score {}", self.position, self.score);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = GameState::new(1, true);
        assert_eq!(state.position, IVec2::new(10, 10));
        assert_eq!(state.target, IVec2::new(100, 100));
        assert_eq!(state.score, 0);
        assert_eq!(state.speed_ms, 500);
        assert_eq!(state.direction, Direction::new(Axis::X, true));
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.ticking());

        let idle = GameState::new(1, false);
        assert_eq!(idle.phase, GamePhase::AwaitingStart);
        assert!(!idle.ticking());
    }

    #[test]
    fn test_start_only_from_awaiting() {
        let mut state = GameState::new(1, false);
        assert!(state.start());
        assert_eq!(state.phase, GamePhase::Running);
        assert!(!state.start());
        assert_eq!(state.drain_events(), vec![GameEvent::Started]);
    }

    #[test]
    fn test_restart_resets_all_but_target() {
        let mut state = GameState::new(7, true);
        state.score = 50;
        state.speed_ms = 300;
        state.position = IVec2::new(0, 200);
        state.direction = Direction::UP;
        state.target = IVec2::new(320, 250);
        state.lose();
        assert_eq!(state.phase, GamePhase::Lost);

        assert!(state.restart());
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.position, START_POSITION);
        assert_eq!(state.speed_ms, INITIAL_SPEED_MS);
        assert_eq!(state.direction, Direction::RIGHT);
        assert!(state.auto_move);
        assert_eq!(state.target, IVec2::new(320, 250));
    }

    #[test]
    fn test_restart_requires_lost() {
        let mut state = GameState::new(1, true);
        state.score = 20;
        assert!(!state.restart());
        assert_eq!(state.score, 20);
    }

    #[test]
    fn test_lose_reports_score() {
        let mut state = GameState::new(1, true);
        state.score = 30;
        state.lose();
        state.lose();
        assert_eq!(state.drain_events(), vec![GameEvent::Lost { score: 30 }]);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_state_serializes() {
        let state = GameState::new(99, true);
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.position, state.position);
        assert_eq!(back.phase, state.phase);
    }

    #[test]
    fn test_restored_rng_continues_sequence() {
        let mut state = GameState::new(5, true);
        state.on_collect();
        let json = serde_json::to_string(&state).unwrap();
        let mut back: GameState = serde_json::from_str(&json).unwrap();

        for _ in 0..5 {
            state.relocate_target();
            back.relocate_target();
            assert_eq!(back.target, state.target);
        }
    }
}
