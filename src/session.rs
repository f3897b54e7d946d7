//! A running game: state plus the two timers that drive it
//!
//! The movement timer runs at the current speed while the game is running with
//! auto-move on. It is re-armed whenever direction or speed change and dropped
//! as soon as the game stops ticking. The relocation timer runs for the whole
//! session at a fixed period, whatever the phase.

use crate::consts::RELOCATE_PERIOD_MS;
use crate::platform::{Clock, Command, Timer, TimerKind};
use crate::settings::Settings;
use crate::sim::{Direction, GameEvent, GameState, GeometryOracle, tick};
use crate::ui::Frame;

/// What the movement timer was armed for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cadence {
    direction: Direction,
    speed_ms: u32,
}

#[derive(Debug)]
pub struct Session {
    state: GameState,
    clock: Clock,
    movement: Option<(Cadence, Timer)>,
    _relocation: Timer,
}

impl Session {
    pub fn new(settings: &Settings) -> Self {
        let mut state = GameState::new(settings.resolve_seed(), settings.start_immediately);
        state.auto_move = settings.auto_move;
        log::info!("New session (seed {})", state.seed);
        Self::from_state(state, Clock::new())
    }

    /// Wrap an existing state, arming timers on `clock`
    pub fn from_state(state: GameState, clock: Clock) -> Self {
        let relocation = clock.every(RELOCATE_PERIOD_MS, TimerKind::Relocate);
        let mut session = Self {
            state,
            clock,
            movement: None,
            _relocation: relocation,
        };
        session.sync_movement();
        session
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn frame(&self) -> Frame {
        Frame::from_state(&self.state)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    /// When the next timer fires (ms, session time)
    pub fn next_deadline(&self) -> Option<u64> {
        self.clock.next_deadline()
    }

    /// Current movement period, if the marker is ticking
    pub fn movement_period(&self) -> Option<u64> {
        self.movement.as_ref().map(|(_, timer)| timer.period_ms())
    }

    pub fn start(&mut self) -> bool {
        let started = self.state.start();
        self.sync_movement();
        started
    }

    pub fn restart(&mut self) -> bool {
        let restarted = self.state.restart();
        self.sync_movement();
        restarted
    }

    /// The modal button: start from the start prompt, restart from the loss prompt
    pub fn confirm(&mut self) -> bool {
        self.start() || self.restart()
    }

    /// Raw key name from the frontend; only arrows do anything
    pub fn key(&mut self, key: &str) -> bool {
        let moved = self.state.on_directional_input(key);
        self.sync_movement();
        moved
    }

    pub fn steer(&mut self, direction: Direction) -> bool {
        let moved = self.state.steer(direction);
        self.sync_movement();
        moved
    }

    /// Switch between automatic and key-only movement
    pub fn set_auto_move(&mut self, auto_move: bool) {
        self.state.auto_move = auto_move;
        log::info!("Auto-move {}", if auto_move { "on" } else { "off" });
        self.sync_movement();
    }

    /// Apply a player command. Quit is left to the caller.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Steer(direction) => self.steer(direction),
            Command::Confirm => self.confirm(),
            Command::ToggleAutoMove => {
                self.set_auto_move(!self.state.auto_move);
                true
            }
            Command::Quit => false,
        }
    }

    /// Apply a command that arrived at `now_ms`
    ///
    /// Timers due by then fire first, so a re-armed movement timer counts its
    /// period from the key press and not from the last timer that fired.
    pub fn handle<G: GeometryOracle + ?Sized>(
        &mut self,
        now_ms: u64,
        command: Command,
        geometry: &G,
    ) -> bool {
        self.advance_to(now_ms, geometry);
        self.apply(command)
    }

    /// Fire every timer due by `now_ms`, in deadline order
    pub fn advance_to<G: GeometryOracle + ?Sized>(&mut self, now_ms: u64, geometry: &G) {
        while let Some(kind) = self.clock.pop_due(now_ms) {
            match kind {
                TimerKind::Movement => tick(&mut self.state, geometry),
                TimerKind::Relocate => self.state.relocate_target(),
            }
            self.sync_movement();
        }
        self.clock.settle(now_ms);
    }

    /// Keep the movement timer in line with phase, auto-move, direction and speed
    fn sync_movement(&mut self) {
        if !self.state.ticking() {
            if self.movement.take().is_some() {
                log::debug!("Movement timer stopped");
            }
            return;
        }

        let wanted = Cadence {
            direction: self.state.direction,
            speed_ms: self.state.speed_ms,
        };
        if matches!(&self.movement, Some((cadence, _)) if *cadence == wanted) {
            return;
        }

        // Drop the old timer before arming so only one is ever live
        self.movement = None;
        let timer = self
            .clock
            .every(u64::from(wanted.speed_ms), TimerKind::Movement);
        log::debug!("Movement timer armed at {}ms", wanted.speed_ms);
        self.movement = Some((wanted, timer));
    }
}
