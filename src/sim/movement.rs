//! Grid movement of the marker

use glam::IVec2;

use super::state::{Axis, Direction, GameEvent, GamePhase, GameState};
use crate::clamp_coord;

impl Direction {
    /// Map a key name to a direction. Anything but the four arrows is ignored.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Self::UP),
            "ArrowDown" => Some(Self::DOWN),
            "ArrowLeft" => Some(Self::LEFT),
            "ArrowRight" => Some(Self::RIGHT),
            _ => None,
        }
    }
}

/// Move one step along the direction's axis, clamped to the arena.
/// The other coordinate is untouched.
pub fn advance_step(position: IVec2, direction: Direction) -> IVec2 {
    let mut next = position;
    match direction.axis {
        Axis::X => next.x = clamp_coord(position.x + direction.delta()),
        Axis::Y => next.y = clamp_coord(position.y + direction.delta()),
    }
    next
}

impl GameState {
    /// Arrow key: steer, re-arm auto-move and take one immediate step
    ///
    /// Returns false for keys that are not arrows or when no game is running.
    pub fn on_directional_input(&mut self, key: &str) -> bool {
        match Direction::from_key(key) {
            Some(direction) => self.steer(direction),
            None => false,
        }
    }

    /// Steer and step, regardless of where the movement timer is in its period
    pub fn steer(&mut self, direction: Direction) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }

        self.direction = direction;
        self.auto_move = true;
        self.position = advance_step(self.position, direction);
        self.events.push(GameEvent::Moved {
            position: self.position,
        });
        log::trace!("Steered {:?}, marker at {}", direction, self.position);
        self.resolve_overlap();
        true
    }
}
