//! Key names to game commands
//!
//! Frontends translate their native key events into DOM-style key names
//! ("ArrowUp", "Enter", "q", ...) and hand them here.

use crate::sim::Direction;

/// Something the player asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Arrow key: step once and steer
    Steer(Direction),
    /// The modal's button: Start or ReStart, whichever is showing
    Confirm,
    /// Switch between automatic and key-only movement
    ToggleAutoMove,
    Quit,
}

/// Map a key name to a command. Unknown keys map to None.
pub fn command_for_key(key: &str) -> Option<Command> {
    if let Some(direction) = Direction::from_key(key) {
        return Some(Command::Steer(direction));
    }
    match key {
        "Enter" | " " => Some(Command::Confirm),
        "m" | "M" => Some(Command::ToggleAutoMove),
        "q" | "Q" | "Escape" => Some(Command::Quit),
        _ => None,
    }
}
