//! Movement tick
//!
//! One call per movement timer expiry. Walls are checked twice, independently:
//! against the rectangles the presenter last drew (so one tick behind), and
//! against the coordinate the marker is about to take.

use super::collision::{GeometryOracle, hits_edge_sentinel, touches_boundary};
use super::movement::advance_step;
use super::state::{GameEvent, GameState};

/// Advance the marker by one automatic step
pub fn tick<G: GeometryOracle + ?Sized>(state: &mut GameState, geometry: &G) {
    if !state.ticking() {
        return;
    }

    let next = advance_step(state.position, state.direction);

    let hit_drawn_wall = match geometry.layout() {
        Some((arena, marker)) => touches_boundary(&arena, &marker),
        None => {
            log::trace!("No layout yet, skipping rectangle wall check");
            false
        }
    };
    let hit_edge = hits_edge_sentinel(next);

    state.position = next;
    state.events.push(GameEvent::Moved { position: next });
    log::trace!("Tick: marker at {}", next);

    if hit_drawn_wall || hit_edge {
        state.lose();
    }

    state.resolve_overlap();
}
