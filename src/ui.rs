//! What the presenter shows, and what it reports back
//!
//! The core never draws. It hands the presenter a [`Frame`] and reads back the
//! rectangles of the last drawn play field through [`LayoutOracle`].

use glam::IVec2;
use serde::Serialize;

use crate::consts::{ARENA_SIZE, MARKER_SIZE};
use crate::sim::{GamePhase, GameState, GeometryOracle, Rect};

/// The three mutually exclusive screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum View {
    StartPrompt,
    LossPrompt,
    PlayField,
}

impl View {
    pub fn for_phase(phase: GamePhase) -> Self {
        match phase {
            GamePhase::AwaitingStart => View::StartPrompt,
            GamePhase::Lost => View::LossPrompt,
            GamePhase::Running => View::PlayField,
        }
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Frame {
    pub view: View,
    pub score: u32,
    pub position: IVec2,
    pub target: IVec2,
}

impl Frame {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            view: View::for_phase(state.phase),
            score: state.score,
            position: state.position,
            target: state.target,
        }
    }

    /// Modal shown over the screen, if any
    pub fn modal(&self) -> Option<Modal> {
        let button = match self.view {
            View::StartPrompt => "Start",
            View::LossPrompt => "ReStart",
            View::PlayField => return None,
        };
        Some(Modal {
            score: self.score,
            button,
        })
    }

    /// Always-visible score line
    pub fn score_card(&self) -> String {
        format!("Score {}", self.score)
    }
}

/// Start / restart dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Modal {
    pub score: u32,
    pub button: &'static str,
}

impl Modal {
    pub const TITLE: &'static str = "Collect  Object";
    pub const INSTRUCTIONS: &'static str =
        "Collect the yellow object by using the right/left/top/bottom arrows";

    pub fn score_line(&self) -> String {
        format!("Score : {}", self.score)
    }
}

/// Geometry of the last presented frame
///
/// Rectangles are in arena pixels with the arena at `origin`. They only exist
/// while the play field is on screen, and they lag the state by whatever has
/// happened since the last `record`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutOracle {
    origin: IVec2,
    marker: Option<IVec2>,
}

impl LayoutOracle {
    pub fn new(origin: IVec2) -> Self {
        Self {
            origin,
            marker: None,
        }
    }

    /// Note what was just drawn
    pub fn record(&mut self, frame: &Frame) {
        self.marker = (frame.view == View::PlayField).then_some(frame.position);
    }
}

impl GeometryOracle for LayoutOracle {
    fn arena_rect(&self) -> Option<Rect> {
        self.marker
            .map(|_| Rect::from_origin(self.origin, ARENA_SIZE, ARENA_SIZE))
    }

    fn marker_rect(&self) -> Option<Rect> {
        self.marker
            .map(|m| Rect::from_origin(self.origin + m, MARKER_SIZE, MARKER_SIZE))
    }
}
