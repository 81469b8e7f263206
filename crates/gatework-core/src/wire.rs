//! Wires between grid cells.

use serde::{Deserialize, Serialize};

use crate::grid::GridPosition;

/// Renderer-side placement data for a wire end (e.g. a sub-cell offset in
/// screen units). Carried through untouched; the engine never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Anchor {
    pub dx: f32,
    pub dy: f32,
}

/// One end of a wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WireEnd {
    pub position: GridPosition,
    pub anchor: Option<Anchor>,
}

impl WireEnd {
    pub fn new(position: GridPosition) -> Self {
        Self {
            position,
            anchor: None,
        }
    }

    pub fn with_anchor(position: GridPosition, anchor: Anchor) -> Self {
        Self {
            position,
            anchor: Some(anchor),
        }
    }
}

impl From<GridPosition> for WireEnd {
    fn from(position: GridPosition) -> Self {
        Self::new(position)
    }
}

/// A straight connection between two grid cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wire {
    pub start: WireEnd,
    pub end: WireEnd,
    /// Recomputed from scratch every tick.
    pub energized: bool,
}

impl Wire {
    pub fn new(start: impl Into<WireEnd>, end: impl Into<WireEnd>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            energized: false,
        }
    }

    /// Both endpoint positions, start first.
    pub fn endpoints(&self) -> [GridPosition; 2] {
        [self.start.position, self.end.position]
    }

    pub fn touches(&self, pos: GridPosition) -> bool {
        self.start.position == pos || self.end.position == pos
    }

    /// A zero-length wire. Never valid in a circuit.
    pub fn is_degenerate(&self) -> bool {
        self.start.position == self.end.position
    }

    /// The single endpoint position this wire shares with `other`, if they
    /// share exactly one. Wires laid over each other (both ends shared)
    /// return `None`.
    pub fn shared_endpoint(&self, other: &Wire) -> Option<GridPosition> {
        let mut shared = self.endpoints().into_iter().filter(|p| other.touches(*p));
        match (shared.next(), shared.next()) {
            (Some(pos), None) => Some(pos),
            _ => None,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
