//! Placed logic components.
//!
//! A [`Component`] is one cell-sized element of the circuit with a single
//! persistent output bit. Its [`ComponentKind`] carries only the data that
//! kind needs: emitters may be pinned to a value by the objective validator,
//! gates and receivers carry nothing beyond their output.

use serde::{Deserialize, Serialize};

use crate::grid::GridPosition;

// ---------------------------------------------------------------------------
// Kinds
// ---------------------------------------------------------------------------

/// The boolean gate types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GateKind {
    And,
    Or,
    Xor,
    Not,
}

impl GateKind {
    /// All four gate kinds.
    pub fn all() -> [GateKind; 4] {
        [GateKind::And, GateKind::Or, GateKind::Xor, GateKind::Not]
    }
}

/// What a component is, plus any per-kind data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    /// Signal source. Always on unless `forced_output` pins it.
    Emitter { forced_output: Option<bool> },
    /// Boolean gate, re-emits its evaluated output on the next tick.
    Gate(GateKind),
    /// Signal sink observed by the objective validator. Never a source.
    Receiver,
}

impl ComponentKind {
    /// An emitter with no override (always on).
    pub fn emitter() -> Self {
        ComponentKind::Emitter {
            forced_output: None,
        }
    }

    pub fn is_emitter(&self) -> bool {
        matches!(self, ComponentKind::Emitter { .. })
    }

    pub fn is_receiver(&self) -> bool {
        matches!(self, ComponentKind::Receiver)
    }

    /// Gates are the only kinds whose previous output seeds the next tick.
    pub fn gate(&self) -> Option<GateKind> {
        match self {
            ComponentKind::Gate(gate) => Some(*gate),
            _ => None,
        }
    }
}

impl From<GateKind> for ComponentKind {
    fn from(gate: GateKind) -> Self {
        ComponentKind::Gate(gate)
    }
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

/// A component placed on one grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub kind: ComponentKind,
    pub position: GridPosition,
    /// Current signal value. Written once per tick by the evaluator (or the
    /// emitter rule), read as a source on the following tick.
    pub output: bool,
}

impl Component {
    pub fn new(kind: ComponentKind, position: GridPosition) -> Self {
        Self {
            kind,
            position,
            output: false,
        }
    }

    /// The value an emitter drives this tick: its override if present,
    /// otherwise `true`. `None` for non-emitters.
    pub fn effective_emitter_value(&self) -> Option<bool> {
        match self.kind {
            ComponentKind::Emitter { forced_output } => Some(forced_output.unwrap_or(true)),
            _ => None,
        }
    }

    /// Whether this component's position joins the active source set for a
    /// tick, judged from its current (pre-tick) state.
    pub fn is_active_source(&self) -> bool {
        match self.kind {
            ComponentKind::Emitter { forced_output } => forced_output.unwrap_or(true),
            ComponentKind::Gate(_) => self.output,
            ComponentKind::Receiver => false,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
