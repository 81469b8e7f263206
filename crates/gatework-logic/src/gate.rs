//! Gate evaluation.
//!
//! Maps a component's kind and external input count to its next output.
//! New outputs are gathered into a buffer from the pre-tick state and only
//! committed once every component has been evaluated, so no component can
//! observe another's output from the same tick.

use gatework_core::circuit::Circuit;
use gatework_core::component::{ComponentKind, GateKind};
use gatework_core::id::ComponentId;
use slotmap::SecondaryMap;

/// Truth rule for a gate given `n` external inputs.
pub fn evaluate_gate(gate: GateKind, n: u32) -> bool {
    match gate {
        GateKind::And => n >= 2,
        GateKind::Or => n >= 1,
        GateKind::Xor => n == 1,
        // A gate never counts its own output, so NOT cannot latch itself.
        GateKind::Not => n == 0,
    }
}

/// Next output for a non-emitter component. `None` for emitters, whose
/// value comes from their override instead.
pub fn evaluate(kind: &ComponentKind, n: u32) -> Option<bool> {
    match kind {
        ComponentKind::Emitter { .. } => None,
        ComponentKind::Gate(gate) => Some(evaluate_gate(*gate, n)),
        ComponentKind::Receiver => Some(n >= 1),
    }
}

/// The outputs every component will hold after this tick.
#[derive(Debug, Clone, Default)]
pub struct OutputBuffer {
    next: Vec<(ComponentId, bool)>,
}

impl OutputBuffer {
    /// Evaluate every component against the tally. Emitters take their
    /// effective value; components missing from the tally count zero inputs.
    pub fn evaluate(circuit: &Circuit, tally: &SecondaryMap<ComponentId, u32>) -> Self {
        let next = circuit
            .components()
            .map(|(id, component)| {
                let value = match component.effective_emitter_value() {
                    Some(value) => value,
                    None => {
                        let n = tally.get(id).copied().unwrap_or(0);
                        evaluate(&component.kind, n).unwrap_or(false)
                    }
                };
                (id, value)
            })
            .collect();
        Self { next }
    }

    pub fn get(&self, id: ComponentId) -> Option<bool> {
        self.next
            .iter()
            .find(|&&(other, _)| other == id)
            .map(|&(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.next.len()
    }

    pub fn is_empty(&self) -> bool {
        self.next.is_empty()
    }

    /// Write every buffered output into the circuit. Returns the components
    /// whose output changed, with their new value.
    pub fn commit(self, circuit: &mut Circuit) -> Vec<(ComponentId, bool)> {
        let mut changed = Vec::new();
        for (id, value) in self.next {
            if let Some(component) = circuit.component_mut(id) {
                if component.output != value {
                    component.output = value;
                    changed.push((id, value));
                }
            }
        }
        changed
    }
}

// ===========================================================================
// Tests
// ===========================================================================
