//! Wire energization: source seeding and the bounded flood fill.
//!
//! Energization spreads wire-to-wire only through free junctions. A cell
//! with a component on it still energizes wires touching it when it is an
//! active source, but never relays a signal from one of its wires to
//! another within the same tick; the component has to re-emit it as its own
//! output on a later tick.

use std::collections::BTreeSet;

use gatework_core::circuit::Circuit;
use gatework_core::grid::GridPosition;
use gatework_core::wire::Wire;
use serde::{Deserialize, Serialize};

/// Cells supplying an active signal this tick.
pub type SourceSet = BTreeSet<GridPosition>;

/// Result of one flood fill.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FloodOutcome {
    /// Passes actually run.
    pub passes: u32,
    /// `false` only if the pass bound stopped the fill while another pass
    /// would still have energized something. Reaching the bound exactly at
    /// the fixed point counts as converged.
    pub converged: bool,
    /// Energized wire count after each pass. Never decreases.
    pub energized_after_pass: Vec<usize>,
}

impl FloodOutcome {
    pub fn energized_wires(&self) -> usize {
        self.energized_after_pass.last().copied().unwrap_or(0)
    }
}

/// Positions of every component that sources a signal this tick: active
/// emitters and gates whose previous output is high. Receivers never do.
pub fn collect_sources(circuit: &Circuit) -> SourceSet {
    circuit
        .components()
        .filter(|(_, c)| c.is_active_source())
        .map(|(_, c)| c.position)
        .collect()
}

/// Whether energization passes directly between two wires: they meet at
/// exactly one cell, and nothing is placed on it.
pub fn connected(circuit: &Circuit, a: &Wire, b: &Wire) -> bool {
    a.shared_endpoint(b)
        .is_some_and(|junction| !circuit.is_occupied(junction))
}

pub fn clear_energization(circuit: &mut Circuit) {
    for (_, wire) in circuit.wires_mut() {
        wire.energized = false;
    }
}

/// Whether another pass would energize any wire: an unlit wire touches a
/// source or is connected to a lit one.
fn pass_would_change(
    circuit: &Circuit,
    wires: &[&Wire],
    energized: &[bool],
    sources: &SourceSet,
) -> bool {
    wires.iter().enumerate().any(|(j, wire)| {
        !energized[j]
            && (wire.endpoints().iter().any(|p| sources.contains(p))
                || wires
                    .iter()
                    .zip(energized)
                    .any(|(lit, &on)| on && connected(circuit, lit, wire)))
    })
}

/// Energize every wire reachable from the source set, running at most
/// `max_passes` passes. Each pass first energizes wires with an end on a
/// source cell, then spreads along [`connected`] wires. Wires are never
/// de-energized here; call [`clear_energization`] first.
///
/// Stopping at the bound leaves the circuit under-energized, never over.
pub fn flood_fill(circuit: &mut Circuit, sources: &SourceSet, max_passes: u32) -> FloodOutcome {
    let mut outcome = FloodOutcome::default();

    let energized = {
        let wires: Vec<&Wire> = circuit.wires().map(|(_, w)| w).collect();
        let mut energized: Vec<bool> = wires.iter().map(|w| w.energized).collect();

        for pass in 1..=max_passes {
            let mut changed = false;

            // Source pass.
            for (i, wire) in wires.iter().enumerate() {
                if !energized[i] && wire.endpoints().iter().any(|p| sources.contains(p)) {
                    energized[i] = true;
                    changed = true;
                }
            }

            // Propagation pass.
            for i in 0..wires.len() {
                if !energized[i] {
                    continue;
                }
                for j in 0..wires.len() {
                    if !energized[j] && connected(circuit, wires[i], wires[j]) {
                        energized[j] = true;
                        changed = true;
                    }
                }
            }

            outcome.passes = pass;
            outcome
                .energized_after_pass
                .push(energized.iter().filter(|&&e| e).count());

            if !changed {
                outcome.converged = true;
                break;
            }
        }

        if !outcome.converged {
            outcome.converged = !pass_would_change(circuit, &wires, &energized, sources);
        }
        energized
    };

    for ((_, wire), on) in circuit.wires_mut().zip(energized) {
        wire.energized = on;
    }
    outcome
}

// ===========================================================================
// Tests
// ===========================================================================
