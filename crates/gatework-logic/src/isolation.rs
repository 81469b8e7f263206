//! Isolation-aware input tally.
//!
//! A wire touching a component only counts as an input if its energization
//! traces back to a source cell other than the component's own. Each check
//! is an independent breadth-first search over energized wires, so two
//! components see each other as sources while neither ever sees itself.

use std::collections::{BTreeSet, VecDeque};

use gatework_core::circuit::Circuit;
use gatework_core::grid::GridPosition;
use gatework_core::id::{ComponentId, WireId};
use slotmap::SecondaryMap;

use crate::propagation::{SourceSet, connected};

/// Whether the energized wire `start` is powered from some source cell other
/// than `home`. Walks energized wires reachable through [`connected`]
/// junctions, visiting each wire at most once.
pub fn is_external_input(
    circuit: &Circuit,
    start: WireId,
    home: GridPosition,
    sources: &SourceSet,
) -> bool {
    let Some(first) = circuit.wire(start) else {
        return false;
    };
    if !first.energized {
        return false;
    }

    let mut visited: BTreeSet<WireId> = BTreeSet::new();
    let mut queue: VecDeque<WireId> = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);

    while let Some(id) = queue.pop_front() {
        let Some(current) = circuit.wire(id) else {
            continue;
        };
        if current
            .endpoints()
            .iter()
            .any(|p| *p != home && sources.contains(p))
        {
            return true;
        }
        for (next_id, next) in circuit.wires() {
            if next.energized && !visited.contains(&next_id) && connected(circuit, current, next) {
                visited.insert(next_id);
                queue.push_back(next_id);
            }
        }
    }
    false
}

/// Number of energized wires touching `home` that are powered from
/// elsewhere.
pub fn external_input_count(circuit: &Circuit, home: GridPosition, sources: &SourceSet) -> u32 {
    circuit
        .wires_touching(home)
        .filter(|(_, w)| w.energized)
        .filter(|&(id, _)| is_external_input(circuit, id, home, sources))
        .count() as u32
}

/// External input counts for every non-emitter component.
pub fn tally_external_inputs(
    circuit: &Circuit,
    sources: &SourceSet,
) -> SecondaryMap<ComponentId, u32> {
    let mut tally = SecondaryMap::new();
    for (id, component) in circuit.components() {
        if component.kind.is_emitter() {
            continue;
        }
        tally.insert(id, external_input_count(circuit, component.position, sources));
    }
    tally
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagation::{collect_sources, flood_fill};
    use gatework_core::component::GateKind;
    use gatework_core::test_utils::*;

    fn energize(circuit: &mut Circuit) -> SourceSet {
        let sources = collect_sources(circuit);
        flood_fill(circuit, &sources, 100);
        sources
    }

    #[test]
    fn component_without_wires_has_no_inputs() {
        let mut circuit = Circuit::new();
        let g = gate(&mut circuit, GateKind::And, 0, 0);
        let sources = energize(&mut circuit);
        let tally = tally_external_inputs(&circuit, &sources);
        assert_eq!(tally[g], 0);
    }

    #[test]
    fn emitters_are_not_tallied() {
        let mut circuit = Circuit::new();
        let e = emitter(&mut circuit, 0, 0);
        let sources = energize(&mut circuit);
        let tally = tally_external_inputs(&circuit, &sources);
        assert!(!tally.contains_key(e));
    }

    #[test]
    fn direct_emitter_wire_is_external() {
        let mut circuit = Circuit::new();
        emitter(&mut circuit, 0, 0);
        let g = gate(&mut circuit, GateKind::Or, 3, 0);
        wire_path(&mut circuit, &[(0, 0), (1, 0), (2, 0), (3, 0)]);

        let sources = energize(&mut circuit);
        assert_eq!(tally_external_inputs(&circuit, &sources)[g], 1);
    }

    #[test]
    fn each_touching_wire_counts_separately() {
        let mut circuit = Circuit::new();
        emitter(&mut circuit, 0, 0);
        emitter(&mut circuit, 0, 2);
        let g = gate(&mut circuit, GateKind::And, 1, 1);
        wire_path(&mut circuit, &[(0, 0), (1, 0), (1, 1)]);
        wire_path(&mut circuit, &[(0, 2), (1, 2), (1, 1)]);

        let sources = energize(&mut circuit);
        assert_eq!(tally_external_inputs(&circuit, &sources)[g], 2);
    }

    #[test]
    fn own_output_looping_back_is_not_an_input() {
        for kind in GateKind::all() {
            let mut circuit = Circuit::new();
            let g = gate(&mut circuit, kind, 0, 0);
            circuit.component_mut(g).unwrap().output = true;
            wire_path(&mut circuit, &[(0, 0), (1, 0), (1, 1), (0, 1), (0, 0)]);

            let sources = energize(&mut circuit);
            assert!(circuit.wires().all(|(_, w)| w.energized));
            assert_eq!(
                tally_external_inputs(&circuit, &sources)[g],
                0,
                "{kind:?} counted its own output"
            );
        }
    }

    #[test]
    fn two_high_gates_see_each_other() {
        let mut circuit = Circuit::new();
        let a = gate(&mut circuit, GateKind::Or, 0, 0);
        let b = gate(&mut circuit, GateKind::Or, 2, 0);
        circuit.component_mut(a).unwrap().output = true;
        circuit.component_mut(b).unwrap().output = true;
        wire_path(&mut circuit, &[(0, 0), (1, 0), (2, 0)]);

        let sources = energize(&mut circuit);
        let tally = tally_external_inputs(&circuit, &sources);
        assert_eq!(tally[a], 1);
        assert_eq!(tally[b], 1);
    }

    #[test]
    fn traversal_stops_at_other_components() {
        // Emitter -> OR -> receiver: the receiver's wire is energized by the
        // high OR gate, not by the emitter behind it.
        let mut circuit = Circuit::new();
        emitter(&mut circuit, 0, 0);
        let or = gate(&mut circuit, GateKind::Or, 1, 0);
        let rx = receiver(&mut circuit, 2, 0);
        wire(&mut circuit, (0, 0), (1, 0));
        wire(&mut circuit, (1, 0), (2, 0));

        let sources = energize(&mut circuit);
        let tally = tally_external_inputs(&circuit, &sources);
        assert_eq!(tally[or], 1);
        assert_eq!(tally[rx], 0);
    }

    #[test]
    fn unenergized_start_wire_is_never_external() {
        let mut circuit = Circuit::new();
        emitter(&mut circuit, 0, 0);
        let w = wire(&mut circuit, (0, 0), (1, 0));
        let sources = collect_sources(&circuit);
        assert!(!is_external_input(&circuit, w, pos(1, 0), &sources));
    }
}
