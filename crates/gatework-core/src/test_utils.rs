//! Shared test helpers for integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]`.

use crate::circuit::Circuit;
use crate::component::{ComponentKind, GateKind};
use crate::grid::GridPosition;
use crate::id::{ComponentId, WireId};

pub fn pos(x: i32, y: i32) -> GridPosition {
    GridPosition::new(x, y)
}

pub fn emitter(circuit: &mut Circuit, x: i32, y: i32) -> ComponentId {
    circuit.add_component(ComponentKind::emitter(), pos(x, y))
}

/// An emitter pinned to `value`.
pub fn forced_emitter(circuit: &mut Circuit, x: i32, y: i32, value: bool) -> ComponentId {
    circuit.add_component(
        ComponentKind::Emitter {
            forced_output: Some(value),
        },
        pos(x, y),
    )
}

pub fn gate(circuit: &mut Circuit, kind: GateKind, x: i32, y: i32) -> ComponentId {
    circuit.add_component(ComponentKind::Gate(kind), pos(x, y))
}

pub fn receiver(circuit: &mut Circuit, x: i32, y: i32) -> ComponentId {
    circuit.add_component(ComponentKind::Receiver, pos(x, y))
}

pub fn wire(circuit: &mut Circuit, from: (i32, i32), to: (i32, i32)) -> WireId {
    circuit.add_wire(GridPosition::from(from), GridPosition::from(to))
}

/// Wire a path through consecutive cells, one wire per hop.
pub fn wire_path(circuit: &mut Circuit, cells: &[(i32, i32)]) -> Vec<WireId> {
    cells
        .windows(2)
        .map(|hop| wire(circuit, hop[0], hop[1]))
        .collect()
}

pub fn output(circuit: &Circuit, id: ComponentId) -> bool {
    circuit.component(id).map(|c| c.output).unwrap_or(false)
}

pub fn energized(circuit: &Circuit, id: WireId) -> bool {
    circuit.wire(id).map(|w| w.energized).unwrap_or(false)
}

/// A `width` x `height` lattice: emitters down the left column, receivers
/// down the right, gates cycling through every kind in between, and a wire
/// between every horizontally or vertically adjacent pair of cells.
pub fn make_lattice(width: i32, height: i32) -> Circuit {
    let mut circuit = Circuit::new();
    let kinds = GateKind::all();
    for y in 0..height {
        for x in 0..width {
            if x == 0 {
                emitter(&mut circuit, x, y);
            } else if x == width - 1 {
                receiver(&mut circuit, x, y);
            } else if (x + y) % 3 == 0 {
                let kind = kinds[((x * 7 + y) as usize) % kinds.len()];
                gate(&mut circuit, kind, x, y);
            }
            if x + 1 < width {
                wire(&mut circuit, (x, y), (x + 1, y));
            }
            if y + 1 < height {
                wire(&mut circuit, (x, y), (x, y + 1));
            }
        }
    }
    circuit
}
