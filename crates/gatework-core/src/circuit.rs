//! The circuit model: every component and wire of one puzzle instance.
//!
//! Components and wires live in generational arenas keyed by [`ComponentId`]
//! and [`WireId`]. A position index keeps, per occupied cell, the components
//! placed there in placement order. It is updated synchronously by every
//! mutation and saved with the circuit, so the circuit is always ready for
//! the next tick.
//!
//! Two layers of mutation are offered:
//!
//! - Raw entry points ([`Circuit::add_component`], [`Circuit::add_wire`], ...)
//!   accept anything. Overlapping placements resolve last-write-wins in
//!   lookups; degenerate wires are stored as given.
//! - Checked entry points ([`Circuit::place_component`], [`Circuit::connect`],
//!   [`Circuit::demolish`]) apply the editor's rejection rules and return a
//!   [`CircuitError`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use crate::component::{Component, ComponentKind};
use crate::grid::GridPosition;
use crate::id::{ComponentId, WireId};
use crate::wire::{Wire, WireEnd};

/// Errors from checked editing operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CircuitError {
    #[error("cell {0} is already occupied")]
    Occupied(GridPosition),
    #[error("wire would start and end at {0}")]
    DegenerateWire(GridPosition),
    #[error("nothing placed at {0}")]
    NothingAt(GridPosition),
    #[error("component does not exist")]
    UnknownComponent,
    #[error("component is not an emitter")]
    NotAnEmitter,
}

// ---------------------------------------------------------------------------
// Circuit
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Circuit {
    components: SlotMap<ComponentId, Component>,
    wires: SlotMap<WireId, Wire>,
    /// Cell -> components placed on it, oldest first. The last entry is the
    /// visible one. Arena slot order says nothing about placement order once
    /// slots are reused, so the order is kept here.
    occupancy: BTreeMap<GridPosition, Vec<ComponentId>>,
}

impl Circuit {
    /// Create an empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    // -- Raw mutation --

    /// Place a component. If the cell is already occupied the new component
    /// shadows the old one in [`Circuit::component_at`].
    pub fn add_component(&mut self, kind: ComponentKind, position: GridPosition) -> ComponentId {
        let id = self.components.insert(Component::new(kind, position));
        self.occupancy.entry(position).or_default().push(id);
        id
    }

    /// Remove a component. Wires touching its cell are left in place. If it
    /// shadowed an earlier placement on the same cell, that one is visible
    /// again.
    pub fn remove_component(&mut self, id: ComponentId) -> Option<Component> {
        let removed = self.components.remove(id)?;
        if let Some(stack) = self.occupancy.get_mut(&removed.position) {
            stack.retain(|other| *other != id);
            if stack.is_empty() {
                self.occupancy.remove(&removed.position);
            }
        }
        Some(removed)
    }

    /// Draw a wire between two cells.
    pub fn add_wire(&mut self, start: impl Into<WireEnd>, end: impl Into<WireEnd>) -> WireId {
        self.wires.insert(Wire::new(start, end))
    }

    /// Remove a wire.
    pub fn remove_wire(&mut self, id: WireId) -> Option<Wire> {
        self.wires.remove(id)
    }

    /// Remove every component and wire.
    pub fn clear(&mut self) {
        self.components.clear();
        self.wires.clear();
        self.occupancy.clear();
    }

    // -- Checked mutation --

    /// Place a component, refusing occupied cells.
    pub fn place_component(
        &mut self,
        kind: ComponentKind,
        position: GridPosition,
    ) -> Result<ComponentId, CircuitError> {
        if self.is_occupied(position) {
            return Err(CircuitError::Occupied(position));
        }
        Ok(self.add_component(kind, position))
    }

    /// Draw a wire, refusing zero-length ones.
    pub fn connect(
        &mut self,
        start: impl Into<WireEnd>,
        end: impl Into<WireEnd>,
    ) -> Result<WireId, CircuitError> {
        let start = start.into();
        let end = end.into();
        if start.position == end.position {
            return Err(CircuitError::DegenerateWire(start.position));
        }
        Ok(self.add_wire(start, end))
    }

    /// Clear a cell: the component on it and every wire touching it.
    /// Returns the number of wires removed.
    pub fn demolish(&mut self, position: GridPosition) -> Result<usize, CircuitError> {
        let component = self.component_at(position).map(|(id, _)| id);
        let touching: Vec<WireId> = self.wires_touching(position).map(|(id, _)| id).collect();
        if component.is_none() && touching.is_empty() {
            return Err(CircuitError::NothingAt(position));
        }
        if let Some(id) = component {
            self.remove_component(id);
        }
        for id in &touching {
            self.wires.remove(*id);
        }
        Ok(touching.len())
    }

    /// Pin an emitter to a value (`Some`) or restore its default (`None`).
    pub fn set_forced_output(
        &mut self,
        id: ComponentId,
        value: Option<bool>,
    ) -> Result<(), CircuitError> {
        let component = self
            .components
            .get_mut(id)
            .ok_or(CircuitError::UnknownComponent)?;
        match &mut component.kind {
            ComponentKind::Emitter { forced_output } => {
                *forced_output = value;
                Ok(())
            }
            _ => Err(CircuitError::NotAnEmitter),
        }
    }

    /// Zero every output and energized flag and drop every emitter override.
    pub fn reset_signals(&mut self) {
        for component in self.components.values_mut() {
            component.output = false;
            if let ComponentKind::Emitter { forced_output } = &mut component.kind {
                *forced_output = None;
            }
        }
        for wire in self.wires.values_mut() {
            wire.energized = false;
        }
    }

    // -- Queries --

    /// Get a component by ID.
    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(id)
    }

    /// Get a mutable reference to a component by ID.
    pub fn component_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.components.get_mut(id)
    }

    /// Get a wire by ID.
    pub fn wire(&self, id: WireId) -> Option<&Wire> {
        self.wires.get(id)
    }

    /// Get a mutable reference to a wire by ID.
    pub fn wire_mut(&mut self, id: WireId) -> Option<&mut Wire> {
        self.wires.get_mut(id)
    }

    /// The component standing on a cell: the latest placement still there.
    pub fn component_at(&self, position: GridPosition) -> Option<(ComponentId, &Component)> {
        let id = *self.occupancy.get(&position)?.last()?;
        self.components.get(id).map(|c| (id, c))
    }

    /// Whether any component stands on a cell.
    pub fn is_occupied(&self, position: GridPosition) -> bool {
        self.occupancy.contains_key(&position)
    }

    /// Every wire with an end on the given cell.
    pub fn wires_touching(&self, position: GridPosition) -> impl Iterator<Item = (WireId, &Wire)> {
        self.wires.iter().filter(move |(_, w)| w.touches(position))
    }

    /// Iterate over all components.
    pub fn components(&self) -> impl Iterator<Item = (ComponentId, &Component)> {
        self.components.iter()
    }

    /// Iterate mutably over all components.
    pub fn components_mut(&mut self) -> impl Iterator<Item = (ComponentId, &mut Component)> {
        self.components.iter_mut()
    }

    /// Iterate over all wires.
    pub fn wires(&self) -> impl Iterator<Item = (WireId, &Wire)> {
        self.wires.iter()
    }

    /// Iterate mutably over all wires.
    pub fn wires_mut(&mut self) -> impl Iterator<Item = (WireId, &mut Wire)> {
        self.wires.iter_mut()
    }

    /// Receivers with their observed value, ordered by position.
    pub fn receivers(&self) -> Vec<(ComponentId, GridPosition, bool)> {
        let mut out: Vec<_> = self
            .components
            .iter()
            .filter(|(_, c)| c.kind.is_receiver())
            .map(|(id, c)| (id, c.position, c.output))
            .collect();
        out.sort_by_key(|&(_, pos, _)| pos);
        out
    }

    /// Number of placed components.
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Number of wires.
    pub fn wire_count(&self) -> usize {
        self.wires.len()
    }

    /// Whether the circuit has no components and no wires.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.wires.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::GateKind;

    fn p(x: i32, y: i32) -> GridPosition {
        GridPosition::new(x, y)
    }

    #[test]
    fn empty_circuit_queries_return_nothing() {
        let circuit = Circuit::new();
        assert!(circuit.is_empty());
        assert!(circuit.component_at(p(0, 0)).is_none());
        assert_eq!(circuit.wires_touching(p(0, 0)).count(), 0);
        assert!(circuit.receivers().is_empty());
    }

    #[test]
    fn component_lookup_by_cell() {
        let mut circuit = Circuit::new();
        let id = circuit.add_component(GateKind::And.into(), p(2, 3));

        let (found, component) = circuit.component_at(p(2, 3)).unwrap();
        assert_eq!(found, id);
        assert_eq!(component.kind, ComponentKind::Gate(GateKind::And));
        assert!(circuit.component_at(p(3, 2)).is_none());
    }

    #[test]
    fn overlapping_placement_is_last_write_wins() {
        let mut circuit = Circuit::new();
        let first = circuit.add_component(GateKind::Or.into(), p(0, 0));
        let second = circuit.add_component(ComponentKind::Receiver, p(0, 0));
        assert_eq!(circuit.component_at(p(0, 0)).unwrap().0, second);

        // Removing the visible one uncovers the shadowed one.
        circuit.remove_component(second);
        assert_eq!(circuit.component_at(p(0, 0)).unwrap().0, first);

        circuit.remove_component(first);
        assert!(circuit.component_at(p(0, 0)).is_none());
    }

    #[test]
    fn removing_shadowed_component_keeps_visible_one() {
        let mut circuit = Circuit::new();
        let first = circuit.add_component(GateKind::Or.into(), p(0, 0));
        let second = circuit.add_component(GateKind::Not.into(), p(0, 0));
        circuit.remove_component(first);
        assert_eq!(circuit.component_at(p(0, 0)).unwrap().0, second);
    }

    #[test]
    fn wires_touching_matches_either_end() {
        let mut circuit = Circuit::new();
        let a = circuit.add_wire(p(0, 0), p(1, 0));
        let b = circuit.add_wire(p(2, 0), p(1, 0));
        let _c = circuit.add_wire(p(5, 5), p(6, 5));

        let mut touching: Vec<WireId> = circuit.wires_touching(p(1, 0)).map(|(id, _)| id).collect();
        touching.sort();
        let mut expected = vec![a, b];
        expected.sort();
        assert_eq!(touching, expected);
    }

    #[test]
    fn remove_wire_and_component() {
        let mut circuit = Circuit::new();
        let c = circuit.add_component(ComponentKind::emitter(), p(0, 0));
        let w = circuit.add_wire(p(0, 0), p(1, 0));

        assert!(circuit.remove_wire(w).is_some());
        assert!(circuit.remove_wire(w).is_none());
        assert!(circuit.remove_component(c).is_some());
        assert!(circuit.remove_component(c).is_none());
        assert!(circuit.is_empty());
    }

    #[test]
    fn place_component_rejects_occupied_cell() {
        let mut circuit = Circuit::new();
        circuit
            .place_component(ComponentKind::emitter(), p(0, 0))
            .unwrap();
        let err = circuit
            .place_component(ComponentKind::Receiver, p(0, 0))
            .unwrap_err();
        assert_eq!(err, CircuitError::Occupied(p(0, 0)));
        assert_eq!(circuit.component_count(), 1);
    }

    #[test]
    fn connect_rejects_degenerate_wire() {
        let mut circuit = Circuit::new();
        let err = circuit.connect(p(4, 4), p(4, 4)).unwrap_err();
        assert_eq!(err, CircuitError::DegenerateWire(p(4, 4)));
        assert_eq!(circuit.wire_count(), 0);
        assert!(circuit.connect(p(4, 4), p(4, 5)).is_ok());
    }

    #[test]
    fn demolish_removes_component_and_touching_wires() {
        let mut circuit = Circuit::new();
        circuit.add_component(GateKind::Xor.into(), p(1, 0));
        circuit.add_wire(p(0, 0), p(1, 0));
        circuit.add_wire(p(1, 0), p(2, 0));
        let keep = circuit.add_wire(p(0, 0), p(0, 1));

        assert_eq!(circuit.demolish(p(1, 0)), Ok(2));
        assert!(circuit.component_at(p(1, 0)).is_none());
        assert_eq!(circuit.wire_count(), 1);
        assert!(circuit.wire(keep).is_some());

        assert_eq!(circuit.demolish(p(1, 0)), Err(CircuitError::NothingAt(p(1, 0))));
    }

    #[test]
    fn forced_output_only_on_emitters() {
        let mut circuit = Circuit::new();
        let emitter = circuit.add_component(ComponentKind::emitter(), p(0, 0));
        let gate = circuit.add_component(GateKind::And.into(), p(1, 0));

        circuit.set_forced_output(emitter, Some(false)).unwrap();
        assert_eq!(
            circuit.component(emitter).unwrap().kind,
            ComponentKind::Emitter {
                forced_output: Some(false)
            }
        );
        assert_eq!(
            circuit.set_forced_output(gate, Some(true)),
            Err(CircuitError::NotAnEmitter)
        );

        circuit.remove_component(emitter);
        assert_eq!(
            circuit.set_forced_output(emitter, None),
            Err(CircuitError::UnknownComponent)
        );
    }

    #[test]
    fn reset_signals_clears_state_and_overrides() {
        let mut circuit = Circuit::new();
        let emitter = circuit.add_component(ComponentKind::emitter(), p(0, 0));
        let receiver = circuit.add_component(ComponentKind::Receiver, p(1, 0));
        let wire = circuit.add_wire(p(0, 0), p(1, 0));

        circuit.set_forced_output(emitter, Some(true)).unwrap();
        circuit.component_mut(emitter).unwrap().output = true;
        circuit.component_mut(receiver).unwrap().output = true;
        circuit.wire_mut(wire).unwrap().energized = true;

        circuit.reset_signals();

        assert_eq!(
            circuit.component(emitter).unwrap().kind,
            ComponentKind::emitter()
        );
        assert!(!circuit.component(emitter).unwrap().output);
        assert!(!circuit.component(receiver).unwrap().output);
        assert!(!circuit.wire(wire).unwrap().energized);
    }

    #[test]
    fn receivers_sorted_by_position() {
        let mut circuit = Circuit::new();
        let far = circuit.add_component(ComponentKind::Receiver, p(9, 0));
        let near = circuit.add_component(ComponentKind::Receiver, p(1, 0));
        circuit.add_component(GateKind::Or.into(), p(5, 0));

        let ids: Vec<ComponentId> = circuit.receivers().into_iter().map(|(id, _, _)| id).collect();
        assert_eq!(ids, vec![near, far]);
    }

    #[test]
    fn removal_uncovers_latest_remaining_placement_after_slot_reuse() {
        let mut circuit = Circuit::new();
        let elsewhere = circuit.add_component(ComponentKind::Receiver, p(9, 9));
        let or = circuit.add_component(GateKind::Or.into(), p(0, 0));
        circuit.remove_component(elsewhere);
        // Reuses the freed slot, which sorts before the OR gate's.
        let not = circuit.add_component(GateKind::Not.into(), p(0, 0));
        let xor = circuit.add_component(GateKind::Xor.into(), p(0, 0));
        assert_eq!(circuit.component_at(p(0, 0)).unwrap().0, xor);

        circuit.remove_component(xor);
        assert_eq!(circuit.component_at(p(0, 0)).unwrap().0, not);
        circuit.remove_component(not);
        assert_eq!(circuit.component_at(p(0, 0)).unwrap().0, or);
        circuit.remove_component(or);
        assert!(!circuit.is_occupied(p(0, 0)));
    }
}
