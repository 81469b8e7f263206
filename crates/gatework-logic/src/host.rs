//! The simulation shell the host application drives.
//!
//! [`CircuitHost`] owns a [`Circuit`] and a [`LogicEngine`] and exposes the
//! surfaces the outer collaborators use: the host clock steps it, the editor
//! mutates the circuit between steps, the renderer reads signal state, and
//! the objective validator pins emitters, reads receivers and resets.

use gatework_core::circuit::{Circuit, CircuitError};
use gatework_core::config::EngineConfig;
use gatework_core::grid::GridPosition;
use gatework_core::id::ComponentId;
use gatework_core::serialize::{self, DeserializeError, SerializeError};
use gatework_core::sim::{SimState, TickCadence, Ticks, circuit_hash};

use crate::{LogicEngine, LogicEvent, TickReport};

#[derive(Debug, Default)]
pub struct CircuitHost {
    circuit: Circuit,
    engine: LogicEngine,
    sim_state: SimState,
    cadence: TickCadence,
    /// Events from the most recent tick, available until the next tick.
    last_events: Vec<LogicEvent>,
}

impl CircuitHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            engine: LogicEngine::with_config(config),
            cadence: config.cadence(),
            ..Self::default()
        }
    }

    /// Wrap an existing circuit.
    pub fn from_circuit(circuit: Circuit, config: &EngineConfig) -> Self {
        Self {
            circuit,
            ..Self::with_config(config)
        }
    }

    // -- Access --

    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Mutable access for the editor. Must not overlap a tick, which the
    /// borrow rules already guarantee.
    pub fn circuit_mut(&mut self) -> &mut Circuit {
        &mut self.circuit
    }

    pub fn tick(&self) -> Ticks {
        self.sim_state.tick
    }

    pub fn cadence(&self) -> TickCadence {
        self.cadence
    }

    pub fn last_events(&self) -> &[LogicEvent] {
        &self.last_events
    }

    pub fn last_report(&self) -> Option<&TickReport> {
        self.engine.last_report()
    }

    // -- Clock --

    /// Run one tick unconditionally.
    pub fn step(&mut self) {
        self.sim_state.tick += 1;
        self.last_events = self.engine.tick(&mut self.circuit, self.sim_state.tick);
    }

    /// Called by the host once per frame. Runs a tick when the frame counter
    /// lands on the cadence; returns whether it did.
    pub fn on_frame(&mut self, frame: u64) -> bool {
        if !self.cadence.is_tick_frame(frame) {
            return false;
        }
        self.step();
        true
    }

    // -- Objective validation --

    /// Pin an emitter to a value, or release it with `None`.
    pub fn set_forced_output(
        &mut self,
        id: ComponentId,
        value: Option<bool>,
    ) -> Result<(), CircuitError> {
        self.circuit.set_forced_output(id, value)
    }

    /// Observed receiver values, ordered by position.
    pub fn receiver_values(&self) -> Vec<(ComponentId, GridPosition, bool)> {
        self.circuit.receivers()
    }

    /// Zero all signal state and release every emitter override. Structure
    /// and the tick counter are kept.
    pub fn reset(&mut self) {
        self.circuit.reset_signals();
        self.engine.clear_report();
        self.last_events.clear();
    }

    // -- Determinism and persistence --

    pub fn state_hash(&self) -> u64 {
        circuit_hash(&self.circuit)
    }

    pub fn save(&self) -> Result<Vec<u8>, SerializeError> {
        serialize::encode(&self.circuit, &self.sim_state)
    }

    /// Replace the circuit and tick counter with a saved snapshot. On error
    /// the host is left untouched.
    pub fn load(&mut self, data: &[u8]) -> Result<(), DeserializeError> {
        let snapshot = serialize::decode(data)?;
        self.circuit = snapshot.circuit;
        self.sim_state = snapshot.sim_state;
        self.engine.clear_report();
        self.last_events.clear();
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================
