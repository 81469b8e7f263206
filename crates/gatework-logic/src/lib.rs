//! Propagation and gate evaluation for gatework circuits.
//!
//! One call to [`LogicEngine::tick`] runs the whole per-tick pipeline:
//!
//! 1. **Clear** -- every wire is de-energized.
//! 2. **Seed** -- active emitters and gates whose previous output is high
//!    become source cells.
//! 3. **Flood** -- energization spreads from source cells through free
//!    junctions until nothing changes or the pass bound is hit.
//! 4. **Tally** -- each non-emitter counts touching wires powered from some
//!    cell other than its own.
//! 5. **Evaluate** -- new outputs are computed from the tally and committed
//!    together.
//!
//! Gate outputs act as sources only on the following tick, so a signal
//! advances one component hop per tick and feedback loops cannot diverge.

pub mod gate;
pub mod host;
pub mod isolation;
pub mod propagation;

use gatework_core::circuit::Circuit;
use gatework_core::config::{DEFAULT_MAX_FLOOD_PASSES, EngineConfig};
use gatework_core::id::ComponentId;
use gatework_core::sim::Ticks;
use serde::{Deserialize, Serialize};
use slotmap::SecondaryMap;

use gate::OutputBuffer;
use propagation::{FloodOutcome, SourceSet};

pub use host::CircuitHost;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Events emitted by the logic engine on state transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicEvent {
    /// A component's committed output differs from the previous tick.
    OutputChanged {
        component: ComponentId,
        output: bool,
        tick: Ticks,
    },
    /// The flood fill stopped at its pass bound before settling.
    FloodBoundReached { passes: u32, tick: Ticks },
}

// ---------------------------------------------------------------------------
// Tick report
// ---------------------------------------------------------------------------

/// What the most recent tick computed, kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    pub tick: Ticks,
    pub sources: SourceSet,
    pub flood: FloodOutcome,
    /// External input count per non-emitter component.
    pub external_inputs: SecondaryMap<ComponentId, u32>,
}

impl TickReport {
    pub fn external_inputs_of(&self, id: ComponentId) -> Option<u32> {
        self.external_inputs.get(id).copied()
    }
}

// ---------------------------------------------------------------------------
// Logic engine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct LogicEngine {
    max_flood_passes: u32,
    last_report: Option<TickReport>,
}

impl Default for LogicEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LogicEngine {
    pub fn new() -> Self {
        Self {
            max_flood_passes: DEFAULT_MAX_FLOOD_PASSES,
            last_report: None,
        }
    }

    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            max_flood_passes: config.max_flood_passes.max(1),
            last_report: None,
        }
    }

    pub fn max_flood_passes(&self) -> u32 {
        self.max_flood_passes
    }

    pub fn last_report(&self) -> Option<&TickReport> {
        self.last_report.as_ref()
    }

    pub fn clear_report(&mut self) {
        self.last_report = None;
    }

    /// Advance the circuit by one tick.
    ///
    /// Takes the circuit exclusively for the whole tick; structure is only
    /// read, and only `energized` and `output` fields are written.
    ///
    /// Returns the events emitted this tick.
    pub fn tick(&mut self, circuit: &mut Circuit, tick: Ticks) -> Vec<LogicEvent> {
        let mut events = Vec::new();

        propagation::clear_energization(circuit);
        let sources = propagation::collect_sources(circuit);
        let flood = propagation::flood_fill(circuit, &sources, self.max_flood_passes);
        if !flood.converged {
            events.push(LogicEvent::FloodBoundReached {
                passes: flood.passes,
                tick,
            });
        }

        let external_inputs = isolation::tally_external_inputs(circuit, &sources);
        let changed = OutputBuffer::evaluate(circuit, &external_inputs).commit(circuit);
        events.extend(
            changed
                .into_iter()
                .map(|(component, output)| LogicEvent::OutputChanged {
                    component,
                    output,
                    tick,
                }),
        );

        self.last_report = Some(TickReport {
            tick,
            sources,
            flood,
            external_inputs,
        });
        events
    }
}

// ===========================================================================
// Tests
// ===========================================================================
