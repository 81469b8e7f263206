//! Simulation clock and state types.
//!
//! The engine never reads wall-clock time. The host calls into it once per
//! rendered frame and a [`TickCadence`] decides which frames run a tick.

use serde::{Deserialize, Serialize};

use crate::circuit::Circuit;
use crate::component::{ComponentKind, GateKind};

/// Ticks are the atomic unit of simulation time.
pub type Ticks = u64;

// ---------------------------------------------------------------------------
// Cadence
// ---------------------------------------------------------------------------

/// How often the host clock runs a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickCadence {
    /// Run one tick every this many frames. Zero is treated as one.
    pub frames_per_tick: u32,
}

impl TickCadence {
    /// Run one tick every `frames_per_tick` frames.
    pub fn every(frames_per_tick: u32) -> Self {
        Self { frames_per_tick }
    }

    /// Whether the given frame counter lands on a tick.
    pub fn is_tick_frame(&self, frame: u64) -> bool {
        frame % u64::from(self.frames_per_tick.max(1)) == 0
    }
}

impl Default for TickCadence {
    fn default() -> Self {
        Self::every(1)
    }
}

// ---------------------------------------------------------------------------
// Simulation state
// ---------------------------------------------------------------------------

/// Mutable simulation state tracked by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimState {
    /// Number of ticks run so far.
    pub tick: Ticks,
}

impl SimState {
    /// Fresh state at tick zero.
    pub fn new() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// State hash
// ---------------------------------------------------------------------------

/// FNV-1a (64-bit) hash of circuit state for determinism checks.
/// Not cryptographic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateHash(pub u64);

impl StateHash {
    const FNV_OFFSET: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x100000001b3;

    /// Start a new hash.
    pub fn new() -> Self {
        Self(Self::FNV_OFFSET)
    }

    /// Feed bytes into the hash.
    pub fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 ^= b as u64;
            self.0 = self.0.wrapping_mul(Self::FNV_PRIME);
        }
    }

    /// Feed a `u64` in little-endian order.
    pub fn write_u64(&mut self, v: u64) {
        self.write(&v.to_le_bytes());
    }

    /// Feed an `i32` in little-endian order.
    pub fn write_i32(&mut self, v: i32) {
        self.write(&v.to_le_bytes());
    }

    /// Feed a bool as a single byte.
    pub fn write_bool(&mut self, v: bool) {
        self.write(&[v as u8]);
    }

    /// Finalize and return the hash value.
    pub fn finish(self) -> u64 {
        self.0
    }
}

impl Default for StateHash {
    fn default() -> Self {
        Self::new()
    }
}

fn kind_tag(kind: &ComponentKind) -> u8 {
    match kind {
        ComponentKind::Emitter { forced_output: None } => 0,
        ComponentKind::Emitter {
            forced_output: Some(false),
        } => 1,
        ComponentKind::Emitter {
            forced_output: Some(true),
        } => 2,
        ComponentKind::Gate(GateKind::And) => 3,
        ComponentKind::Gate(GateKind::Or) => 4,
        ComponentKind::Gate(GateKind::Xor) => 5,
        ComponentKind::Gate(GateKind::Not) => 6,
        ComponentKind::Receiver => 7,
    }
}

/// Hash every signal-relevant field of a circuit: component kinds,
/// positions and outputs, wire endpoints and energized flags. Renderer
/// anchors are excluded.
pub fn circuit_hash(circuit: &Circuit) -> u64 {
    let mut h = StateHash::new();
    h.write_u64(circuit.component_count() as u64);
    for (_, c) in circuit.components() {
        h.write(&[kind_tag(&c.kind)]);
        h.write_i32(c.position.x);
        h.write_i32(c.position.y);
        h.write_bool(c.output);
    }
    h.write_u64(circuit.wire_count() as u64);
    for (_, w) in circuit.wires() {
        for pos in w.endpoints() {
            h.write_i32(pos.x);
            h.write_i32(pos.y);
        }
        h.write_bool(w.energized);
    }
    h.finish()
}
