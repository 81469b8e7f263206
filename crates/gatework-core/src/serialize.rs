//! Binary snapshots of a circuit via `bitcode`, behind a versioned header.
//!
//! The per-cell placement order is stored with the circuit, so overlapping
//! placements resolve the same way after a round trip.

use serde::{Deserialize, Serialize};

use crate::circuit::Circuit;
use crate::sim::{SimState, Ticks};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Magic number identifying a gatework circuit snapshot.
pub const SNAPSHOT_MAGIC: u32 = 0x6A7E_0001;

/// Current format version. Increment when breaking the wire format.
pub const FORMAT_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    #[error("bitcode encoding failed: {0}")]
    Encode(String),
}

#[derive(Debug, thiserror::Error)]
pub enum DeserializeError {
    #[error("invalid magic number: expected 0x{:08X}, got 0x{:08X}", SNAPSHOT_MAGIC, .0)]
    InvalidMagic(u32),
    #[error("unsupported format version: expected {}, got {}", FORMAT_VERSION, .0)]
    UnsupportedVersion(u32),
    #[error("snapshot from future version {0} (this build supports up to {FORMAT_VERSION})")]
    FutureVersion(u32),
    #[error("bitcode decoding failed: {0}")]
    Decode(String),
}

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotHeader {
    pub magic: u32,
    pub version: u32,
    /// Tick count at the time the snapshot was taken.
    pub tick: Ticks,
}

impl SnapshotHeader {
    pub fn new(tick: Ticks) -> Self {
        Self {
            magic: SNAPSHOT_MAGIC,
            version: FORMAT_VERSION,
            tick,
        }
    }

    pub fn validate(&self) -> Result<(), DeserializeError> {
        if self.magic != SNAPSHOT_MAGIC {
            return Err(DeserializeError::InvalidMagic(self.magic));
        }
        if self.version > FORMAT_VERSION {
            return Err(DeserializeError::FutureVersion(self.version));
        }
        if self.version < FORMAT_VERSION {
            return Err(DeserializeError::UnsupportedVersion(self.version));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// A decoded snapshot: the circuit plus the tick counter it was saved at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircuitSnapshot {
    pub header: SnapshotHeader,
    pub sim_state: SimState,
    pub circuit: Circuit,
}

pub fn encode(circuit: &Circuit, sim_state: &SimState) -> Result<Vec<u8>, SerializeError> {
    let snapshot = CircuitSnapshot {
        header: SnapshotHeader::new(sim_state.tick),
        sim_state: sim_state.clone(),
        circuit: circuit.clone(),
    };
    bitcode::serialize(&snapshot).map_err(|e| SerializeError::Encode(e.to_string()))
}

/// Decode and validate a snapshot. Returns an error (never panics) on
/// garbage input or a version mismatch.
pub fn decode(data: &[u8]) -> Result<CircuitSnapshot, DeserializeError> {
    let snapshot: CircuitSnapshot =
        bitcode::deserialize(data).map_err(|e| DeserializeError::Decode(e.to_string()))?;
    snapshot.header.validate()?;
    Ok(snapshot)
}

// ===========================================================================
// Tests
// ===========================================================================
