//! Gatework Core -- the circuit model for grid-based logic puzzles.
//!
//! This crate holds the structural side of a circuit: components placed on
//! grid cells, wires drawn between cells, stable arena identifiers, engine
//! configuration, the host clock's tick cadence, state hashing, and binary
//! snapshots. The per-tick propagation and gate evaluation live in
//! `gatework-logic`.
//!
//! # Key Types
//!
//! - [`circuit::Circuit`] -- components and wires with cell lookup.
//! - [`component::Component`] -- a one-bit latch of some [`component::ComponentKind`].
//! - [`wire::Wire`] -- a connection between two cells, energized or not.
//! - [`config::EngineConfig`] -- flood-fill bound and tick cadence, from TOML.
//! - [`serialize`] -- versioned snapshots via bitcode.

pub mod circuit;
pub mod component;
pub mod config;
pub mod grid;
pub mod id;
pub mod serialize;
pub mod sim;
pub mod wire;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
