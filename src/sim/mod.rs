//! Simulation driver.
//!
//! Owns the CPU and pipeline side by side and exposes the external
//! interface: tick-by-tick stepping, full runs under a cycle budget, and
//! the final run report.

/// Simulator, halt reasons, and the run report.
pub mod simulator;

pub use simulator::{RunReport, Simulator};
