//! Common types shared across the simulator.
//!
//! This module collects the leaf types every other component builds on:
//! 1. **Registers:** The architectural register file and program counter.
//! 2. **Traps:** Exception and interrupt identifiers with their cause codes.

/// Architectural register file (32 general-purpose registers plus PC).
pub mod reg;

/// Exception and interrupt types and cause-code constants.
pub mod trap;

pub use reg::RegisterFile;
pub use trap::{Exception, Irq};
