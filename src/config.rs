//! Configuration system for the simulator.
//!
//! This module defines the configuration structures used to parameterize
//! a run. It provides:
//! 1. **Defaults:** Baseline constants (device bases, cycle budget).
//! 2. **Structures:** Hierarchical config for general behavior, devices,
//!    and the final report.
//!
//! Configuration is supplied via JSON or built with `Config::default()`.

use serde::Deserialize;

/// Default configuration constants.
mod defaults {
    /// Initial program counter.
    pub const START_PC: u32 = 0;

    /// Outer cycle budget; the run halts cleanly when exceeded.
    pub const CYCLE_LIMIT: u64 = 1_000_000;

    /// Base address of the UART aperture.
    pub const UART_BASE: u32 = 0x1000_0000;

    /// Base address of the CLINT aperture.
    pub const CLINT_BASE: u32 = 0x0200_0000;

    /// Simulator cycles per `mtime` unit.
    pub const CLINT_TIME_SCALE: u64 = 1;
}

/// General run parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Initial program counter.
    pub start_pc: u32,
    /// Outer cycle budget.
    pub cycle_limit: u64,
    /// Halt the simulator when an EBREAK retires instead of trapping.
    pub halt_on_break: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            start_pc: defaults::START_PC,
            cycle_limit: defaults::CYCLE_LIMIT,
            halt_on_break: true,
        }
    }
}

/// CLINT device parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClintConfig {
    /// Base address of the CLINT aperture.
    pub base: u32,
    /// Simulator cycles per `mtime` unit (0 is treated as 1).
    pub time_scale: u64,
}

impl Default for ClintConfig {
    fn default() -> Self {
        Self {
            base: defaults::CLINT_BASE,
            time_scale: defaults::CLINT_TIME_SCALE,
        }
    }
}

/// UART device parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UartConfig {
    /// Base address of the UART aperture.
    pub base: u32,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            base: defaults::UART_BASE,
        }
    }
}

/// Final-report parameters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// First address of the memory range included in the run report.
    pub memory_base: u32,
    /// Length in bytes of the memory range included in the run report.
    pub memory_len: u32,
}

/// Root simulator configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General run parameters.
    pub general: GeneralConfig,
    /// CLINT device parameters.
    pub clint: ClintConfig,
    /// UART device parameters.
    pub uart: UartConfig,
    /// Final-report parameters.
    pub report: ReportConfig,
}
