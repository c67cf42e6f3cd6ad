//! CPU core: architectural state and pipeline.
//!
//! This module defines the central `Cpu` structure holding all
//! architectural processor state. The pipeline lives separately in
//! `Simulator`; this struct owns:
//! 1. **State:** Register file, program counter, and CSR bank.
//! 2. **Interrupts:** The machine interrupt controller.
//! 3. **System:** The bus with memory and devices, and run statistics.

/// CSR bank and field helpers.
pub mod csr;
/// Execution unit (pure instruction evaluation).
pub mod exe;
/// Interrupt controller.
pub mod irq;
/// Pipeline orchestrator, latches, hazard detection, and stages.
pub mod pipeline;
/// Trap controller.
pub mod trap;

use crate::common::RegisterFile;
use crate::config::Config;
use crate::core::csr::CsrFile;
use crate::core::irq::InterruptController;
use crate::soc::{Clint, SystemBus, Uart};
use crate::stats::SimStats;

/// Why the simulator stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HaltReason {
    /// The fetch source was exhausted and the pipeline drained.
    Drained,
    /// An EBREAK retired with halt-on-break configured.
    Breakpoint,
    /// The cycle budget was exceeded; execution is incomplete.
    CycleLimit,
}

/// CPU architectural state: registers, CSRs, interrupt controller, bus,
/// and statistics.
///
/// The pipeline is owned by `Simulator`, not by `Cpu`; this struct holds
/// only the state the pipeline stages read and write.
pub struct Cpu {
    /// General-purpose registers and program counter.
    pub regs: RegisterFile,
    /// Control and status registers.
    pub csrs: CsrFile,
    /// Machine interrupt controller.
    pub irq: InterruptController,
    /// System bus with RAM and devices.
    pub bus: SystemBus,
    /// Performance counters.
    pub stats: SimStats,
    /// Halt state; set at most once per run.
    pub halt: Option<HaltReason>,
    /// Halt the simulator when an EBREAK retires instead of trapping.
    pub halt_on_break: bool,
}

impl Cpu {
    /// Creates a CPU with the UART and CLINT mapped per the configuration.
    pub fn new(config: &Config) -> Self {
        let mut bus = SystemBus::new();
        bus.add_device(Box::new(Uart::new(config.uart.base)));
        bus.add_device(Box::new(Clint::new(
            config.clint.base,
            config.clint.time_scale,
        )));

        let mut regs = RegisterFile::new();
        regs.write_pc(config.general.start_pc);

        Self {
            regs,
            csrs: CsrFile::new(),
            irq: InterruptController::new(),
            bus,
            stats: SimStats::default(),
            halt: None,
            halt_on_break: config.general.halt_on_break,
        }
    }

    /// Requests a halt; the first reason recorded wins.
    pub fn request_halt(&mut self, reason: HaltReason) {
        if self.halt.is_none() {
            self.halt = Some(reason);
        }
    }

    /// Dumps the PC and non-zero registers to stderr.
    pub fn dump_state(&self) {
        self.regs.dump();
    }
}
