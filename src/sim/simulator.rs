//! Simulator: owns the CPU and the pipeline side by side.
//!
//! The driver behind the external interface of the crate. A `Simulator`
//! is built from either a pre-decoded instruction table or a binary image,
//! advances one tick at a time, and produces a [`RunReport`] when the
//! pipeline halts (drained fetch source, halting EBREAK, or exhausted
//! cycle budget).

use crate::common::reg::NUM_REGISTERS;
use crate::config::Config;
use crate::core::csr;
use crate::core::pipeline::{FetchSource, Pipeline};
use crate::core::{Cpu, HaltReason};
use crate::isa::instruction::InstrKind;
use crate::isa::Instruction;
use crate::stats::SimStats;

/// The named CSRs included in the run report, in address order.
pub const CSR_ROSTER: [(&str, u16); 15] = [
    ("mstatus", csr::MSTATUS),
    ("misa", csr::MISA),
    ("mie", csr::MIE),
    ("mtvec", csr::MTVEC),
    ("mscratch", csr::MSCRATCH),
    ("mepc", csr::MEPC),
    ("mcause", csr::MCAUSE),
    ("mtval", csr::MTVAL),
    ("mip", csr::MIP),
    ("mcycle", csr::MCYCLE),
    ("minstret", csr::MINSTRET),
    ("cycle", csr::CYCLE),
    ("time", csr::TIME),
    ("instret", csr::INSTRET),
    ("mhartid", csr::MHARTID),
];

/// Final state and metrics of a completed run.
pub struct RunReport {
    /// Total ticks executed.
    pub cycles: u64,
    /// Non-bubble instructions retired.
    pub retired: u64,
    /// Stall cycles inserted for RAW hazards.
    pub stalls: u64,
    /// Pipeline flushes.
    pub flushes: u64,
    /// Why the run stopped.
    pub halt: HaltReason,
    /// Completed-instruction log in retirement order, bubbles included.
    pub log: Vec<Instruction>,
    /// Register file snapshot.
    pub registers: [u32; NUM_REGISTERS],
    /// Final program counter.
    pub pc: u32,
    /// Named CSR snapshot per [`CSR_ROSTER`].
    pub csrs: Vec<(&'static str, u16, u32)>,
    /// Bytes of the configured report memory range.
    pub memory: Vec<u8>,
    /// UART output stream.
    pub uart: Vec<u8>,
    /// Full statistics counters.
    pub stats: SimStats,
}

/// Top-level simulator: CPU architectural state plus the pipeline.
pub struct Simulator {
    /// CPU architectural state (registers, CSRs, bus, statistics).
    pub cpu: Cpu,
    /// The five-stage pipeline.
    pub pipeline: Pipeline,
    config: Config,
}

impl Simulator {
    /// Creates a simulator fed from a pre-decoded instruction table.
    ///
    /// The table is addressed by PC / 4 starting at
    /// `config.general.start_pc`.
    pub fn with_program(program: Vec<InstrKind>, config: Config) -> Self {
        let cpu = Cpu::new(&config);
        let pipeline = Pipeline::new(FetchSource::Table(program));
        Self {
            cpu,
            pipeline,
            config,
        }
    }

    /// Creates a simulator fed by decoding a binary image from memory.
    ///
    /// The image bytes are loaded at `base`; execution starts at
    /// `config.general.start_pc`.
    pub fn with_image(image: &[u8], base: u32, config: Config) -> Self {
        let mut cpu = Cpu::new(&config);
        cpu.bus.ram.write_bytes(base, image);
        let pipeline = Pipeline::new(FetchSource::Image);
        Self {
            cpu,
            pipeline,
            config,
        }
    }

    /// Advances the simulation by one clock tick.
    pub fn tick(&mut self) {
        self.pipeline.tick(&mut self.cpu);
    }

    /// Returns the halt reason once the simulation has stopped.
    pub fn halted(&self) -> Option<HaltReason> {
        self.cpu.halt
    }

    /// Runs until the pipeline halts or the cycle budget is exhausted.
    pub fn run(&mut self) -> RunReport {
        while self.cpu.halt.is_none() {
            if self.cpu.stats.cycles >= self.config.general.cycle_limit {
                self.cpu.request_halt(HaltReason::CycleLimit);
                break;
            }
            self.tick();
        }
        self.report()
    }

    /// Builds the run report from the current state.
    pub fn report(&mut self) -> RunReport {
        let csrs = CSR_ROSTER
            .iter()
            .map(|&(name, addr)| (name, addr, self.cpu.csrs.read(addr)))
            .collect();

        let mut memory = vec![0u8; self.config.report.memory_len as usize];
        self.cpu
            .bus
            .ram
            .read_bytes(self.config.report.memory_base, &mut memory);

        let uart = self
            .cpu
            .bus
            .uart()
            .map(|u| u.output().to_vec())
            .unwrap_or_default();

        RunReport {
            cycles: self.cpu.stats.cycles,
            retired: self.cpu.stats.instructions_retired,
            stalls: self.cpu.stats.stalls_data,
            flushes: self.cpu.stats.flushes,
            halt: self.cpu.halt.unwrap_or(HaltReason::CycleLimit),
            log: self.pipeline.retired.clone(),
            registers: self.cpu.regs.snapshot(),
            pc: self.cpu.regs.read_pc(),
            csrs,
            memory,
            uart,
            stats: self.cpu.stats.clone(),
        }
    }

    /// Reads a general-purpose register.
    pub fn reg(&self, idx: usize) -> u32 {
        self.cpu.regs.read(idx)
    }

    /// Writes a general-purpose register (initialization convenience).
    pub fn set_reg(&mut self, idx: usize, val: u32) {
        self.cpu.regs.write(idx, val);
    }

    /// Reads a CSR.
    pub fn csr(&self, addr: u16) -> u32 {
        self.cpu.csrs.read(addr)
    }

    /// Writes a CSR (initialization convenience; read-only rules apply).
    pub fn set_csr(&mut self, addr: u16, val: u32) {
        let _ = self.cpu.csrs.write(addr, val);
    }
}
