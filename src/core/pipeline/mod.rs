//! Pipeline Orchestrator.
//!
//! The five-stage in-order pipeline: fetch, decode, execute, memory,
//! writeback, with a single-slot latch between each pair of adjacent
//! stages. A tick runs the stages in reverse order (writeback first) so
//! that every stage consumes its predecessor's start-of-tick output; this
//! realizes the logically-parallel contract without double-buffering.
//!
//! Within a tick, after decode and before fetch, the devices are ticked
//! and their IRQ lines synced into `mip`, so a CLINT compare-match
//! redirects the very next fetch.
//!
//! The pipeline-global flush state lasts exactly one tick: raised by
//! execute on a taken control transfer (or trap entry / MRET), it turns
//! the decode input slot into a bubble and redirects fetch to the target.

/// RAW hazard detection.
pub mod hazard;
/// Inter-stage latch.
pub mod latch;
/// Stage implementations.
pub mod stages;

use crate::core::{Cpu, HaltReason};
use crate::isa::instruction::InstrKind;
use crate::isa::Instruction;

pub use latch::Latch;

/// Pipeline-global flush state.
///
/// `Pending` lasts exactly one tick: decode wipes its input slot and fetch
/// consumes the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlushState {
    /// No flush in progress.
    Idle,
    /// A control transfer was taken; fetch must redirect to the target.
    Pending(u32),
}

/// Where fetch gets its instructions from.
pub enum FetchSource {
    /// A pre-decoded instruction table addressed by PC / 4.
    Table(Vec<InstrKind>),
    /// 32-bit little-endian encodings decoded from memory at PC.
    Image,
}

/// Start-of-tick occupancy snapshot consumed by the hazard detector.
pub struct Occupancy {
    /// Occupant of the decode-to-execute latch.
    pub execute: Instruction,
    /// Occupant of the execute-to-memory latch.
    pub memory: Instruction,
}

/// The five-stage pipeline and its latches.
pub struct Pipeline {
    /// Fetch-to-decode latch.
    pub if_id: Latch,
    /// Decode-to-execute latch.
    pub id_ex: Latch,
    /// Execute-to-memory latch.
    pub ex_mem: Latch,
    /// Memory-to-writeback latch.
    pub mem_wb: Latch,
    /// Flush state, raised by execute and consumed by decode/fetch.
    pub flush: FlushState,
    /// Remaining stall cycles during a hazard wait.
    pub(crate) stall_cycles_left: u8,
    /// Instruction source for fetch.
    pub feeder: FetchSource,
    /// Completed-instruction log, in retirement order (bubbles included).
    pub retired: Vec<Instruction>,
    /// Set when the table feeder ran past its last instruction.
    pub(crate) fetch_exhausted: bool,
}

impl Pipeline {
    /// Creates an idle pipeline over the given fetch source.
    pub fn new(feeder: FetchSource) -> Self {
        Self {
            if_id: Latch::new(),
            id_ex: Latch::new(),
            ex_mem: Latch::new(),
            mem_wb: Latch::new(),
            flush: FlushState::Idle,
            stall_cycles_left: 0,
            feeder,
            retired: Vec::new(),
            fetch_exhausted: false,
        }
    }

    /// Advances the pipeline by one clock tick.
    ///
    /// Stage order within the tick: writeback, memory, execute, decode,
    /// CLINT tick + IRQ line sync, fetch. The hazard detector sees the
    /// start-of-tick occupancy captured before any stage runs.
    pub fn tick(&mut self, cpu: &mut Cpu) {
        if cpu.halt.is_some() {
            return;
        }

        let occupancy = Occupancy {
            execute: self.id_ex.peek().clone(),
            memory: self.ex_mem.peek().clone(),
        };

        stages::writeback_stage(cpu, self);
        stages::memory_stage(cpu, self);
        stages::execute_stage(cpu, self);
        stages::decode_stage(cpu, self, &occupancy);

        cpu.bus.tick_devices();
        let (lines, mask) = cpu.bus.irq_lines();
        cpu.irq.sync_lines(&mut cpu.csrs, lines, mask);
        if let Some(clint) = cpu.bus.clint_mut() {
            let mtime = clint.mtime();
            cpu.csrs.sync_time(mtime);
        }

        stages::fetch_stage(cpu, self);

        cpu.stats.cycles += 1;

        if self.fetch_exhausted && self.is_drained() {
            cpu.request_halt(HaltReason::Drained);
        }
    }

    /// Returns true when all four inter-stage latches hold bubbles.
    pub fn is_drained(&self) -> bool {
        self.if_id.is_bubble()
            && self.id_ex.is_bubble()
            && self.ex_mem.is_bubble()
            && self.mem_wb.is_bubble()
    }

    /// Returns the current stage occupancy as
    /// `[fetch-out, decode-out, execute-out, memory-out]`.
    pub fn occupancy(&self) -> [&Instruction; 4] {
        [
            self.if_id.peek(),
            self.id_ex.peek(),
            self.ex_mem.peek(),
            self.mem_wb.peek(),
        ]
    }
}
