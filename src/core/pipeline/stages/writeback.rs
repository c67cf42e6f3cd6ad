//! Writeback (WB) Stage.
//!
//! The final stage: commits register and CSR results, maintains the
//! retirement counters, and appends the record to the completed-instruction
//! log. Bubbles retire with no architectural effect but still occupy a log
//! entry, preserving the per-tick retirement order.

use log::trace;

use crate::core::{Cpu, HaltReason};
use crate::core::pipeline::Pipeline;
use crate::isa::{ExecResult, InstrKind, InstrState};

/// Executes the writeback stage.
///
/// Takes the memory-to-writeback latch occupant and:
/// - writes ALU/load/link values to the destination register (`R0` writes
///   are suppressed by the register file),
/// - applies CSR read-modify-write requests and writes the old value to
///   the destination register,
/// - counts the retirement (`minstret` for non-bubbles, `mcycle` every
///   tick), and
/// - halts the simulator when a retiring EBREAK has halt-on-break set.
pub fn writeback_stage(cpu: &mut Cpu, pipe: &mut Pipeline) {
    let mut inst = pipe.mem_wb.take();

    match inst.result.clone() {
        ExecResult::Value(val) => {
            if let Some(rd) = inst.dest() {
                trace!("WB  pc={:#010x} R{} <= {:#x}", inst.pc, rd, val);
                cpu.regs.write(rd, val);
            }
        }
        ExecResult::Jump { link, .. } => {
            if let Some(rd) = inst.dest() {
                trace!("WB  pc={:#010x} R{} <= {:#x} (link)", inst.pc, rd, link);
                cpu.regs.write(rd, link);
            }
        }
        ExecResult::Csr(req) => {
            let (old, new) = cpu
                .csrs
                .atomic(req.op, req.addr, req.operand, req.write_suppressed);
            if let Some(rd) = inst.dest() {
                cpu.regs.write(rd, old);
            }
            trace!(
                "WB  pc={:#010x} csr {:#05x}: {:#x} -> {:#x}",
                inst.pc,
                req.addr,
                old,
                new
            );
        }
        _ => {}
    }

    if inst.is_bubble() {
        cpu.stats.bubbles_retired += 1;
    } else {
        cpu.csrs.increment_instret();
        cpu.stats.instructions_retired += 1;
        if inst.is_load() {
            cpu.stats.inst_load += 1;
        } else if inst.is_store() {
            cpu.stats.inst_store += 1;
        } else if inst.is_branch() || inst.is_jump() {
            cpu.stats.inst_branch += 1;
        } else if inst.is_csr() || inst.is_system() {
            cpu.stats.inst_system += 1;
        } else {
            cpu.stats.inst_alu += 1;
        }

        if matches!(inst.kind, InstrKind::Ebreak) && cpu.halt_on_break {
            trace!("WB  pc={:#010x} EBREAK retired, halting", inst.pc);
            cpu.request_halt(HaltReason::Breakpoint);
        }
    }

    cpu.csrs.increment_cycle();

    inst.state = InstrState::Retired;
    pipe.retired.push(inst);
}
