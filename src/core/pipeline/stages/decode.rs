//! Instruction Decode (ID) Stage.
//!
//! The stage that enforces the no-forwarding discipline:
//! - a pending flush turns the speculatively fetched slot into a bubble,
//! - an active stall keeps emitting bubbles without consuming the fetch
//!   latch, so the same instruction is re-presented next tick,
//! - otherwise the hazard detector decides between forwarding the record
//!   to execute and starting a stall.

use log::trace;

use crate::core::Cpu;
use crate::core::pipeline::hazard::{self, HazardDecision};
use crate::core::pipeline::{FlushState, Occupancy, Pipeline};
use crate::isa::{InstrState, Instruction};

/// Executes the decode stage.
///
/// # Arguments
///
/// * `occupancy` - Start-of-tick snapshot of the decode-to-execute and
///   execute-to-memory latches, used by the hazard detector.
pub fn decode_stage(cpu: &mut Cpu, pipe: &mut Pipeline, occupancy: &Occupancy) {
    if matches!(pipe.flush, FlushState::Pending(_)) {
        // Kill only the in-flight-at-decode slot. The redirect itself is
        // consumed by fetch later this tick.
        let mut killed = pipe.if_id.take();
        if !killed.is_bubble() {
            killed.state = InstrState::FlushedToBubble;
            trace!("ID  pc={:#010x} {} flushed to bubble", killed.pc, killed);
        }
        pipe.stall_cycles_left = 0;
        pipe.id_ex.put(Instruction::bubble());
        return;
    }

    if pipe.stall_cycles_left > 0 {
        pipe.stall_cycles_left -= 1;
        cpu.stats.stalls_data += 1;
        pipe.id_ex.put(Instruction::bubble());
        return;
    }

    if pipe.if_id.is_bubble() {
        pipe.id_ex.put(Instruction::bubble());
        return;
    }

    match hazard::check(pipe.if_id.peek(), &occupancy.execute, &occupancy.memory) {
        HazardDecision::Stall { cycles } => {
            trace!(
                "ID  pc={:#010x} {} stalls {} cycles",
                pipe.if_id.peek().pc,
                pipe.if_id.peek(),
                cycles
            );
            pipe.stall_cycles_left = cycles - 1;
            cpu.stats.stalls_data += 1;
            pipe.id_ex.put(Instruction::bubble());
        }
        HazardDecision::Proceed => {
            let mut inst = pipe.if_id.take();
            inst.state = InstrState::Decoded;
            trace!("ID  pc={:#010x} {}", inst.pc, inst);
            pipe.id_ex.put(inst);
        }
    }
}
