//! Instruction Fetch (IF) Stage.
//!
//! Runs last in the tick, after the CLINT tick and IRQ line sync:
//! 1. A pending flush redirects the PC to its target and wipes the fetch
//!    latch; nothing is fetched that tick.
//! 2. The trap controller is polled; a deliverable interrupt saves the PC
//!    of the next instruction (the unconsumed fetch-latch occupant, or
//!    the fetch PC) to `mepc`, invalidates the fetch latch, and redirects
//!    to the handler.
//! 3. Otherwise, if decode consumed the previous record, the next
//!    instruction is fetched (from the decoded-instruction table at
//!    PC / 4, or by decoding four bytes from memory) and the PC advances
//!    by 4. An undecodable image word becomes an illegal-instruction
//!    record that traps at execute.

use log::trace;

use crate::core::Cpu;
use crate::core::pipeline::{FetchSource, FlushState, Pipeline};
use crate::core::trap::TrapController;
use crate::isa::instruction::InstrKind;
use crate::isa::{decode, Instruction, MemWidth};

/// Executes the fetch stage.
pub fn fetch_stage(cpu: &mut Cpu, pipe: &mut Pipeline) {
    if let FlushState::Pending(target) = pipe.flush {
        pipe.flush = FlushState::Idle;
        trace!("IF  redirect -> {:#010x}", target);
        cpu.regs.write_pc(target);
        pipe.if_id.put(Instruction::bubble());
        return;
    }

    // Interrupts are taken between instructions: the saved PC is the one
    // the handler must return to, which is the unconsumed fetch-latch
    // occupant when decode is stalled.
    let next_pc = if pipe.if_id.is_bubble() {
        cpu.regs.read_pc()
    } else {
        pipe.if_id.peek().pc
    };
    if let Some(handler) =
        TrapController::check_and_deliver_interrupt(&mut cpu.csrs, &mut cpu.irq, next_pc)
    {
        cpu.regs.write_pc(handler);
        pipe.if_id.put(Instruction::bubble());
        pipe.stall_cycles_left = 0;
        cpu.stats.traps_taken += 1;
        cpu.stats.interrupts_delivered += 1;
        return;
    }

    if !pipe.if_id.is_bubble() {
        // Decode did not consume the slot; hold the fetch stream.
        return;
    }

    let pc = cpu.regs.read_pc();
    let fetched = match &pipe.feeder {
        FetchSource::Table(table) => table.get((pc / 4) as usize).cloned(),
        FetchSource::Image => {
            let word = cpu.bus.load(pc, MemWidth::Word, false);
            Some(decode(word).unwrap_or(InstrKind::Illegal { bits: word }))
        }
    };

    match fetched {
        Some(kind) => {
            let inst = Instruction::new(pc, kind);
            trace!("IF  pc={:#010x} {}", pc, inst);
            pipe.if_id.put(inst);
            cpu.regs.advance_pc(4);
            // A redirect back into the table resumes the stream.
            pipe.fetch_exhausted = false;
        }
        None => {
            pipe.fetch_exhausted = true;
        }
    }
}
