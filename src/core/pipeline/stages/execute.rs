//! Execute (EX) Stage.
//!
//! Invokes the execution unit and acts on control flow:
//! - taken branches and jumps raise the pipeline flush with their target,
//! - ECALL/EBREAK enter the trap handler through the trap controller,
//! - MRET performs the trap return,
//! - everything else just carries its result descriptor downstream.
//!
//! Every execute-stage redirect counts as exactly one flush.

use log::trace;

use crate::common::Exception;
use crate::core::Cpu;
use crate::core::exe;
use crate::core::pipeline::{FlushState, Pipeline};
use crate::core::trap::TrapController;
use crate::isa::{ExecResult, InstrState};

/// Executes the execute stage.
pub fn execute_stage(cpu: &mut Cpu, pipe: &mut Pipeline) {
    let mut inst = pipe.id_ex.take();

    if inst.is_bubble() {
        pipe.ex_mem.put(inst);
        return;
    }

    inst.result = exe::execute(&inst.kind, inst.pc, &cpu.regs);
    inst.state = InstrState::Executed;
    trace!("EX  pc={:#010x} {} -> {:?}", inst.pc, inst, inst.result);

    match &inst.result {
        ExecResult::Branch {
            taken: true,
            target,
        } => {
            pipe.flush = FlushState::Pending(*target);
            cpu.stats.flushes += 1;
        }
        ExecResult::Jump { target, .. } => {
            pipe.flush = FlushState::Pending(*target);
            cpu.stats.flushes += 1;
        }
        ExecResult::Trap(exc) => {
            // A halting EBREAK never enters the handler; writeback stops
            // the simulator when the record retires.
            let halting_break =
                matches!(exc, Exception::Breakpoint) && cpu.halt_on_break;
            if !halting_break {
                let handler = TrapController::raise_exception(&mut cpu.csrs, exc, inst.pc);
                pipe.flush = FlushState::Pending(handler);
                cpu.stats.flushes += 1;
                cpu.stats.traps_taken += 1;
            }
        }
        ExecResult::TrapReturn => {
            let target = TrapController::trap_return(&mut cpu.csrs);
            pipe.flush = FlushState::Pending(target);
            cpu.stats.flushes += 1;
        }
        _ => {}
    }

    pipe.ex_mem.put(inst);
}
