//! Memory Access (MEM) Stage.
//!
//! Services the memory requests produced by execute. Loads read through
//! the system bus (with device-aperture dispatch and sign/zero extension)
//! and stash the value into the record's result slot; stores sample their
//! data register and write through the bus.
//!
//! The data register of a store is read here, not at execute: writeback
//! runs earlier in the same tick, so a producer retiring this cycle is
//! already visible. This is what lets a store depend on the immediately
//! preceding instruction without a stall.

use log::trace;

use crate::core::Cpu;
use crate::core::pipeline::Pipeline;
use crate::isa::{ExecResult, InstrState};

/// Executes the memory stage.
pub fn memory_stage(cpu: &mut Cpu, pipe: &mut Pipeline) {
    let mut inst = pipe.ex_mem.take();

    match inst.result {
        ExecResult::Load {
            addr,
            width,
            signed,
        } => {
            let val = cpu.bus.load(addr, width, signed);
            trace!(
                "MEM pc={:#010x} load {:#010x} => {:#x}",
                inst.pc,
                addr,
                val
            );
            inst.result = ExecResult::Value(val);
        }
        ExecResult::Store { addr, width, src } => {
            let data = cpu.regs.read(src);
            trace!(
                "MEM pc={:#010x} store {:#010x} <= {:#x}",
                inst.pc,
                addr,
                data
            );
            cpu.bus.store(addr, width, data);
        }
        _ => {}
    }

    if !inst.is_bubble() {
        inst.state = InstrState::MemDone;
    }
    pipe.mem_wb.put(inst);
}
