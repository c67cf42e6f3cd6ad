//! Execution Unit.
//!
//! A pure function from (decoded instruction, register-file snapshot,
//! producing PC) to a result descriptor. No state is read or written here:
//! loads and stores become memory requests serviced by the memory stage,
//! CSR operations become requests applied at writeback, and traps become
//! descriptors the pipeline hands to the trap controller.
//!
//! All arithmetic is 32-bit two's-complement with wraparound; shifts use
//! the low five bits of the shift operand; SRA preserves the sign.

use crate::common::Exception;
use crate::common::RegisterFile;
use crate::isa::instruction::{
    AluOp, BranchCond, CsrAtomicOp, CsrOperand, CsrRequest, ExecResult, InstrKind,
};

/// Integer ALU.
pub mod alu {
    use super::AluOp;

    /// Applies an ALU operation to two 32-bit operands.
    ///
    /// # Arguments
    ///
    /// * `op` - The operation to perform.
    /// * `a` - First operand.
    /// * `b` - Second operand; for shifts only the low 5 bits are used.
    pub fn apply(op: AluOp, a: u32, b: u32) -> u32 {
        match op {
            AluOp::Add => a.wrapping_add(b),
            AluOp::Sub => a.wrapping_sub(b),
            AluOp::Sll => a << (b & 0x1F),
            AluOp::Slt => ((a as i32) < (b as i32)) as u32,
            AluOp::Sltu => (a < b) as u32,
            AluOp::Xor => a ^ b,
            AluOp::Srl => a >> (b & 0x1F),
            AluOp::Sra => ((a as i32) >> (b & 0x1F)) as u32,
            AluOp::Or => a | b,
            AluOp::And => a & b,
        }
    }
}

/// Evaluates a branch predicate.
pub fn branch_taken(cond: BranchCond, a: u32, b: u32) -> bool {
    match cond {
        BranchCond::Eq => a == b,
        BranchCond::Ne => a != b,
        BranchCond::Lt => (a as i32) < (b as i32),
        BranchCond::Ge => (a as i32) >= (b as i32),
        BranchCond::Ltu => a < b,
        BranchCond::Geu => a >= b,
    }
}

/// Executes a decoded instruction against a register-file snapshot.
///
/// # Arguments
///
/// * `kind` - The decoded operation.
/// * `pc` - The instruction's originating PC.
/// * `regs` - Register file snapshot for operand resolution.
///
/// # Returns
///
/// The result descriptor the memory and writeback stages act on. Bubbles
/// and fences produce [`ExecResult::None`].
pub fn execute(kind: &InstrKind, pc: u32, regs: &RegisterFile) -> ExecResult {
    match *kind {
        InstrKind::Bubble | InstrKind::Fence | InstrKind::FenceI => ExecResult::None,

        InstrKind::Alu { op, rs1, rs2, .. } => {
            ExecResult::Value(alu::apply(op, regs.read(rs1), regs.read(rs2)))
        }

        InstrKind::AluImm { op, rs1, imm, .. } => {
            ExecResult::Value(alu::apply(op, regs.read(rs1), imm as u32))
        }

        InstrKind::Lui { imm, .. } => ExecResult::Value((imm as u32) << 12),

        InstrKind::Auipc { imm, .. } => {
            ExecResult::Value(pc.wrapping_add((imm as u32) << 12))
        }

        InstrKind::Jal { offset, .. } => ExecResult::Jump {
            target: pc.wrapping_add(offset as u32),
            link: pc.wrapping_add(4),
        },

        InstrKind::Jalr { rs1, offset, .. } => ExecResult::Jump {
            target: regs.read(rs1).wrapping_add(offset as u32) & !1,
            link: pc.wrapping_add(4),
        },

        InstrKind::Branch {
            cond,
            rs1,
            rs2,
            offset,
        } => ExecResult::Branch {
            taken: branch_taken(cond, regs.read(rs1), regs.read(rs2)),
            target: pc.wrapping_add(offset as u32),
        },

        InstrKind::Load {
            width,
            signed,
            rs1,
            offset,
            ..
        } => ExecResult::Load {
            addr: regs.read(rs1).wrapping_add(offset as u32),
            width,
            signed,
        },

        InstrKind::Store {
            width,
            rs1,
            rs2,
            offset,
        } => ExecResult::Store {
            addr: regs.read(rs1).wrapping_add(offset as u32),
            width,
            src: rs2,
        },

        InstrKind::Csr { op, addr, src, .. } => {
            let operand = match src {
                CsrOperand::Reg(rs1) => regs.read(rs1),
                CsrOperand::Imm(z) => z as u32,
            };
            // The zero-operand shortcut samples the CSR without writing:
            // S/C with rs1 = R0, or the immediate variants with uimm = 0.
            // W always writes, even when the operand happens to be zero.
            let write_suppressed = op != CsrAtomicOp::Write
                && match src {
                    CsrOperand::Reg(rs1) => rs1 == 0,
                    CsrOperand::Imm(z) => z == 0,
                };
            ExecResult::Csr(CsrRequest {
                op,
                addr,
                operand,
                write_suppressed,
            })
        }

        InstrKind::Ecall => ExecResult::Trap(Exception::EnvironmentCallFromM),
        InstrKind::Ebreak => ExecResult::Trap(Exception::Breakpoint),
        InstrKind::Mret => ExecResult::TrapReturn,
        InstrKind::Illegal { bits } => ExecResult::Trap(Exception::IllegalInstruction(bits)),
    }
}
