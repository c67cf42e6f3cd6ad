//! RV32I Binary Instruction Decoder.
//!
//! This module decodes 32-bit little-endian RISC-V encodings into the
//! instruction record. It extracts register indices and function codes,
//! sign-extends immediates for the standard R/I/S/B/U/J layouts, and maps
//! every legal RV32I encoding (plus MRET) onto an `InstrKind`.
//!
//! Malformed encodings are reported as [`DecodeError`] so that callers
//! pre-decoding an image can reject bad input before pipeline entry; the
//! in-pipeline fetch path converts the error into an illegal-instruction
//! record that traps at execute.

use thiserror::Error;

use crate::isa::instruction::{
    AluOp, BranchCond, CsrAtomicOp, CsrOperand, InstrKind, MemWidth,
};
use crate::isa::opcodes::{funct3, funct7, op, system};

/// Bit mask for the opcode field (bits 6:0).
pub const OPCODE_MASK: u32 = 0x7F;
/// Bit mask for a 5-bit register field.
pub const REG_MASK: u32 = 0x1F;
/// Bit mask for the funct3 field.
pub const FUNCT3_MASK: u32 = 0x7;
/// Bit mask for the funct7 field.
pub const FUNCT7_MASK: u32 = 0x7F;
/// Bit mask for the 12-bit CSR address field.
pub const CSR_MASK: u32 = 0xFFF;

/// Structural decode failure for a 32-bit instruction word.
///
/// These are caller-visible ingress rejections, not architectural faults;
/// the pipeline's binary feeder maps them onto illegal-instruction traps.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The major opcode is not part of RV32I.
    #[error("unknown major opcode {opcode:#04x} in instruction {bits:#010x}")]
    UnknownOpcode {
        /// The 7-bit major opcode.
        opcode: u32,
        /// The full instruction word.
        bits: u32,
    },
    /// The function-code combination is reserved within a known opcode.
    #[error("reserved function code in instruction {bits:#010x}")]
    ReservedFunction {
        /// The full instruction word.
        bits: u32,
    },
}

/// Field extraction for raw 32-bit instruction words.
pub trait InstructionBits {
    /// Extracts the major opcode (bits 6:0).
    fn opcode(&self) -> u32;
    /// Extracts the destination register index (bits 11:7).
    fn rd(&self) -> usize;
    /// Extracts the first source register index (bits 19:15).
    fn rs1(&self) -> usize;
    /// Extracts the second source register index (bits 24:20).
    fn rs2(&self) -> usize;
    /// Extracts the funct3 field (bits 14:12).
    fn funct3(&self) -> u32;
    /// Extracts the funct7 field (bits 31:25).
    fn funct7(&self) -> u32;
    /// Extracts the 12-bit CSR address field (bits 31:20).
    fn csr(&self) -> u16;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        self & OPCODE_MASK
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        ((self >> 7) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rs1(&self) -> usize {
        ((self >> 15) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rs2(&self) -> usize {
        ((self >> 20) & REG_MASK) as usize
    }

    #[inline(always)]
    fn funct3(&self) -> u32 {
        (self >> 12) & FUNCT3_MASK
    }

    #[inline(always)]
    fn funct7(&self) -> u32 {
        (self >> 25) & FUNCT7_MASK
    }

    #[inline(always)]
    fn csr(&self) -> u16 {
        ((self >> 20) & CSR_MASK) as u16
    }
}

/// Decodes the immediate for I-type instructions.
///
/// I-type format: `imm[11:0] | rs1 | funct3 | rd | opcode`.
fn i_type_imm(inst: u32) -> i32 {
    (inst as i32) >> 20
}

/// Decodes the immediate for S-type instructions.
///
/// S-type format: `imm[11:5] | rs2 | rs1 | funct3 | imm[4:0] | opcode`.
fn s_type_imm(inst: u32) -> i32 {
    let low = (inst >> 7) & 0x1F;
    let high = (inst >> 25) & 0x7F;
    sign_extend((high << 5) | low, 12)
}

/// Decodes the immediate for B-type instructions.
///
/// B-type format: `imm[12] | imm[10:5] | rs2 | rs1 | funct3 | imm[4:1] |
/// imm[11] | opcode`; the offset is always even.
fn b_type_imm(inst: u32) -> i32 {
    let bit_11 = (inst >> 7) & 1;
    let bits_4_1 = (inst >> 8) & 0xF;
    let bits_10_5 = (inst >> 25) & 0x3F;
    let bit_12 = (inst >> 31) & 1;
    let combined = (bit_12 << 12) | (bit_11 << 11) | (bits_10_5 << 5) | (bits_4_1 << 1);
    sign_extend(combined, 13)
}

/// Decodes the immediate for U-type instructions, pre-shift.
///
/// U-type format: `imm[31:12] | rd | opcode`. The record stores the raw
/// 20-bit field; the execution unit applies the 12-bit shift.
fn u_type_imm(inst: u32) -> i32 {
    ((inst >> 12) & 0xF_FFFF) as i32
}

/// Decodes the immediate for J-type instructions.
///
/// J-type format: `imm[20] | imm[10:1] | imm[11] | imm[19:12] | rd |
/// opcode`; the offset is always even.
fn j_type_imm(inst: u32) -> i32 {
    let bits_19_12 = (inst >> 12) & 0xFF;
    let bit_11 = (inst >> 20) & 1;
    let bits_10_1 = (inst >> 21) & 0x3FF;
    let bit_20 = (inst >> 31) & 1;
    let combined = (bit_20 << 20) | (bits_19_12 << 12) | (bit_11 << 11) | (bits_10_1 << 1);
    sign_extend(combined, 21)
}

/// Sign-extends a `bits`-wide value to 32 bits.
fn sign_extend(val: u32, bits: u32) -> i32 {
    let shift = 32 - bits;
    ((val as i32) << shift) >> shift
}

/// Decodes a 32-bit RV32I instruction word into an operation kind.
///
/// # Arguments
///
/// * `inst` - The little-endian 32-bit encoding.
///
/// # Errors
///
/// Returns [`DecodeError`] when the opcode is unknown or a function-code
/// combination is reserved.
pub fn decode(inst: u32) -> Result<InstrKind, DecodeError> {
    match inst.opcode() {
        op::LUI => Ok(InstrKind::Lui {
            rd: inst.rd(),
            imm: u_type_imm(inst),
        }),
        op::AUIPC => Ok(InstrKind::Auipc {
            rd: inst.rd(),
            imm: u_type_imm(inst),
        }),
        op::JAL => Ok(InstrKind::Jal {
            rd: inst.rd(),
            offset: j_type_imm(inst),
        }),
        op::JALR => Ok(InstrKind::Jalr {
            rd: inst.rd(),
            rs1: inst.rs1(),
            offset: i_type_imm(inst),
        }),
        op::BRANCH => {
            let cond = match inst.funct3() {
                funct3::BEQ => BranchCond::Eq,
                funct3::BNE => BranchCond::Ne,
                funct3::BLT => BranchCond::Lt,
                funct3::BGE => BranchCond::Ge,
                funct3::BLTU => BranchCond::Ltu,
                funct3::BGEU => BranchCond::Geu,
                _ => return Err(DecodeError::ReservedFunction { bits: inst }),
            };
            Ok(InstrKind::Branch {
                cond,
                rs1: inst.rs1(),
                rs2: inst.rs2(),
                offset: b_type_imm(inst),
            })
        }
        op::LOAD => {
            let (width, signed) = match inst.funct3() {
                funct3::LB => (MemWidth::Byte, true),
                funct3::LH => (MemWidth::Half, true),
                funct3::LW => (MemWidth::Word, true),
                funct3::LBU => (MemWidth::Byte, false),
                funct3::LHU => (MemWidth::Half, false),
                _ => return Err(DecodeError::ReservedFunction { bits: inst }),
            };
            Ok(InstrKind::Load {
                width,
                signed,
                rd: inst.rd(),
                rs1: inst.rs1(),
                offset: i_type_imm(inst),
            })
        }
        op::STORE => {
            let width = match inst.funct3() {
                funct3::SB => MemWidth::Byte,
                funct3::SH => MemWidth::Half,
                funct3::SW => MemWidth::Word,
                _ => return Err(DecodeError::ReservedFunction { bits: inst }),
            };
            Ok(InstrKind::Store {
                width,
                rs1: inst.rs1(),
                rs2: inst.rs2(),
                offset: s_type_imm(inst),
            })
        }
        op::OP_IMM => {
            let imm = i_type_imm(inst);
            let (alu, imm) = match inst.funct3() {
                funct3::ADD_SUB => (AluOp::Add, imm),
                funct3::SLT => (AluOp::Slt, imm),
                funct3::SLTU => (AluOp::Sltu, imm),
                funct3::XOR => (AluOp::Xor, imm),
                funct3::OR => (AluOp::Or, imm),
                funct3::AND => (AluOp::And, imm),
                funct3::SLL => match inst.funct7() {
                    funct7::DEFAULT => (AluOp::Sll, imm & 0x1F),
                    _ => return Err(DecodeError::ReservedFunction { bits: inst }),
                },
                funct3::SRL_SRA => match inst.funct7() {
                    funct7::DEFAULT => (AluOp::Srl, imm & 0x1F),
                    funct7::ALT => (AluOp::Sra, imm & 0x1F),
                    _ => return Err(DecodeError::ReservedFunction { bits: inst }),
                },
                _ => return Err(DecodeError::ReservedFunction { bits: inst }),
            };
            Ok(InstrKind::AluImm {
                op: alu,
                rd: inst.rd(),
                rs1: inst.rs1(),
                imm,
            })
        }
        op::OP_REG => {
            let alu = match (inst.funct3(), inst.funct7()) {
                (funct3::ADD_SUB, funct7::DEFAULT) => AluOp::Add,
                (funct3::ADD_SUB, funct7::ALT) => AluOp::Sub,
                (funct3::SLL, funct7::DEFAULT) => AluOp::Sll,
                (funct3::SLT, funct7::DEFAULT) => AluOp::Slt,
                (funct3::SLTU, funct7::DEFAULT) => AluOp::Sltu,
                (funct3::XOR, funct7::DEFAULT) => AluOp::Xor,
                (funct3::SRL_SRA, funct7::DEFAULT) => AluOp::Srl,
                (funct3::SRL_SRA, funct7::ALT) => AluOp::Sra,
                (funct3::OR, funct7::DEFAULT) => AluOp::Or,
                (funct3::AND, funct7::DEFAULT) => AluOp::And,
                _ => return Err(DecodeError::ReservedFunction { bits: inst }),
            };
            Ok(InstrKind::Alu {
                op: alu,
                rd: inst.rd(),
                rs1: inst.rs1(),
                rs2: inst.rs2(),
            })
        }
        op::MISC_MEM => match inst.funct3() {
            funct3::FENCE => Ok(InstrKind::Fence),
            funct3::FENCE_I => Ok(InstrKind::FenceI),
            _ => Err(DecodeError::ReservedFunction { bits: inst }),
        },
        op::SYSTEM => match inst.funct3() {
            funct3::PRIV => match (inst >> 20) & CSR_MASK {
                system::ECALL => Ok(InstrKind::Ecall),
                system::EBREAK => Ok(InstrKind::Ebreak),
                system::MRET => Ok(InstrKind::Mret),
                _ => Err(DecodeError::ReservedFunction { bits: inst }),
            },
            f3 => {
                let op = match f3 {
                    funct3::CSRRW | funct3::CSRRW_I => CsrAtomicOp::Write,
                    funct3::CSRRS | funct3::CSRRS_I => CsrAtomicOp::Set,
                    funct3::CSRRC | funct3::CSRRC_I => CsrAtomicOp::Clear,
                    _ => return Err(DecodeError::ReservedFunction { bits: inst }),
                };
                let src = if f3 >= funct3::CSRRW_I {
                    CsrOperand::Imm(inst.rs1() as u8)
                } else {
                    CsrOperand::Reg(inst.rs1())
                };
                Ok(InstrKind::Csr {
                    op,
                    rd: inst.rd(),
                    addr: inst.csr(),
                    src,
                })
            }
        },
        opcode => Err(DecodeError::UnknownOpcode { opcode, bits: inst }),
    }
}
