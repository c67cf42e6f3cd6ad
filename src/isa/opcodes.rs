//! RV32I encoding constants.
//!
//! Defines the major opcodes and function codes used by the binary decoder.
//!
//! # Structure
//!
//! - `op`: Major opcodes (Load, Store, Branch, Jal, OpImm, OpReg, System, ...).
//! - `funct3`: Minor opcodes distinguishing instructions within a major opcode.
//! - `funct7`: Additional opcode bits for R-type and shift instructions.
//! - `system`: funct12 encodings for ECALL, EBREAK, and MRET.

/// Major opcodes (instruction bits 6:0).
pub mod op {
    /// Load upper immediate.
    pub const LUI: u32 = 0x37;
    /// Add upper immediate to PC.
    pub const AUIPC: u32 = 0x17;
    /// Jump and link.
    pub const JAL: u32 = 0x6F;
    /// Jump and link register.
    pub const JALR: u32 = 0x67;
    /// Conditional branch.
    pub const BRANCH: u32 = 0x63;
    /// Memory load.
    pub const LOAD: u32 = 0x03;
    /// Memory store.
    pub const STORE: u32 = 0x23;
    /// Register-immediate ALU operation.
    pub const OP_IMM: u32 = 0x13;
    /// Register-register ALU operation.
    pub const OP_REG: u32 = 0x33;
    /// Memory ordering (FENCE, FENCE.I).
    pub const MISC_MEM: u32 = 0x0F;
    /// System instruction (ECALL, EBREAK, MRET, CSR ops).
    pub const SYSTEM: u32 = 0x73;
}

/// Minor opcodes (instruction bits 14:12).
pub mod funct3 {
    /// ADD/SUB selector (OP) or ADDI (OP-IMM).
    pub const ADD_SUB: u32 = 0x0;
    /// Shift left logical.
    pub const SLL: u32 = 0x1;
    /// Set less than (signed).
    pub const SLT: u32 = 0x2;
    /// Set less than (unsigned).
    pub const SLTU: u32 = 0x3;
    /// Exclusive or.
    pub const XOR: u32 = 0x4;
    /// SRL/SRA selector.
    pub const SRL_SRA: u32 = 0x5;
    /// Inclusive or.
    pub const OR: u32 = 0x6;
    /// Bitwise and.
    pub const AND: u32 = 0x7;

    /// Branch if equal.
    pub const BEQ: u32 = 0x0;
    /// Branch if not equal.
    pub const BNE: u32 = 0x1;
    /// Branch if less than (signed).
    pub const BLT: u32 = 0x4;
    /// Branch if greater than or equal (signed).
    pub const BGE: u32 = 0x5;
    /// Branch if less than (unsigned).
    pub const BLTU: u32 = 0x6;
    /// Branch if greater than or equal (unsigned).
    pub const BGEU: u32 = 0x7;

    /// Load byte (sign-extended).
    pub const LB: u32 = 0x0;
    /// Load halfword (sign-extended).
    pub const LH: u32 = 0x1;
    /// Load word.
    pub const LW: u32 = 0x2;
    /// Load byte (zero-extended).
    pub const LBU: u32 = 0x4;
    /// Load halfword (zero-extended).
    pub const LHU: u32 = 0x5;

    /// Store byte.
    pub const SB: u32 = 0x0;
    /// Store halfword.
    pub const SH: u32 = 0x1;
    /// Store word.
    pub const SW: u32 = 0x2;

    /// FENCE.
    pub const FENCE: u32 = 0x0;
    /// FENCE.I.
    pub const FENCE_I: u32 = 0x1;

    /// Privileged instruction (ECALL/EBREAK/MRET selected by funct12).
    pub const PRIV: u32 = 0x0;
    /// CSR read/write.
    pub const CSRRW: u32 = 0x1;
    /// CSR read and set bits.
    pub const CSRRS: u32 = 0x2;
    /// CSR read and clear bits.
    pub const CSRRC: u32 = 0x3;
    /// CSR read/write immediate.
    pub const CSRRW_I: u32 = 0x5;
    /// CSR read and set bits immediate.
    pub const CSRRS_I: u32 = 0x6;
    /// CSR read and clear bits immediate.
    pub const CSRRC_I: u32 = 0x7;
}

/// funct7 values (instruction bits 31:25).
pub mod funct7 {
    /// Default encoding (ADD, SRL, SLL, ...).
    pub const DEFAULT: u32 = 0x00;
    /// Alternate encoding (SUB, SRA).
    pub const ALT: u32 = 0x20;
}

/// funct12 values for SYSTEM instructions with funct3 = PRIV.
pub mod system {
    /// Environment call.
    pub const ECALL: u32 = 0x000;
    /// Environment breakpoint.
    pub const EBREAK: u32 = 0x001;
    /// Return from machine-mode trap.
    pub const MRET: u32 = 0x302;
}
