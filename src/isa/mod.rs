//! RV32I instruction set support.
//!
//! This module defines the instruction vocabulary of the simulator:
//! 1. **Record:** The decoded instruction record carried through the pipeline.
//! 2. **Encoding:** Major opcode and function-code constants.
//! 3. **Decoder:** Binary 32-bit encodings into instruction records.
//! 4. **ABI:** Register naming for dumps and traces.

/// ABI register aliases.
pub mod abi;
/// Binary instruction decoder.
pub mod decode;
/// Instruction record, operation kinds, and result descriptors.
pub mod instruction;
/// RV32I encoding constants (opcodes, funct3, funct7, system).
pub mod opcodes;

pub use decode::{decode, DecodeError};
pub use instruction::{
    AluOp, BranchCond, CsrAtomicOp, CsrOperand, CsrRequest, ExecResult, InstrKind, InstrState,
    Instruction, MemWidth,
};
