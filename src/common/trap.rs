//! Trap definitions: synchronous exceptions and asynchronous interrupts.
//!
//! This module defines the trap vocabulary of the simulator. It provides:
//! 1. **Exceptions:** All RV32I machine-mode synchronous exception causes.
//! 2. **Interrupts:** The three standard machine interrupts with their
//!    `mip`/`mie` bit positions and `mcause` codes.
//! 3. **Cause Codes:** Constants matching the values architecturally visible
//!    in `mcause`.

use std::fmt;

/// Bit set in `mcause` when the trap is an asynchronous interrupt.
pub const CAUSE_INTERRUPT_BIT: u32 = 1 << 31;

/// Cause-code constants as written to `mcause`.
pub mod cause {
    /// Exception codes (`mcause` bit 31 clear).
    pub mod exception {
        /// Instruction address misaligned (0).
        pub const INSTRUCTION_MISALIGNED: u32 = 0;
        /// Instruction access fault (1).
        pub const INSTRUCTION_ACCESS_FAULT: u32 = 1;
        /// Illegal instruction (2).
        pub const ILLEGAL_INSTRUCTION: u32 = 2;
        /// Breakpoint (3).
        pub const BREAKPOINT: u32 = 3;
        /// Load address misaligned (4).
        pub const LOAD_MISALIGNED: u32 = 4;
        /// Load access fault (5).
        pub const LOAD_ACCESS_FAULT: u32 = 5;
        /// Store address misaligned (6).
        pub const STORE_MISALIGNED: u32 = 6;
        /// Store access fault (7).
        pub const STORE_ACCESS_FAULT: u32 = 7;
        /// Environment call from U-mode (8).
        pub const ECALL_FROM_U: u32 = 8;
        /// Environment call from M-mode (11).
        pub const ECALL_FROM_M: u32 = 11;
    }

    /// Interrupt codes (`mcause` bit 31 set).
    pub mod interrupt {
        /// Machine software interrupt.
        pub const SOFTWARE: u32 = 0x8000_0003;
        /// Machine timer interrupt.
        pub const TIMER: u32 = 0x8000_0007;
        /// Machine external interrupt.
        pub const EXTERNAL: u32 = 0x8000_000B;
    }
}

/// Synchronous exception raised by an instruction.
///
/// Covers the machine-mode exception causes of the RISC-V Privileged
/// Specification that this core can architecturally report. The payload,
/// where present, becomes `mtval` on trap entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Exception {
    /// Instruction fetch from a misaligned address. Payload: the address.
    InstructionMisaligned(u32),
    /// Instruction fetch access fault. Payload: the faulting address.
    InstructionAccessFault(u32),
    /// Invalid or unimplemented instruction encoding. Payload: the encoding.
    IllegalInstruction(u32),
    /// EBREAK instruction or hardware breakpoint.
    Breakpoint,
    /// Misaligned load address. Payload: the address.
    LoadMisaligned(u32),
    /// Load access fault. Payload: the faulting address.
    LoadAccessFault(u32),
    /// Misaligned store address. Payload: the address.
    StoreMisaligned(u32),
    /// Store access fault. Payload: the faulting address.
    StoreAccessFault(u32),
    /// ECALL executed in user mode.
    EnvironmentCallFromU,
    /// ECALL executed in machine mode.
    EnvironmentCallFromM,
}

impl Exception {
    /// Returns the exception code written to `mcause` (bit 31 clear).
    pub fn code(&self) -> u32 {
        use cause::exception::*;
        match self {
            Exception::InstructionMisaligned(_) => INSTRUCTION_MISALIGNED,
            Exception::InstructionAccessFault(_) => INSTRUCTION_ACCESS_FAULT,
            Exception::IllegalInstruction(_) => ILLEGAL_INSTRUCTION,
            Exception::Breakpoint => BREAKPOINT,
            Exception::LoadMisaligned(_) => LOAD_MISALIGNED,
            Exception::LoadAccessFault(_) => LOAD_ACCESS_FAULT,
            Exception::StoreMisaligned(_) => STORE_MISALIGNED,
            Exception::StoreAccessFault(_) => STORE_ACCESS_FAULT,
            Exception::EnvironmentCallFromU => ECALL_FROM_U,
            Exception::EnvironmentCallFromM => ECALL_FROM_M,
        }
    }

    /// Returns the value written to `mtval` on trap entry.
    pub fn tval(&self) -> u32 {
        match self {
            Exception::InstructionMisaligned(a)
            | Exception::InstructionAccessFault(a)
            | Exception::LoadMisaligned(a)
            | Exception::LoadAccessFault(a)
            | Exception::StoreMisaligned(a)
            | Exception::StoreAccessFault(a)
            | Exception::IllegalInstruction(a) => *a,
            _ => 0,
        }
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exception::InstructionMisaligned(a) => {
                write!(f, "InstructionMisaligned({:#x})", a)
            }
            Exception::InstructionAccessFault(a) => {
                write!(f, "InstructionAccessFault({:#x})", a)
            }
            Exception::IllegalInstruction(bits) => write!(f, "IllegalInstruction({:#x})", bits),
            Exception::Breakpoint => write!(f, "Breakpoint"),
            Exception::LoadMisaligned(a) => write!(f, "LoadMisaligned({:#x})", a),
            Exception::LoadAccessFault(a) => write!(f, "LoadAccessFault({:#x})", a),
            Exception::StoreMisaligned(a) => write!(f, "StoreMisaligned({:#x})", a),
            Exception::StoreAccessFault(a) => write!(f, "StoreAccessFault({:#x})", a),
            Exception::EnvironmentCallFromU => write!(f, "EnvironmentCallFromU"),
            Exception::EnvironmentCallFromM => write!(f, "EnvironmentCallFromM"),
        }
    }
}

impl std::error::Error for Exception {}

/// One of the three standard machine-mode interrupts.
///
/// The discriminants are the `mip`/`mie` bit positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Irq {
    /// Machine software interrupt (`mip.MSIP`, bit 3).
    Software = 3,
    /// Machine timer interrupt (`mip.MTIP`, bit 7).
    Timer = 7,
    /// Machine external interrupt (`mip.MEIP`, bit 11).
    External = 11,
}

impl Irq {
    /// All interrupts in delivery priority order (highest first).
    pub const PRIORITY: [Irq; 3] = [Irq::External, Irq::Software, Irq::Timer];

    /// Returns the `mip`/`mie` bit position of this interrupt.
    pub fn bit(self) -> u32 {
        self as u32
    }

    /// Returns the single-bit mask in `mip`/`mie` for this interrupt.
    pub fn mask(self) -> u32 {
        1 << self.bit()
    }

    /// Returns the `mcause` code for this interrupt (bit 31 set).
    pub fn code(self) -> u32 {
        match self {
            Irq::Software => cause::interrupt::SOFTWARE,
            Irq::Timer => cause::interrupt::TIMER,
            Irq::External => cause::interrupt::EXTERNAL,
        }
    }

    /// Maps a `mip` bit position back to an interrupt, if it names one.
    pub fn from_bit(bit: u32) -> Option<Irq> {
        match bit {
            3 => Some(Irq::Software),
            7 => Some(Irq::Timer),
            11 => Some(Irq::External),
            _ => None,
        }
    }
}

impl fmt::Display for Irq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Irq::Software => write!(f, "MachineSoftwareInterrupt"),
            Irq::Timer => write!(f, "MachineTimerInterrupt"),
            Irq::External => write!(f, "MachineExternalInterrupt"),
        }
    }
}
