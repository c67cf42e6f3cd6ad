//! RAW Hazard Detection.
//!
//! With no forwarding paths, a consumer must wait until its producer has
//! written the register file. The detector is a pure function from the
//! start-of-tick occupants of the decode-to-execute and execute-to-memory
//! latches plus the decode candidate to a decision: proceed, or stall for
//! a fixed number of cycles.
//!
//! The stall duration is the number of cycles until the producer completes
//! writeback: 3 when the producer is entering execute, 2 when it is
//! entering memory. A producer already in writeback needs no stall, since
//! writeback runs before decode within a tick. Writes to `R0` never
//! produce a hazard.

use crate::isa::Instruction;

/// Stall duration when the producer is entering the execute stage.
pub const STALL_FROM_EXECUTE: u8 = 3;
/// Stall duration when the producer is entering the memory stage.
pub const STALL_FROM_MEMORY: u8 = 2;

/// Decision of the hazard detector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HazardDecision {
    /// No dependency on an in-flight producer; decode may proceed.
    Proceed,
    /// A RAW dependency exists; decode must emit bubbles for `cycles`
    /// ticks before re-presenting the candidate.
    Stall {
        /// Number of stall cycles required.
        cycles: u8,
    },
}

/// Checks a decode candidate against the in-flight producers.
///
/// # Arguments
///
/// * `candidate` - The instruction presented at decode.
/// * `in_execute` - Start-of-tick occupant of the decode-to-execute latch.
/// * `in_memory` - Start-of-tick occupant of the execute-to-memory latch.
///
/// The memory-to-writeback latch is deliberately ignored: its occupant
/// completes writeback during the current tick, before decode reads the
/// register file.
pub fn check(
    candidate: &Instruction,
    in_execute: &Instruction,
    in_memory: &Instruction,
) -> HazardDecision {
    let (src1, src2) = candidate.decode_sources();
    if src1.is_none() && src2.is_none() {
        return HazardDecision::Proceed;
    }

    let conflicts = |producer: &Instruction| match producer.dest() {
        Some(rd) if rd != 0 => src1 == Some(rd) || src2 == Some(rd),
        _ => false,
    };

    if conflicts(in_execute) {
        HazardDecision::Stall {
            cycles: STALL_FROM_EXECUTE,
        }
    } else if conflicts(in_memory) {
        HazardDecision::Stall {
            cycles: STALL_FROM_MEMORY,
        }
    } else {
        HazardDecision::Proceed
    }
}
