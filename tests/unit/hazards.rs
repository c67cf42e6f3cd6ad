//! RAW Hazard Detector Tests.
//!
//! The detector is a pure function over the decode candidate and the
//! start-of-tick occupants of the decode-to-execute and execute-to-memory
//! latches. These tests pin down the stall durations, the R0 exemption,
//! and which operands count as decode-time sources.

use rvpipe::core::pipeline::hazard::{check, HazardDecision};
use rvpipe::isa::instruction::InstrKind;
use rvpipe::isa::Instruction;

use crate::common::builder::*;

fn inst(kind: InstrKind) -> Instruction {
    Instruction::new(0, kind)
}

fn bubble_inst() -> Instruction {
    Instruction::bubble()
}

// ══════════════════════════════════════════════════════════
// 1. No-hazard cases
// ══════════════════════════════════════════════════════════

#[test]
fn independent_instructions_proceed() {
    let candidate = inst(add(1, 2, 3));
    let producer = inst(add(4, 5, 6));
    assert_eq!(
        check(&candidate, &producer, &bubble_inst()),
        HazardDecision::Proceed
    );
}

#[test]
fn empty_pipeline_proceeds() {
    let candidate = inst(add(1, 2, 3));
    assert_eq!(
        check(&candidate, &bubble_inst(), &bubble_inst()),
        HazardDecision::Proceed
    );
}

#[test]
fn r0_dependency_is_never_a_hazard() {
    // ADDI R0, R0, 5 in flight; ADD R1, R0, R0 at decode.
    let candidate = inst(add(1, 0, 0));
    let producer = inst(addi(0, 0, 5));
    assert_eq!(
        check(&candidate, &producer, &bubble_inst()),
        HazardDecision::Proceed
    );
}

#[test]
fn producers_without_destination_cause_no_hazard() {
    let candidate = inst(add(1, 2, 3));
    let store = inst(sw(2, 0, 3));
    let branch = inst(beq(2, 3, 8));
    assert_eq!(check(&candidate, &store, &branch), HazardDecision::Proceed);
}

#[test]
fn candidates_without_sources_never_stall() {
    let producer = inst(addi(5, 0, 1));
    for candidate in [inst(lui(5, 1)), inst(jal(1, 8)), inst(ecall())] {
        assert_eq!(
            check(&candidate, &producer, &bubble_inst()),
            HazardDecision::Proceed
        );
    }
}

// ══════════════════════════════════════════════════════════
// 2. Stall durations
// ══════════════════════════════════════════════════════════

#[test]
fn producer_entering_execute_stalls_three_cycles() {
    let candidate = inst(add(4, 1, 5));
    let producer = inst(addi(1, 0, 7));
    assert_eq!(
        check(&candidate, &producer, &bubble_inst()),
        HazardDecision::Stall { cycles: 3 }
    );
}

#[test]
fn producer_entering_memory_stalls_two_cycles() {
    let candidate = inst(add(4, 1, 5));
    let producer = inst(addi(1, 0, 7));
    assert_eq!(
        check(&candidate, &bubble_inst(), &producer),
        HazardDecision::Stall { cycles: 2 }
    );
}

#[test]
fn both_latches_matching_takes_the_longer_stall() {
    let candidate = inst(add(4, 1, 2));
    let exec_producer = inst(addi(1, 0, 7));
    let mem_producer = inst(addi(2, 0, 9));
    assert_eq!(
        check(&candidate, &exec_producer, &mem_producer),
        HazardDecision::Stall { cycles: 3 }
    );
}

#[test]
fn load_producer_stalls_consumer() {
    let candidate = inst(add(3, 1, 4));
    let producer = inst(lw(1, 100, 2));
    assert_eq!(
        check(&candidate, &producer, &bubble_inst()),
        HazardDecision::Stall { cycles: 3 }
    );
}

#[test]
fn second_source_register_is_checked() {
    let candidate = inst(add(4, 5, 1));
    let producer = inst(addi(1, 0, 7));
    assert_eq!(
        check(&candidate, &producer, &bubble_inst()),
        HazardDecision::Stall { cycles: 3 }
    );
}

// ══════════════════════════════════════════════════════════
// 3. Operand classification
// ══════════════════════════════════════════════════════════

#[test]
fn store_data_register_is_not_a_decode_source() {
    // SW R1, 100(R0) with the producer of R1 in flight: the data register
    // is sampled at the memory stage, so no stall.
    let candidate = inst(sw(1, 100, 0));
    let producer = inst(add(1, 2, 3));
    assert_eq!(
        check(&candidate, &producer, &bubble_inst()),
        HazardDecision::Proceed
    );
}

#[test]
fn store_base_register_is_a_decode_source() {
    // SW R5, 0(R1) needs R1 at execute for the address.
    let candidate = inst(sw(5, 0, 1));
    let producer = inst(addi(1, 0, 0x40));
    assert_eq!(
        check(&candidate, &producer, &bubble_inst()),
        HazardDecision::Stall { cycles: 3 }
    );
}

#[test]
fn branch_checks_both_sources() {
    let producer = inst(addi(2, 0, 5));
    let on_rs1 = inst(beq(2, 3, 8));
    let on_rs2 = inst(beq(3, 2, 8));
    assert_eq!(
        check(&on_rs1, &producer, &bubble_inst()),
        HazardDecision::Stall { cycles: 3 }
    );
    assert_eq!(
        check(&on_rs2, &producer, &bubble_inst()),
        HazardDecision::Stall { cycles: 3 }
    );
}

#[test]
fn csr_register_operand_is_a_decode_source() {
    let candidate = inst(csrrw(3, 0x340, 1));
    let producer = inst(addi(1, 0, 7));
    assert_eq!(
        check(&candidate, &producer, &bubble_inst()),
        HazardDecision::Stall { cycles: 3 }
    );
}

#[test]
fn csr_producer_blocks_its_consumer() {
    // The CSR old value lands in rd at writeback like any other result.
    let candidate = inst(add(4, 3, 0));
    let producer = inst(csrrs(3, 0xB00, 0));
    assert_eq!(
        check(&candidate, &producer, &bubble_inst()),
        HazardDecision::Stall { cycles: 3 }
    );
}
