//! Register File Tests.
//!
//! Verifies the hardwired-zero invariant, plain read/write behavior, and
//! program counter manipulation.

use rvpipe::common::RegisterFile;

#[test]
fn registers_start_at_zero() {
    let rf = RegisterFile::new();
    for idx in 0..32 {
        assert_eq!(rf.read(idx), 0);
    }
    assert_eq!(rf.read_pc(), 0);
}

#[test]
fn write_then_read_round_trips() {
    let mut rf = RegisterFile::new();
    for idx in 1..32 {
        rf.write(idx, idx as u32 * 3);
    }
    for idx in 1..32 {
        assert_eq!(rf.read(idx), idx as u32 * 3);
    }
}

#[test]
fn r0_write_is_discarded() {
    let mut rf = RegisterFile::new();
    rf.write(0, 0xDEAD_BEEF);
    assert_eq!(rf.read(0), 0, "R0 must stay hardwired to zero");
}

#[test]
fn pc_write_and_advance() {
    let mut rf = RegisterFile::new();
    rf.write_pc(0x100);
    assert_eq!(rf.read_pc(), 0x100);
    rf.advance_pc(4);
    assert_eq!(rf.read_pc(), 0x104);
}

#[test]
fn pc_advance_wraps_at_32_bits() {
    let mut rf = RegisterFile::new();
    rf.write_pc(0xFFFF_FFFC);
    rf.advance_pc(8);
    assert_eq!(rf.read_pc(), 0x4);
}

#[test]
fn snapshot_reflects_current_values() {
    let mut rf = RegisterFile::new();
    rf.write(7, 42);
    let snap = rf.snapshot();
    assert_eq!(snap[7], 42);
    assert_eq!(snap[0], 0);
}
