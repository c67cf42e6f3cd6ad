//! CSR Bank Tests.
//!
//! Verifies plain and atomic access, the read-only range, the
//! zero-operand sampling shortcut, counter shadows, and the `mstatus`
//! field helpers.

use rvpipe::core::csr::{
    self, CsrAtomicOp, CsrFile, CsrWrite, MISA_RV32I, MSTATUS_MIE, MSTATUS_MPIE,
};

// ══════════════════════════════════════════════════════════
// 1. Plain read/write
// ══════════════════════════════════════════════════════════

#[test]
fn reset_values() {
    let csrs = CsrFile::new();
    assert_eq!(csrs.read(csr::MISA), MISA_RV32I, "RV32I misa at reset");
    assert_eq!(csrs.read(csr::MSTATUS), 0);
    assert_eq!(csrs.read(csr::MTVEC), 0);
}

#[test]
fn write_then_read_round_trips() {
    let mut csrs = CsrFile::new();
    assert_eq!(csrs.write(csr::MSCRATCH, 0xDEAD_BEEF), CsrWrite::Stored);
    assert_eq!(csrs.read(csr::MSCRATCH), 0xDEAD_BEEF);
}

#[test]
fn unknown_csr_reads_zero_then_retains_writes() {
    let mut csrs = CsrFile::new();
    assert_eq!(csrs.read(0x123), 0);
    csrs.write(0x123, 77);
    assert_eq!(csrs.read(0x123), 77);
}

#[test]
fn read_only_range_rejects_writes() {
    let mut csrs = CsrFile::new();
    assert_eq!(csrs.write(csr::MVENDORID, 5), CsrWrite::ReadOnly);
    assert_eq!(csrs.read(csr::MVENDORID), 0);
    assert_eq!(csrs.write(0xFFF, 5), CsrWrite::ReadOnly);
    assert_eq!(csrs.read(0xFFF), 0);
}

// ══════════════════════════════════════════════════════════
// 2. Atomic operations
// ══════════════════════════════════════════════════════════

#[test]
fn atomic_write_returns_old_value() {
    let mut csrs = CsrFile::new();
    csrs.write(csr::MSCRATCH, 0x11);
    let (old, new) = csrs.atomic(CsrAtomicOp::Write, csr::MSCRATCH, 0x22, false);
    assert_eq!(old, 0x11);
    assert_eq!(new, 0x22);
    assert_eq!(csrs.read(csr::MSCRATCH), 0x22);
}

#[test]
fn atomic_set_ors_bits() {
    let mut csrs = CsrFile::new();
    csrs.write(csr::MSCRATCH, 0b1100);
    let (old, new) = csrs.atomic(CsrAtomicOp::Set, csr::MSCRATCH, 0b0011, false);
    assert_eq!(old, 0b1100);
    assert_eq!(new, 0b1111);
}

#[test]
fn atomic_clear_masks_bits() {
    let mut csrs = CsrFile::new();
    csrs.write(csr::MSCRATCH, 0b1111);
    let (old, new) = csrs.atomic(CsrAtomicOp::Clear, csr::MSCRATCH, 0b0101, false);
    assert_eq!(old, 0b1111);
    assert_eq!(new, 0b1010);
}

#[test]
fn atomic_suppressed_write_samples_only() {
    let mut csrs = CsrFile::new();
    csrs.write(csr::MSCRATCH, 0xAB);
    let (old, new) = csrs.atomic(CsrAtomicOp::Set, csr::MSCRATCH, 0xFF, true);
    assert_eq!(old, 0xAB);
    assert_eq!(new, 0xAB, "suppressed write must not modify the register");
    assert_eq!(csrs.read(csr::MSCRATCH), 0xAB);
}

#[test]
fn atomic_write_to_read_only_returns_old_without_storing() {
    let mut csrs = CsrFile::new();
    let (old, new) = csrs.atomic(CsrAtomicOp::Write, csr::MHARTID, 9, false);
    assert_eq!(old, 0);
    assert_eq!(new, 0);
    assert_eq!(csrs.read(csr::MHARTID), 0);
}

// ══════════════════════════════════════════════════════════
// 3. Counters and shadows
// ══════════════════════════════════════════════════════════

#[test]
fn cycle_shadow_mirrors_mcycle() {
    let mut csrs = CsrFile::new();
    csrs.increment_cycle();
    csrs.increment_cycle();
    assert_eq!(csrs.read(csr::MCYCLE), 2);
    assert_eq!(csrs.read(csr::CYCLE), 2);
}

#[test]
fn instret_shadow_mirrors_minstret() {
    let mut csrs = CsrFile::new();
    csrs.increment_instret();
    assert_eq!(csrs.read(csr::MINSTRET), 1);
    assert_eq!(csrs.read(csr::INSTRET), 1);
}

#[test]
fn time_shadow_follows_sync() {
    let mut csrs = CsrFile::new();
    csrs.sync_time(0x1_2345_6789);
    assert_eq!(csrs.read(csr::TIME), 0x2345_6789, "low 32 bits of mtime");
}

// ══════════════════════════════════════════════════════════
// 4. Field helpers
// ══════════════════════════════════════════════════════════

#[test]
fn mstatus_mie_helpers() {
    let mut csrs = CsrFile::new();
    assert!(!csrs.mstatus_mie());
    csrs.set_mstatus_mie(true);
    assert!(csrs.mstatus_mie());
    assert_eq!(csrs.read(csr::MSTATUS) & MSTATUS_MIE, MSTATUS_MIE);
    csrs.set_mstatus_mie(false);
    assert!(!csrs.mstatus_mie());
}

#[test]
fn mstatus_mpie_and_mpp_fields() {
    let mut csrs = CsrFile::new();
    csrs.write(csr::MSTATUS, MSTATUS_MPIE | (3 << 11));
    assert!(csrs.mstatus_mpie());
    assert_eq!(csrs.mstatus_mpp(), 3);
}

#[test]
fn mtvec_base_and_mode() {
    let mut csrs = CsrFile::new();
    csrs.write(csr::MTVEC, 0x8000_0001);
    assert_eq!(csrs.mtvec_base(), 0x8000_0000);
    assert_eq!(csrs.mtvec_mode(), 1);
}
