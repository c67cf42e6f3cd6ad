//! Trap Controller and Interrupt Controller Tests.
//!
//! Verifies trap-entry CSR state, vectored dispatch, the MRET round trip,
//! interrupt priority and gating, and the level/edge trigger disciplines.

use rvpipe::common::trap::CAUSE_INTERRUPT_BIT;
use rvpipe::common::{Exception, Irq};
use rvpipe::core::csr::{self, CsrFile};
use rvpipe::core::irq::InterruptController;
use rvpipe::core::trap::TrapController;

fn armed(irq: Irq) -> (CsrFile, InterruptController) {
    let mut csrs = CsrFile::new();
    let mut ic = InterruptController::new();
    ic.set_global_enable(&mut csrs, true);
    ic.enable(&mut csrs, irq);
    ic.set_pending(&mut csrs, irq);
    (csrs, ic)
}

// ══════════════════════════════════════════════════════════
// 1. Exception entry
// ══════════════════════════════════════════════════════════

#[test]
fn exception_entry_saves_state_and_redirects() {
    let mut csrs = CsrFile::new();
    csrs.write(csr::MTVEC, 0x8000_0000);
    csrs.set_mstatus_mie(true);

    let handler =
        TrapController::raise_exception(&mut csrs, &Exception::EnvironmentCallFromM, 0x44);

    assert_eq!(handler, 0x8000_0000);
    assert_eq!(csrs.read(csr::MEPC), 0x44);
    assert_eq!(csrs.read(csr::MCAUSE), 11);
    assert_eq!(csrs.read(csr::MTVAL), 0);
    assert!(!csrs.mstatus_mie(), "MIE cleared on entry");
    assert!(csrs.mstatus_mpie(), "old MIE pushed into MPIE");
    assert_eq!(csrs.mstatus_mpp(), 3, "MPP records machine mode");
}

#[test]
fn exception_entry_records_tval() {
    let mut csrs = CsrFile::new();
    TrapController::raise_exception(&mut csrs, &Exception::IllegalInstruction(0xBAD), 0x10);
    assert_eq!(csrs.read(csr::MCAUSE), 2);
    assert_eq!(csrs.read(csr::MTVAL), 0xBAD);
}

#[test]
fn exception_with_mie_clear_leaves_mpie_clear() {
    let mut csrs = CsrFile::new();
    TrapController::raise_exception(&mut csrs, &Exception::Breakpoint, 0);
    assert!(!csrs.mstatus_mpie());
    assert!(!csrs.mstatus_mie());
}

#[test]
fn exceptions_ignore_vectored_mode() {
    let mut csrs = CsrFile::new();
    csrs.write(csr::MTVEC, 0x8000_0001);
    let handler = TrapController::raise_exception(&mut csrs, &Exception::Breakpoint, 0);
    assert_eq!(handler, 0x8000_0000, "exceptions always target BASE");
}

// ══════════════════════════════════════════════════════════
// 2. Interrupt delivery
// ══════════════════════════════════════════════════════════

#[test]
fn interrupt_delivery_uses_next_pc_and_interrupt_cause() {
    let (mut csrs, mut ic) = armed(Irq::Timer);
    csrs.write(csr::MTVEC, 0x8000_0000);

    let handler = TrapController::check_and_deliver_interrupt(&mut csrs, &mut ic, 0x200);

    assert_eq!(handler, Some(0x8000_0000));
    assert_eq!(csrs.read(csr::MEPC), 0x200);
    assert_eq!(csrs.read(csr::MCAUSE), 0x8000_0007);
    assert_ne!(csrs.read(csr::MCAUSE) & CAUSE_INTERRUPT_BIT, 0);
    assert!(!csrs.mstatus_mie());
}

#[test]
fn interrupt_delivery_vectored_offset() {
    let (mut csrs, mut ic) = armed(Irq::External);
    csrs.write(csr::MTVEC, 0x8000_0001);
    let handler = TrapController::check_and_deliver_interrupt(&mut csrs, &mut ic, 0);
    assert_eq!(handler, Some(0x8000_0000 + 4 * 11));
}

#[test]
fn interrupt_not_delivered_when_global_disabled() {
    let (mut csrs, mut ic) = armed(Irq::Timer);
    ic.set_global_enable(&mut csrs, false);
    assert_eq!(
        TrapController::check_and_deliver_interrupt(&mut csrs, &mut ic, 0),
        None
    );
}

#[test]
fn level_triggered_pending_survives_delivery() {
    let (mut csrs, mut ic) = armed(Irq::Timer);
    TrapController::check_and_deliver_interrupt(&mut csrs, &mut ic, 0).unwrap();
    assert!(
        ic.is_pending(&csrs, Irq::Timer),
        "level-triggered pending stays until the source is quieted"
    );
}

#[test]
fn edge_triggered_pending_clears_on_delivery() {
    let mut csrs = CsrFile::new();
    let mut ic = InterruptController::new();
    ic.set_edge_triggered(Irq::Software);
    ic.set_global_enable(&mut csrs, true);
    ic.enable(&mut csrs, Irq::Software);
    ic.set_pending(&mut csrs, Irq::Software);

    TrapController::check_and_deliver_interrupt(&mut csrs, &mut ic, 0).unwrap();
    assert!(!ic.is_pending(&csrs, Irq::Software));
}

// ══════════════════════════════════════════════════════════
// 3. MRET round trip
// ══════════════════════════════════════════════════════════

#[test]
fn mret_restores_interrupt_state() {
    let mut csrs = CsrFile::new();
    csrs.write(csr::MTVEC, 0x8000_0000);
    csrs.set_mstatus_mie(true);
    TrapController::raise_exception(&mut csrs, &Exception::EnvironmentCallFromM, 0x58);

    let target = TrapController::trap_return(&mut csrs);

    assert_eq!(target, 0x58, "PC restored from mepc");
    assert!(csrs.mstatus_mie(), "MIE restored from MPIE");
    assert!(csrs.mstatus_mpie(), "MPIE set after MRET");
    assert_eq!(csrs.mstatus_mpp(), 0, "MPP dropped to user");
}

#[test]
fn mret_with_interrupts_originally_disabled() {
    let mut csrs = CsrFile::new();
    TrapController::raise_exception(&mut csrs, &Exception::Breakpoint, 0x10);
    TrapController::trap_return(&mut csrs);
    assert!(!csrs.mstatus_mie(), "MIE stays clear when it was clear");
}

// ══════════════════════════════════════════════════════════
// 4. Interrupt controller logic
// ══════════════════════════════════════════════════════════

#[test]
fn priority_external_over_software_over_timer() {
    let mut csrs = CsrFile::new();
    let mut ic = InterruptController::new();
    ic.set_global_enable(&mut csrs, true);
    for irq in [Irq::Software, Irq::Timer, Irq::External] {
        ic.enable(&mut csrs, irq);
        ic.set_pending(&mut csrs, irq);
    }
    assert_eq!(ic.deliverable(&csrs), Some(Irq::External));

    ic.clear_pending(&mut csrs, Irq::External);
    assert_eq!(ic.deliverable(&csrs), Some(Irq::Software));

    ic.clear_pending(&mut csrs, Irq::Software);
    assert_eq!(ic.deliverable(&csrs), Some(Irq::Timer));
}

#[test]
fn pending_without_enable_is_not_deliverable() {
    let mut csrs = CsrFile::new();
    let mut ic = InterruptController::new();
    ic.set_global_enable(&mut csrs, true);
    ic.set_pending(&mut csrs, Irq::Timer);
    assert_eq!(ic.deliverable(&csrs), None);
    assert!(ic.is_pending(&csrs, Irq::Timer));
}

#[test]
fn enable_disable_round_trip() {
    let mut csrs = CsrFile::new();
    let ic = InterruptController::new();
    ic.enable(&mut csrs, Irq::External);
    assert!(ic.is_enabled(&csrs, Irq::External));
    ic.disable(&mut csrs, Irq::External);
    assert!(!ic.is_enabled(&csrs, Irq::External));
}

#[test]
fn sync_lines_follows_level_sources() {
    let mut csrs = CsrFile::new();
    let mut ic = InterruptController::new();
    let mask = Irq::Timer.mask() | Irq::Software.mask();

    ic.sync_lines(&mut csrs, Irq::Timer.mask(), mask);
    assert!(ic.is_pending(&csrs, Irq::Timer));

    // Line drops: level-triggered pending follows.
    ic.sync_lines(&mut csrs, 0, mask);
    assert!(!ic.is_pending(&csrs, Irq::Timer));
}

#[test]
fn sync_lines_leaves_unmanaged_bits_alone() {
    let mut csrs = CsrFile::new();
    let mut ic = InterruptController::new();
    ic.set_pending(&mut csrs, Irq::External);

    ic.sync_lines(&mut csrs, 0, Irq::Timer.mask() | Irq::Software.mask());
    assert!(
        ic.is_pending(&csrs, Irq::External),
        "external is outside the device mask"
    );
}

#[test]
fn sync_lines_edge_latches_on_rising_edge_only() {
    let mut csrs = CsrFile::new();
    let mut ic = InterruptController::new();
    ic.set_edge_triggered(Irq::Software);
    let mask = Irq::Software.mask();

    ic.sync_lines(&mut csrs, mask, mask);
    assert!(ic.is_pending(&csrs, Irq::Software));

    // Deassert: an edge-triggered pending bit stays latched.
    ic.sync_lines(&mut csrs, 0, mask);
    assert!(ic.is_pending(&csrs, Irq::Software));

    // Acknowledge clears it; a steady-high line does not re-latch.
    ic.acknowledge(&mut csrs, Irq::Software);
    assert!(!ic.is_pending(&csrs, Irq::Software));
}

#[test]
fn reset_clears_controller_state() {
    let mut csrs = CsrFile::new();
    let mut ic = InterruptController::new();
    ic.set_global_enable(&mut csrs, true);
    ic.enable(&mut csrs, Irq::Timer);
    ic.set_pending(&mut csrs, Irq::Timer);

    ic.reset(&mut csrs);

    assert_eq!(ic.pending_mask(&csrs), 0);
    assert_eq!(ic.enabled_mask(&csrs), 0);
    assert!(!csrs.mstatus_mie());
}
