//! Trap Controller.
//!
//! This module implements machine-mode trap entry and exit. It performs
//! the following:
//! 1. **Exception Entry:** Saves the faulting PC to `mepc`, writes
//!    `mcause`/`mtval`, pushes `MIE` into `MPIE`, disables interrupts, and
//!    resolves the handler PC from `mtvec`.
//! 2. **Interrupt Delivery:** Asks the interrupt controller for the
//!    highest-priority deliverable interrupt and performs the same
//!    save-and-redirect sequence with the next sequential PC.
//! 3. **Trap Return:** Implements MRET.
//!
//! The pipeline talks only to this controller; priority and trigger-mode
//! logic stays inside the interrupt controller.

use log::debug;

use crate::common::{Exception, Irq};
use crate::core::csr::{
    self, CsrFile, MSTATUS_MIE, MSTATUS_MPIE, MSTATUS_MPP_MASK, MSTATUS_MPP_SHIFT,
    MTVEC_MODE_VECTORED, PRIV_MACHINE, PRIV_USER,
};
use crate::core::irq::InterruptController;

/// Machine-mode trap entry and exit.
pub struct TrapController;

impl TrapController {
    /// Enters the handler for a synchronous exception.
    ///
    /// Atomic from the pipeline's point of view:
    /// 1. `mepc` <- PC of the faulting instruction.
    /// 2. `mcause` <- exception code (bit 31 clear).
    /// 3. `mtval` <- exception trap value.
    /// 4. `mstatus`: MPIE <- MIE, MIE <- 0, MPP <- machine.
    ///
    /// # Returns
    ///
    /// The handler PC: the `mtvec` BASE field. Vectored mode applies only
    /// to interrupts, so exceptions always target BASE.
    pub fn raise_exception(csrs: &mut CsrFile, exc: &Exception, pc: u32) -> u32 {
        debug!("trap: {} at pc={:#010x}", exc, pc);
        csrs.write(csr::MEPC, pc);
        csrs.write(csr::MCAUSE, exc.code());
        csrs.write(csr::MTVAL, exc.tval());
        Self::push_interrupt_state(csrs);
        csrs.mtvec_base()
    }

    /// Delivers a pending interrupt, if one is deliverable.
    ///
    /// The saved `mepc` is `next_pc`, the PC of the instruction that would
    /// have been fetched. The pending bit is not cleared for
    /// level-triggered interrupts; the handler must quiet the source.
    ///
    /// # Returns
    ///
    /// The handler PC when an interrupt was delivered, `None` otherwise.
    pub fn check_and_deliver_interrupt(
        csrs: &mut CsrFile,
        irq_ctrl: &mut InterruptController,
        next_pc: u32,
    ) -> Option<u32> {
        let irq = irq_ctrl.deliverable(csrs)?;
        debug!("interrupt: {} delivered, mepc={:#010x}", irq, next_pc);
        csrs.write(csr::MEPC, next_pc);
        csrs.write(csr::MCAUSE, irq.code());
        csrs.write(csr::MTVAL, 0);
        Self::push_interrupt_state(csrs);
        irq_ctrl.acknowledge(csrs, irq);
        Some(Self::interrupt_handler_pc(csrs, irq))
    }

    /// Returns from a machine-mode trap (MRET).
    ///
    /// Restores `mstatus.MIE` from `MPIE`, sets `MPIE`, drops `MPP` to
    /// user, and returns the PC saved in `mepc`.
    pub fn trap_return(csrs: &mut CsrFile) -> u32 {
        let mut mstatus = csrs.read(csr::MSTATUS);
        if mstatus & MSTATUS_MPIE != 0 {
            mstatus |= MSTATUS_MIE;
        } else {
            mstatus &= !MSTATUS_MIE;
        }
        mstatus |= MSTATUS_MPIE;
        mstatus &= !(MSTATUS_MPP_MASK << MSTATUS_MPP_SHIFT);
        mstatus |= PRIV_USER << MSTATUS_MPP_SHIFT;
        csrs.write(csr::MSTATUS, mstatus);
        let target = csrs.read(csr::MEPC);
        debug!("mret: returning to {:#010x}", target);
        target
    }

    /// Saves MIE into MPIE, clears MIE, and records machine mode in MPP.
    fn push_interrupt_state(csrs: &mut CsrFile) {
        let mut mstatus = csrs.read(csr::MSTATUS);
        if mstatus & MSTATUS_MIE != 0 {
            mstatus |= MSTATUS_MPIE;
        } else {
            mstatus &= !MSTATUS_MPIE;
        }
        mstatus &= !MSTATUS_MIE;
        mstatus &= !(MSTATUS_MPP_MASK << MSTATUS_MPP_SHIFT);
        mstatus |= PRIV_MACHINE << MSTATUS_MPP_SHIFT;
        csrs.write(csr::MSTATUS, mstatus);
    }

    /// Resolves the handler PC for an interrupt from `mtvec`.
    ///
    /// Direct mode targets BASE; vectored mode targets BASE + 4 * cause.
    fn interrupt_handler_pc(csrs: &CsrFile, irq: Irq) -> u32 {
        let base = csrs.mtvec_base();
        if csrs.mtvec_mode() == MTVEC_MODE_VECTORED {
            base.wrapping_add(4 * irq.bit())
        } else {
            base
        }
    }
}
