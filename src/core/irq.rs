//! Interrupt Controller.
//!
//! This module models the pending/enable/priority logic for the three
//! standard machine interrupts against the CSR bank. It provides:
//! 1. **Pending/Enable:** Manipulation of the `mip` and `mie` bits and the
//!    `mstatus.MIE` global gate.
//! 2. **Priority:** Deliverability resolution in the order
//!    external > software > timer.
//! 3. **Triggering:** Level-triggered by default; any interrupt may be
//!    configured edge-triggered, in which case delivery acknowledgement
//!    clears the pending bit and the source must produce a new edge to
//!    re-assert.
//!
//! The controller owns no interrupt state of its own beyond trigger modes
//! and edge bookkeeping; pending and enable bits live in `mip`/`mie`.

use crate::common::Irq;
use crate::core::csr::{CsrFile, MIE, MIP};

/// Mask of the three valid interrupt bits in `mip`/`mie`.
const VALID_MASK: u32 = (1 << 3) | (1 << 7) | (1 << 11);

/// Machine interrupt controller.
#[derive(Clone, Debug, Default)]
pub struct InterruptController {
    /// Bits configured edge-triggered.
    edge_mask: u32,
    /// Edge-triggered bits latched pending and not yet acknowledged.
    latched: u32,
    /// Device line state at the previous sync, for edge detection.
    last_lines: u32,
}

impl InterruptController {
    /// Creates a controller with all interrupts level-triggered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an interrupt pending in `mip`.
    pub fn set_pending(&mut self, csrs: &mut CsrFile, irq: Irq) {
        let mip = csrs.read(MIP) | irq.mask();
        csrs.write(MIP, mip);
        if self.is_edge_triggered(irq) {
            self.latched |= irq.mask();
        }
    }

    /// Clears an interrupt's pending bit in `mip`.
    pub fn clear_pending(&mut self, csrs: &mut CsrFile, irq: Irq) {
        let mip = csrs.read(MIP) & !irq.mask();
        csrs.write(MIP, mip);
        self.latched &= !irq.mask();
    }

    /// Returns true if the interrupt is pending in `mip`.
    pub fn is_pending(&self, csrs: &CsrFile, irq: Irq) -> bool {
        csrs.read(MIP) & irq.mask() != 0
    }

    /// Enables an interrupt in `mie`.
    pub fn enable(&self, csrs: &mut CsrFile, irq: Irq) {
        let mie = csrs.read(MIE) | irq.mask();
        csrs.write(MIE, mie);
    }

    /// Disables an interrupt in `mie`.
    pub fn disable(&self, csrs: &mut CsrFile, irq: Irq) {
        let mie = csrs.read(MIE) & !irq.mask();
        csrs.write(MIE, mie);
    }

    /// Returns true if the interrupt is enabled in `mie`.
    pub fn is_enabled(&self, csrs: &CsrFile, irq: Irq) -> bool {
        csrs.read(MIE) & irq.mask() != 0
    }

    /// Sets or clears the global interrupt enable, `mstatus.MIE`.
    pub fn set_global_enable(&self, csrs: &mut CsrFile, on: bool) {
        csrs.set_mstatus_mie(on);
    }

    /// Returns the pending-bit mask restricted to the valid interrupts.
    pub fn pending_mask(&self, csrs: &CsrFile) -> u32 {
        csrs.read(MIP) & VALID_MASK
    }

    /// Returns the enable-bit mask restricted to the valid interrupts.
    pub fn enabled_mask(&self, csrs: &CsrFile) -> u32 {
        csrs.read(MIE) & VALID_MASK
    }

    /// Returns the highest-priority deliverable interrupt.
    ///
    /// An interrupt is deliverable when it is pending in `mip`, enabled in
    /// `mie`, and `mstatus.MIE` is set. Priority: external > software >
    /// timer.
    pub fn deliverable(&self, csrs: &CsrFile) -> Option<Irq> {
        if !csrs.mstatus_mie() {
            return None;
        }
        let ready = csrs.read(MIP) & csrs.read(MIE) & VALID_MASK;
        Irq::PRIORITY.into_iter().find(|irq| ready & irq.mask() != 0)
    }

    /// Acknowledges a delivered interrupt.
    ///
    /// Edge-triggered interrupts have their pending bit cleared; for
    /// level-triggered interrupts the handler must quiet the source (e.g.
    /// write `mtimecmp` or clear `msip`) and the bit stays asserted until
    /// the next line sync observes the source low.
    pub fn acknowledge(&mut self, csrs: &mut CsrFile, irq: Irq) {
        if self.latched & irq.mask() != 0 {
            self.clear_pending(csrs, irq);
        }
    }

    /// Configures an interrupt as edge-triggered.
    pub fn set_edge_triggered(&mut self, irq: Irq) {
        self.edge_mask |= irq.mask();
    }

    /// Configures an interrupt as level-triggered (the default).
    pub fn set_level_triggered(&mut self, irq: Irq) {
        self.edge_mask &= !irq.mask();
        self.latched &= !irq.mask();
    }

    /// Returns true if the interrupt is configured edge-triggered.
    pub fn is_edge_triggered(&self, irq: Irq) -> bool {
        self.edge_mask & irq.mask() != 0
    }

    /// Mirrors device IRQ lines into `mip`, once per tick.
    ///
    /// # Arguments
    ///
    /// * `lines` - Bits currently asserted by devices.
    /// * `mask` - Bits devices are responsible for; bits outside the mask
    ///   (e.g. a software-raised external interrupt) are left untouched.
    ///
    /// Level-triggered bits inside the mask follow the line. Edge-triggered
    /// bits latch pending on a rising edge and are unaffected by the line
    /// dropping.
    pub fn sync_lines(&mut self, csrs: &mut CsrFile, lines: u32, mask: u32) {
        let mask = mask & VALID_MASK;
        let rising = lines & !self.last_lines;
        self.last_lines = lines;

        let mut mip = csrs.read(MIP);
        let level_bits = mask & !self.edge_mask;
        mip = (mip & !level_bits) | (lines & level_bits);

        let edge_bits = mask & self.edge_mask;
        let newly_latched = rising & edge_bits;
        self.latched |= newly_latched;
        mip |= self.latched & edge_bits;

        csrs.write(MIP, mip);
    }

    /// Resets the controller: clears valid pending and enable bits, the
    /// global enable, and all edge latches.
    pub fn reset(&mut self, csrs: &mut CsrFile) {
        let mip = csrs.read(MIP) & !VALID_MASK;
        csrs.write(MIP, mip);
        let mie = csrs.read(MIE) & !VALID_MASK;
        csrs.write(MIE, mie);
        csrs.set_mstatus_mie(false);
        self.latched = 0;
        self.last_lines = 0;
    }
}
