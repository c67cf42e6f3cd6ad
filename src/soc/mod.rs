//! System-on-chip: bus, memory, and devices.
//!
//! This module assembles the memory system seen by the pipeline:
//! 1. **Routing:** Loads and stores are dispatched by address: peripheral
//!    apertures are served by their devices, everything else by the sparse
//!    byte store. Peripheral accesses never land in the byte store.
//! 2. **Extension:** Narrow loads sign- or zero-extend to 32 bits.
//! 3. **Devices:** Registered devices are ticked once per cycle and their
//!    level IRQ lines collected for the interrupt controller.

/// Core Local Interruptor (timer and software interrupts).
pub mod clint;
/// Sparse byte-addressable memory.
pub mod memory;
/// Device trait and aperture type.
pub mod traits;
/// Byte-output UART.
pub mod uart;

use log::trace;

use crate::isa::MemWidth;
use crate::soc::memory::SparseRam;

pub use crate::soc::clint::Clint;
pub use crate::soc::traits::{Aperture, Device};
pub use crate::soc::uart::Uart;

/// The system bus: sparse RAM plus memory-mapped devices.
///
/// The pipeline's memory stage and the binary fetch path go through
/// [`SystemBus::load`] and [`SystemBus::store`]; device apertures are
/// checked before the byte store so peripheral traffic never touches RAM.
pub struct SystemBus {
    /// Backing byte store for all non-peripheral addresses.
    pub ram: SparseRam,
    devices: Vec<Box<dyn Device>>,
}

impl Default for SystemBus {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemBus {
    /// Creates a bus with empty RAM and no devices.
    pub fn new() -> Self {
        Self {
            ram: SparseRam::new(),
            devices: Vec::new(),
        }
    }

    /// Registers a device. Later registrations win on aperture overlap.
    pub fn add_device(&mut self, device: Box<dyn Device>) {
        self.devices.push(device);
    }

    fn device_index(&self, addr: u32) -> Option<usize> {
        self.devices
            .iter()
            .rposition(|d| d.aperture().contains(addr))
    }

    /// Loads `width` bytes at `addr`, extending to 32 bits.
    ///
    /// # Arguments
    ///
    /// * `addr` - Byte address; device apertures are dispatched first.
    /// * `width` - Access width.
    /// * `signed` - Sign-extend narrow loads from the MSB of the loaded
    ///   width; zero-extend otherwise.
    pub fn load(&mut self, addr: u32, width: MemWidth, signed: bool) -> u32 {
        let raw = if let Some(idx) = self.device_index(addr) {
            let dev = &mut self.devices[idx];
            let offset = dev.aperture().offset(addr);
            match width {
                MemWidth::Byte => dev.read_u8(offset) as u32,
                MemWidth::Half => dev.read_u16(offset) as u32,
                MemWidth::Word => dev.read_u32(offset),
            }
        } else {
            let mut buf = [0u8; 4];
            self.ram
                .read_bytes(addr, &mut buf[..width.bytes() as usize]);
            u32::from_le_bytes(buf)
        };

        match (width, signed) {
            (MemWidth::Byte, true) => raw as u8 as i8 as i32 as u32,
            (MemWidth::Half, true) => raw as u16 as i16 as i32 as u32,
            _ => raw,
        }
    }

    /// Stores the low `width` bytes of `val` at `addr`.
    pub fn store(&mut self, addr: u32, width: MemWidth, val: u32) {
        if let Some(idx) = self.device_index(addr) {
            let dev = &mut self.devices[idx];
            let offset = dev.aperture().offset(addr);
            trace!("bus: store {:#010x} -> {} +{:#x}", addr, dev.name(), offset);
            match width {
                MemWidth::Byte => dev.write_u8(offset, val as u8),
                MemWidth::Half => dev.write_u16(offset, val as u16),
                MemWidth::Word => dev.write_u32(offset, val),
            }
        } else {
            let bytes = val.to_le_bytes();
            self.ram
                .write_bytes(addr, &bytes[..width.bytes() as usize]);
        }
    }

    /// Advances every registered device by one cycle.
    pub fn tick_devices(&mut self) {
        for dev in &mut self.devices {
            dev.tick();
        }
    }

    /// Collects the devices' level IRQ lines.
    ///
    /// Returns `(lines, mask)`: the `mip` bits currently asserted and the
    /// bits any device is responsible for driving.
    pub fn irq_lines(&self) -> (u32, u32) {
        let mut lines = 0;
        let mut mask = 0;
        for dev in &self.devices {
            lines |= dev.irq_lines();
            mask |= dev.irq_mask();
        }
        (lines, mask)
    }

    /// Returns the CLINT, if one is registered.
    pub fn clint_mut(&mut self) -> Option<&mut Clint> {
        self.devices.iter_mut().find_map(|d| d.as_clint_mut())
    }

    /// Returns the UART, if one is registered.
    pub fn uart(&self) -> Option<&Uart> {
        self.devices.iter().find_map(|d| d.as_uart())
    }

    /// Returns the UART mutably, if one is registered.
    pub fn uart_mut(&mut self) -> Option<&mut Uart> {
        self.devices.iter_mut().find_map(|d| d.as_uart_mut())
    }
}
