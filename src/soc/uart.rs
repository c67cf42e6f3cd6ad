//! Byte-output UART.
//!
//! A write-only serial sink for program output. Stores to the TX register
//! emit one byte into the captured output stream; the status register
//! always reports the transmitter ready.
//!
//! # Memory Map (device-relative offsets)
//!
//! * `0x0`: TX data (a store of any width emits the low byte)
//! * `0x4`: status (read-only, bit 0 = TX ready)

use log::trace;

use crate::soc::traits::{Aperture, Device};

/// Offset of the TX data register.
const TX_DATA_OFFSET: u32 = 0x0;
/// Offset of the status register.
const STATUS_OFFSET: u32 = 0x4;

/// Status register bit: transmitter ready (always set).
pub const STATUS_TX_READY: u32 = 0x1;

/// Size of the UART aperture in bytes.
const APERTURE_SIZE: u32 = 8;

/// UART device state.
#[derive(Clone, Debug)]
pub struct Uart {
    /// Base physical address of the device.
    base: u32,
    /// Bytes transmitted, in emission order.
    tx: Vec<u8>,
}

impl Uart {
    /// Creates a UART at `base` with an empty output stream.
    pub fn new(base: u32) -> Self {
        Self { base, tx: Vec::new() }
    }

    /// Returns the captured output stream.
    pub fn output(&self) -> &[u8] {
        &self.tx
    }

    /// Takes the captured output stream, leaving it empty.
    pub fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.tx)
    }

    /// Number of bytes transmitted since construction or the last reset.
    pub fn bytes_transmitted(&self) -> usize {
        self.tx.len()
    }

    /// Clears the captured output.
    pub fn reset(&mut self) {
        self.tx.clear();
    }

    fn transmit(&mut self, byte: u8) {
        trace!("UART tx {:#04x} ({:?})", byte, byte as char);
        self.tx.push(byte);
    }
}

impl Device for Uart {
    fn name(&self) -> &str {
        "UART0"
    }

    fn aperture(&self) -> Aperture {
        Aperture::new(self.base, APERTURE_SIZE)
    }

    fn read_u8(&mut self, offset: u32) -> u8 {
        self.read_u32(offset & !3) as u8
    }

    fn read_u16(&mut self, offset: u32) -> u16 {
        self.read_u32(offset & !3) as u16
    }

    fn read_u32(&mut self, offset: u32) -> u32 {
        match offset {
            STATUS_OFFSET => STATUS_TX_READY,
            _ => 0,
        }
    }

    fn write_u8(&mut self, offset: u32, val: u8) {
        if offset == TX_DATA_OFFSET {
            self.transmit(val);
        }
    }

    fn write_u16(&mut self, offset: u32, val: u16) {
        if offset == TX_DATA_OFFSET {
            self.transmit(val as u8);
        }
    }

    fn write_u32(&mut self, offset: u32, val: u32) {
        if offset == TX_DATA_OFFSET {
            self.transmit(val as u8);
        }
    }

    fn as_uart(&self) -> Option<&Uart> {
        Some(self)
    }

    fn as_uart_mut(&mut self) -> Option<&mut Uart> {
        Some(self)
    }
}
