//! Sparse byte-addressable memory.
//!
//! This module implements the flat byte store backing the system bus.
//! Every 32-bit address is legal; bytes that were never written read as
//! zero. Multi-byte accesses compose byte operations little-endian, so
//! misaligned access works without special handling.

use std::collections::HashMap;

/// Sparse byte store over the full 32-bit address space.
#[derive(Clone, Debug, Default)]
pub struct SparseRam {
    bytes: HashMap<u32, u8>,
}

impl SparseRam {
    /// Creates an empty store; all bytes read as zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads one byte.
    pub fn read_u8(&self, addr: u32) -> u8 {
        self.bytes.get(&addr).copied().unwrap_or(0)
    }

    /// Writes one byte. Writing zero still marks the byte as present.
    pub fn write_u8(&mut self, addr: u32, val: u8) {
        self.bytes.insert(addr, val);
    }

    /// Reads `buf.len()` consecutive bytes starting at `addr`.
    pub fn read_bytes(&self, addr: u32, buf: &mut [u8]) {
        for (i, b) in buf.iter_mut().enumerate() {
            *b = self.read_u8(addr.wrapping_add(i as u32));
        }
    }

    /// Writes a contiguous byte slice starting at `addr`.
    pub fn write_bytes(&mut self, addr: u32, data: &[u8]) {
        for (i, b) in data.iter().enumerate() {
            self.write_u8(addr.wrapping_add(i as u32), *b);
        }
    }

    /// Number of bytes ever written.
    pub fn bytes_used(&self) -> usize {
        self.bytes.len()
    }

    /// Dumps `length` bytes starting at `start` to stderr, 16 per line,
    /// with an ASCII gutter.
    pub fn dump(&self, start: u32, length: u32) {
        eprintln!(
            "=== Memory {:#010x} - {:#010x} ===",
            start,
            start.wrapping_add(length.saturating_sub(1))
        );
        let mut addr = start;
        let mut remaining = length;
        while remaining > 0 {
            let line = remaining.min(16);
            let mut hex = String::new();
            let mut ascii = String::new();
            for i in 0..line {
                let b = self.read_u8(addr.wrapping_add(i));
                hex.push_str(&format!("{:02x} ", b));
                ascii.push(if (32..127).contains(&b) {
                    b as char
                } else {
                    '.'
                });
            }
            eprintln!("{:#010x}: {:<48} |{}", addr, hex, ascii);
            addr = addr.wrapping_add(line);
            remaining -= line;
        }
    }
}
