use crate::cpu::Bus;

use super::{HEADER_CHECKSUM, MEMORY_SIZE};

/// Flat 64 KiB system bus.
///
/// Every address is backed by one byte of storage; writes are visible to
/// the next read, including reads of code the CPU is about to execute.
pub struct SystemBus {
    memory: Box<[u8]>,
}

impl Default for SystemBus {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemBus {
    pub fn new() -> Self {
        Self {
            memory: vec![0; MEMORY_SIZE].into_boxed_slice(),
        }
    }

    /// Copy a cartridge image to address 0. Images larger than the address
    /// space are truncated.
    pub fn load_cartridge(&mut self, rom: &[u8]) {
        if rom.len() > MEMORY_SIZE {
            log::warn!(
                "cartridge is {} bytes, only the first {MEMORY_SIZE} are mapped",
                rom.len()
            );
        }
        let len = rom.len().min(MEMORY_SIZE);
        self.memory[..len].copy_from_slice(&rom[..len]);
    }

    /// Backing store, for read-only consumers such as the disassembler.
    pub fn memory(&self) -> &[u8] {
        &self.memory
    }

    pub fn header_checksum(&self) -> u8 {
        self.memory[HEADER_CHECKSUM as usize]
    }
}

impl Bus for SystemBus {
    #[inline]
    fn read8(&mut self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    #[inline]
    fn write8(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize] = value;
    }

    #[inline]
    fn peek8(&self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }
}
