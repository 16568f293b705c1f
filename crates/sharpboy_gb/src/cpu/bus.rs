/// Abstraction over the Game Boy bus (memory and IO).
///
/// The CPU only ever sees the 16-bit address space through this trait.
/// Peripherals are expected to be layered on by implementations that route
/// address ranges to devices; the CPU core does not care.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);

    /// Read a byte without any side effects on the bus.
    ///
    /// Used by the disassembler and the debug tracer, which must be able
    /// to look at memory at any point without disturbing emulated state.
    fn peek8(&self, addr: u16) -> u8;

    /// Little-endian 16-bit read: low byte at `addr`, high byte at
    /// `addr + 1` (wrapping at the top of the address space).
    fn read16(&mut self, addr: u16) -> u16 {
        let lo = self.read8(addr);
        let hi = self.read8(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    /// Little-endian 16-bit write, low byte first.
    fn write16(&mut self, addr: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.write8(addr, lo);
        self.write8(addr.wrapping_add(1), hi);
    }
}
