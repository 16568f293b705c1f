use super::{Cpu, CpuMode, Registers};

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    pub fn new() -> Self {
        let mut cpu = Self {
            regs: Registers::default(),
            ime: false,
            mode: CpuMode::Running,
            ime_enable_pending: false,
            cycles: 0,
            extra_cycles: 0,
            trace: false,
        };
        cpu.apply_dmg_boot_state(0x01);
        cpu
    }

    /// Reset the CPU to its power-on state.
    ///
    /// The trace setting survives a reset; everything else, including the
    /// cycle counter, starts over.
    pub fn reset(&mut self) {
        self.regs = Registers::default();
        self.ime = false;
        self.mode = CpuMode::Running;
        self.ime_enable_pending = false;
        self.cycles = 0;
        self.extra_cycles = 0;
        self.apply_dmg_boot_state(0x01);
    }

    /// Reset and load the register values the DMG boot ROM leaves behind
    /// for the given cartridge.
    ///
    /// `header_checksum` is the byte at 0x014D. The boot ROM leaves H and C
    /// set unless that checksum is zero.
    pub fn power_up(&mut self, header_checksum: u8) {
        self.reset();
        self.apply_dmg_boot_state(header_checksum);
    }

    /// Initialize registers to match the DMG boot ROM's state after it
    /// hands control to cartridge code at the entry point.
    ///
    /// Values follow Pan Docs "Power Up Sequence".
    fn apply_dmg_boot_state(&mut self, header_checksum: u8) {
        self.regs.a = 0x01;
        self.regs.f = if header_checksum == 0 { 0x80 } else { 0xB0 };
        self.regs.set_bc(0x0013);
        self.regs.set_de(0x00D8);
        self.regs.set_hl(0x014D);
        self.regs.sp = 0xFFFE;
        self.regs.pc = crate::machine::ENTRY_POINT;

        // IME is clear when control reaches the cartridge; the program
        // enables interrupts itself with EI/RETI.
        self.ime = false;
    }
}
