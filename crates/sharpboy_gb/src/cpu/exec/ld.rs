use crate::cpu::table::Indirect;
use crate::cpu::{Bus, Cpu, Operand8, Reg16};

impl Cpu {
    /// LD r1, r2 (0x40–0x7F except HALT).
    pub(super) fn exec_ld<B: Bus>(&mut self, bus: &mut B, dst: Operand8, src: Operand8) {
        let value = src.get(self, bus);
        dst.set(self, bus, value);
    }

    /// LD r, d8 and LD (HL), d8.
    pub(super) fn exec_ld_imm<B: Bus>(&mut self, bus: &mut B, dst: Operand8) {
        let value = self.imm8(bus);
        dst.set(self, bus, value);
    }

    pub(super) fn exec_ld_imm16<B: Bus>(&mut self, bus: &mut B, reg: Reg16) {
        let value = self.imm16(bus);
        self.regs.set_reg16(reg, value);
    }

    /// Resolve `(BC)`, `(DE)`, `(HL+)` or `(HL-)`, applying the HL post
    /// increment/decrement.
    fn indirect_addr(&mut self, ind: Indirect) -> u16 {
        match ind {
            Indirect::BC => self.regs.bc(),
            Indirect::DE => self.regs.de(),
            Indirect::HLI => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_add(1));
                hl
            }
            Indirect::HLD => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_sub(1));
                hl
            }
        }
    }

    pub(super) fn exec_store_a<B: Bus>(&mut self, bus: &mut B, ind: Indirect) {
        let addr = self.indirect_addr(ind);
        bus.write8(addr, self.regs.a);
    }

    pub(super) fn exec_load_a<B: Bus>(&mut self, bus: &mut B, ind: Indirect) {
        let addr = self.indirect_addr(ind);
        self.regs.a = bus.read8(addr);
    }

    /// LD (a16), SP
    pub(super) fn exec_store_sp<B: Bus>(&mut self, bus: &mut B) {
        let addr = self.imm16(bus);
        bus.write16(addr, self.regs.sp);
    }

    /// LDH (a8), A
    pub(super) fn exec_store_high<B: Bus>(&mut self, bus: &mut B) {
        let addr = 0xFF00 | self.imm8(bus) as u16;
        bus.write8(addr, self.regs.a);
    }

    /// LDH A, (a8)
    pub(super) fn exec_load_high<B: Bus>(&mut self, bus: &mut B) {
        let addr = 0xFF00 | self.imm8(bus) as u16;
        self.regs.a = bus.read8(addr);
    }

    /// LDH (C), A
    pub(super) fn exec_store_high_c<B: Bus>(&mut self, bus: &mut B) {
        let addr = 0xFF00 | self.regs.c as u16;
        bus.write8(addr, self.regs.a);
    }

    /// LDH A, (C)
    pub(super) fn exec_load_high_c<B: Bus>(&mut self, bus: &mut B) {
        let addr = 0xFF00 | self.regs.c as u16;
        self.regs.a = bus.read8(addr);
    }

    /// LD (a16), A
    pub(super) fn exec_store_abs<B: Bus>(&mut self, bus: &mut B) {
        let addr = self.imm16(bus);
        bus.write8(addr, self.regs.a);
    }

    /// LD A, (a16)
    pub(super) fn exec_load_abs<B: Bus>(&mut self, bus: &mut B) {
        let addr = self.imm16(bus);
        self.regs.a = bus.read8(addr);
    }

    /// LD HL, SP+e8
    pub(super) fn exec_ld_hl_sp_offset<B: Bus>(&mut self, bus: &mut B) {
        let imm = self.imm8(bus);
        let result = self.alu_add16_signed(self.regs.sp, imm);
        self.regs.set_hl(result);
    }

    pub(super) fn exec_ld_sp_hl(&mut self) {
        self.regs.sp = self.regs.hl();
    }
}
