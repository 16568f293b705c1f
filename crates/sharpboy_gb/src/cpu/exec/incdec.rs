use crate::cpu::{Bus, Cpu, Operand8, Reg16};

impl Cpu {
    /// INC r / INC (HL). Updates Z, N, H; C is preserved.
    pub(super) fn exec_inc8<B: Bus>(&mut self, bus: &mut B, target: Operand8) {
        let value = target.get(self, bus);
        let result = self.alu_inc8(value);
        target.set(self, bus, result);
    }

    /// DEC r / DEC (HL). Updates Z, N, H; C is preserved.
    pub(super) fn exec_dec8<B: Bus>(&mut self, bus: &mut B, target: Operand8) {
        let value = target.get(self, bus);
        let result = self.alu_dec8(value);
        target.set(self, bus, result);
    }

    /// INC rr: no flags.
    pub(super) fn exec_inc16(&mut self, reg: Reg16) {
        let value = self.regs.reg16(reg).wrapping_add(1);
        self.regs.set_reg16(reg, value);
    }

    /// DEC rr: no flags.
    pub(super) fn exec_dec16(&mut self, reg: Reg16) {
        let value = self.regs.reg16(reg).wrapping_sub(1);
        self.regs.set_reg16(reg, value);
    }
}
