use crate::cpu::table::AluOp;
use crate::cpu::{Bus, Cpu, Flag, Operand8, Reg16};

impl Cpu {
    /// ADD/ADC/SUB/SBC/AND/XOR/OR/CP A, r (0x80–0xBF).
    pub(super) fn exec_alu<B: Bus>(&mut self, bus: &mut B, op: AluOp, src: Operand8) {
        let value = src.get(self, bus);
        self.alu(op, value);
    }

    /// ADD/ADC/SUB/SBC/AND/XOR/OR/CP A, d8.
    pub(super) fn exec_alu_imm<B: Bus>(&mut self, bus: &mut B, op: AluOp) {
        let value = self.imm8(bus);
        self.alu(op, value);
    }

    pub(super) fn exec_add_hl(&mut self, reg: Reg16) {
        let value = self.regs.reg16(reg);
        self.alu_add16_hl(value);
    }

    /// ADD SP, e8
    pub(super) fn exec_add_sp_offset<B: Bus>(&mut self, bus: &mut B) {
        let imm = self.imm8(bus);
        self.regs.sp = self.alu_add16_signed(self.regs.sp, imm);
    }

    pub(super) fn exec_cpl(&mut self) {
        self.regs.a = !self.regs.a;
        self.set_flag(Flag::H, true);
        self.set_flag(Flag::N, true);
    }

    pub(super) fn exec_scf(&mut self) {
        self.set_flag(Flag::C, true);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::N, false);
    }

    pub(super) fn exec_ccf(&mut self) {
        let carry = self.get_flag(Flag::C);
        self.set_flag(Flag::C, !carry);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::N, false);
    }
}
