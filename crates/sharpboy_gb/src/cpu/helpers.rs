use super::{Bus, Cpu, Instruction};

impl Cpu {
    /// Immediate byte following the opcode at PC.
    #[inline]
    pub(super) fn imm8<B: Bus>(&mut self, bus: &mut B) -> u8 {
        bus.read8(self.regs.pc.wrapping_add(1))
    }

    /// Little-endian immediate word following the opcode at PC.
    #[inline]
    pub(super) fn imm16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        bus.read16(self.regs.pc.wrapping_add(1))
    }

    /// Address of the instruction after the one at PC.
    #[inline]
    pub(super) fn next_pc(&self, instruction: &Instruction) -> u16 {
        self.regs.pc.wrapping_add(instruction.length as u16)
    }

    /// Redirect control flow to `target`.
    ///
    /// `step` always advances PC by the instruction length after the
    /// behaviour runs, so PC is parked at `target - length` here.
    #[inline]
    pub(super) fn jump_to(&mut self, instruction: &Instruction, target: u16) {
        self.regs.pc = target.wrapping_sub(instruction.length as u16);
    }

    /// Push a word: high byte at SP-1, low byte at SP-2, SP -= 2.
    pub fn push<B: Bus>(&mut self, bus: &mut B, value: u16) {
        let [hi, lo] = value.to_be_bytes();
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, hi);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, lo);
    }

    /// Pop a word pushed by `push`, SP += 2.
    pub fn pop<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let value = bus.read16(self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(2);
        value
    }
}
