use crate::cpu::table::Cond;
use crate::cpu::{Bus, Cpu, Instruction};

/// Extra machine cycles charged when a conditional branch is taken.
const JR_TAKEN: u32 = 1;
const JP_TAKEN: u32 = 1;
const CALL_TAKEN: u32 = 3;
const RET_TAKEN: u32 = 3;

impl Cpu {
    /// Evaluate an optional branch condition. Unconditional forms carry
    /// their full cost in the descriptor, so nothing extra is charged.
    #[inline]
    fn branch_taken(&mut self, cond: Option<Cond>, extra: u32) -> bool {
        match cond {
            None => true,
            Some(cond) if cond.holds(&self.regs) => {
                self.charge(extra);
                true
            }
            Some(_) => false,
        }
    }

    /// JR e8 / JR cc, e8. The displacement is relative to the address
    /// following the operand.
    pub(super) fn exec_jr<B: Bus>(
        &mut self,
        bus: &mut B,
        instruction: &Instruction,
        cond: Option<Cond>,
    ) {
        let offset = self.imm8(bus) as i8;
        if self.branch_taken(cond, JR_TAKEN) {
            let target = self.next_pc(instruction).wrapping_add(offset as u16);
            self.jump_to(instruction, target);
        }
    }

    /// JP a16 / JP cc, a16
    pub(super) fn exec_jp<B: Bus>(
        &mut self,
        bus: &mut B,
        instruction: &Instruction,
        cond: Option<Cond>,
    ) {
        let target = self.imm16(bus);
        if self.branch_taken(cond, JP_TAKEN) {
            self.jump_to(instruction, target);
        }
    }

    /// JP HL
    pub(super) fn exec_jp_hl(&mut self, instruction: &Instruction) {
        let target = self.regs.hl();
        self.jump_to(instruction, target);
    }

    /// CALL a16 / CALL cc, a16: push the address of the next instruction.
    pub(super) fn exec_call<B: Bus>(
        &mut self,
        bus: &mut B,
        instruction: &Instruction,
        cond: Option<Cond>,
    ) {
        let target = self.imm16(bus);
        if self.branch_taken(cond, CALL_TAKEN) {
            let ret = self.next_pc(instruction);
            self.push(bus, ret);
            self.jump_to(instruction, target);
        }
    }

    /// RET / RET cc
    pub(super) fn exec_ret<B: Bus>(
        &mut self,
        bus: &mut B,
        instruction: &Instruction,
        cond: Option<Cond>,
    ) {
        if self.branch_taken(cond, RET_TAKEN) {
            let target = self.pop(bus);
            self.jump_to(instruction, target);
        }
    }

    /// RETI: return and enable interrupts immediately (no EI delay).
    pub(super) fn exec_reti<B: Bus>(&mut self, bus: &mut B, instruction: &Instruction) {
        let target = self.pop(bus);
        self.jump_to(instruction, target);
        self.ime = true;
    }

    /// RST n: call to one of the fixed vectors 0x00, 0x08, ..., 0x38.
    pub(super) fn exec_rst<B: Bus>(&mut self, bus: &mut B, instruction: &Instruction, vector: u8) {
        let ret = self.next_pc(instruction);
        self.push(bus, ret);
        self.jump_to(instruction, vector as u16);
    }
}
