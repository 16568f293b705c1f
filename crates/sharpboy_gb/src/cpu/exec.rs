mod alu;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;

use super::table::Op;
use super::{Bus, Cpu, Instruction};

impl Cpu {
    /// Run the behaviour of an already decoded instruction.
    ///
    /// PC still points at the first byte of the instruction; immediates are
    /// read relative to it. `step` takes care of advancing PC and of the
    /// cycle bookkeeping afterwards.
    pub(super) fn execute<B: Bus>(&mut self, bus: &mut B, instruction: &Instruction) {
        match instruction.op {
            Op::Nop => {}
            Op::Stop => self.exec_stop(),
            Op::Halt => self.exec_halt(),
            Op::Di => self.exec_di(),
            Op::Ei => self.exec_ei(),

            Op::Ld { dst, src } => self.exec_ld(bus, dst, src),
            Op::LdImm(dst) => self.exec_ld_imm(bus, dst),
            Op::LdImm16(reg) => self.exec_ld_imm16(bus, reg),
            Op::StoreA(ind) => self.exec_store_a(bus, ind),
            Op::LoadA(ind) => self.exec_load_a(bus, ind),
            Op::StoreSp => self.exec_store_sp(bus),
            Op::StoreHigh => self.exec_store_high(bus),
            Op::LoadHigh => self.exec_load_high(bus),
            Op::StoreHighC => self.exec_store_high_c(bus),
            Op::LoadHighC => self.exec_load_high_c(bus),
            Op::StoreAbs => self.exec_store_abs(bus),
            Op::LoadAbs => self.exec_load_abs(bus),
            Op::LdHlSpOffset => self.exec_ld_hl_sp_offset(bus),
            Op::LdSpHl => self.exec_ld_sp_hl(),

            Op::Inc(target) => self.exec_inc8(bus, target),
            Op::Dec(target) => self.exec_dec8(bus, target),
            Op::Inc16(reg) => self.exec_inc16(reg),
            Op::Dec16(reg) => self.exec_dec16(reg),
            Op::AddHl(reg) => self.exec_add_hl(reg),
            Op::AddSpOffset => self.exec_add_sp_offset(bus),
            Op::Alu(op, src) => self.exec_alu(bus, op, src),
            Op::AluImm(op) => self.exec_alu_imm(bus, op),
            Op::RotateA(shift) => self.alu_rotate_a(shift),
            Op::Daa => self.alu_daa(),
            Op::Cpl => self.exec_cpl(),
            Op::Scf => self.exec_scf(),
            Op::Ccf => self.exec_ccf(),

            Op::Jr(cond) => self.exec_jr(bus, instruction, cond),
            Op::Jp(cond) => self.exec_jp(bus, instruction, cond),
            Op::JpHl => self.exec_jp_hl(instruction),
            Op::Call(cond) => self.exec_call(bus, instruction, cond),
            Op::Ret(cond) => self.exec_ret(bus, instruction, cond),
            Op::Reti => self.exec_reti(bus, instruction),
            Op::Rst(vector) => self.exec_rst(bus, instruction, vector),
            Op::Push(pair) => self.exec_push(bus, pair),
            Op::Pop(pair) => self.exec_pop(bus, pair),

            // `InstructionSet::decode` always resolves the prefix.
            Op::Prefix => unreachable!("0xCB prefix reached execute"),
            Op::Shift(op, target) => self.exec_cb_shift(bus, op, target),
            Op::Bit(bit, target) => self.exec_cb_bit(bus, bit, target),
            Op::Res(bit, target) => self.exec_cb_res(bus, bit, target),
            Op::Set(bit, target) => self.exec_cb_set(bus, bit, target),
        }
    }
}
