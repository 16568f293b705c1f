use super::alu::{res_bit, set_bit};
use super::table::ShiftOp;
use super::{Bus, Cpu, Operand8};

impl Cpu {
    /// Rotates and shifts of the CB-prefixed 0x00–0x3F block.
    pub(super) fn exec_cb_shift<B: Bus>(&mut self, bus: &mut B, op: ShiftOp, target: Operand8) {
        let value = target.get(self, bus);
        let result = self.alu_shift(op, value);
        target.set(self, bus, result);
    }

    /// BIT b, r: flags only, the operand is never written back.
    pub(super) fn exec_cb_bit<B: Bus>(&mut self, bus: &mut B, bit: u8, target: Operand8) {
        let value = target.get(self, bus);
        self.alu_bit(bit, value);
    }

    /// RES b, r
    pub(super) fn exec_cb_res<B: Bus>(&mut self, bus: &mut B, bit: u8, target: Operand8) {
        let value = target.get(self, bus);
        target.set(self, bus, res_bit(bit, value));
    }

    /// SET b, r
    pub(super) fn exec_cb_set<B: Bus>(&mut self, bus: &mut B, bit: u8, target: Operand8) {
        let value = target.get(self, bus);
        target.set(self, bus, set_bit(bit, value));
    }
}
