use crate::cpu::{Bus, Cpu, Pair};

impl Cpu {
    /// PUSH BC/DE/HL/AF
    pub(super) fn exec_push<B: Bus>(&mut self, bus: &mut B, pair: Pair) {
        let value = self.regs.pair(pair);
        self.push(bus, value);
    }

    /// POP BC/DE/HL/AF. Popping AF masks the low nibble of F.
    pub(super) fn exec_pop<B: Bus>(&mut self, bus: &mut B, pair: Pair) {
        let value = self.pop(bus);
        self.regs.set_pair(pair, value);
    }
}
