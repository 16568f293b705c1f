use crate::cpu::{Cpu, CpuMode};

impl Cpu {
    /// HALT: park the CPU until an interrupt would wake it.
    pub(super) fn exec_halt(&mut self) {
        self.mode = CpuMode::Halted;
    }

    /// STOP: enter the low-power state. STOP is a 2-byte instruction whose
    /// second byte is ignored; the descriptor length skips it.
    pub(super) fn exec_stop(&mut self) {
        self.mode = CpuMode::Stopped;
    }

    pub(super) fn exec_di(&mut self) {
        self.ime = false;
        self.ime_enable_pending = false;
    }

    pub(super) fn exec_ei(&mut self) {
        // IME becomes 1 after the *next* instruction completes.
        self.ime_enable_pending = true;
    }
}
