mod alu;
mod bus;
mod cb;
mod exec;
mod helpers;
mod init;
mod operand;
mod regs;
mod step;
pub mod table;

pub use bus::Bus;
pub use operand::Operand8;
pub use regs::{Flag, Pair, Reg16, Registers};
pub use table::{instruction_set, Instruction, InstructionSet, Op};

/// Log target of the per-instruction debug trace.
pub const TRACE_TARGET: &str = "sharpboy_gb::trace";

/// Externally observable execution mode of the CPU.
///
/// HALT and STOP park the CPU until an interrupt or joypad line would wake
/// it. Neither wake-up source exists in this core, so both modes are
/// terminal for a session: `Cpu::step` refuses to retire instructions
/// until the CPU is reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CpuMode {
    #[default]
    Running,
    Halted,
    Stopped,
}

/// Sharp SM83 CPU core.
///
/// Holds the register file, the interrupt master enable latch, the run
/// mode and the elapsed machine-cycle counter. Memory is never owned by the
/// CPU; every access goes through the `Bus` passed to `step`.
#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    pub ime: bool,
    mode: CpuMode,
    /// Set by EI; IME becomes 1 once the instruction after EI completes.
    ime_enable_pending: bool,
    /// Total machine cycles retired since power-on.
    cycles: u64,
    /// Cycles charged by the instruction in flight on top of its base
    /// cost: `(HL)` operand accesses and taken branches.
    extra_cycles: u32,
    /// Emit a disassembly line for every instruction before executing it.
    trace: bool,
}

impl Cpu {
    #[inline]
    pub fn get_flag(&self, flag: Flag) -> bool {
        self.regs.flag(flag)
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        self.regs.set_flag(flag, value);
    }

    #[inline]
    pub fn clear_flags(&mut self) {
        self.regs.f = 0;
    }

    #[inline]
    pub fn mode(&self) -> CpuMode {
        self.mode
    }

    pub fn is_halted(&self) -> bool {
        self.mode == CpuMode::Halted
    }

    pub fn is_stopped(&self) -> bool {
        self.mode == CpuMode::Stopped
    }

    /// Machine cycles elapsed since power-on.
    #[inline]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn set_trace(&mut self, enabled: bool) {
        self.trace = enabled;
    }

    pub fn trace_enabled(&self) -> bool {
        self.trace
    }

    /// Charge machine cycles to the instruction currently executing.
    #[inline]
    pub(crate) fn charge(&mut self, cycles: u32) {
        self.extra_cycles += cycles;
    }
}

#[cfg(test)]
mod tests;
