use crate::disasm;
use crate::error::{Error, Result};

use super::table::instruction_set;
use super::{Bus, Cpu, CpuMode, TRACE_TARGET};

impl Cpu {
    /// Execute a single instruction and return the machine cycles it took.
    ///
    /// A halted or stopped CPU does not retire anything and reports 0
    /// cycles. Opcodes without a descriptor are fatal: the CPU state is
    /// left exactly as it was before the fetch and the error carries the
    /// opcode and its address.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32> {
        if self.mode != CpuMode::Running {
            return Ok(0);
        }

        let pc = self.regs.pc;
        let opcode = bus.read8(pc);
        let instruction = instruction_set()
            .decode(opcode, || bus.read8(pc.wrapping_add(1)))
            .ok_or(Error::UnimplementedOpcode { opcode, addr: pc })?;

        if self.trace {
            log::debug!(
                target: TRACE_TARGET,
                "{}",
                disasm::decode_at(|addr| bus.peek8(addr), pc)
            );
        }

        // EI only takes effect once the instruction after it has finished.
        let apply_ei = self.ime_enable_pending;
        self.extra_cycles = 0;

        self.execute(bus, instruction);

        self.regs.pc = self.regs.pc.wrapping_add(instruction.length as u16);
        let cycles = instruction.cycles as u32 + std::mem::take(&mut self.extra_cycles);
        self.cycles += cycles as u64;

        if apply_ei && self.ime_enable_pending {
            self.ime = true;
            self.ime_enable_pending = false;
        }

        Ok(cycles)
    }
}
