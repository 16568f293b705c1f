pub mod cpu;
pub mod disasm;
pub mod error;
pub mod machine;

pub use cpu::{Bus, Cpu, CpuMode, TRACE_TARGET};
pub use disasm::{Disassembly, TraceLine};
pub use error::{Error, Result};
pub use machine::{Exit, GameBoy, RunHandle, SessionConfig, SystemBus};
