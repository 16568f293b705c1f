use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::cpu::{Cpu, CpuMode};
use crate::disasm::{self, Disassembly};
use crate::error::{Error, Result};

use super::serial::Serial;
use super::{cartridge, io, Region, SessionConfig, SystemBus, MEMORY_SIZE};

/// Why `GameBoy::run` returned.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Exit {
    /// The CPU executed HALT.
    Halted,
    /// The CPU executed STOP.
    Stopped,
    /// A `RunHandle` stopped the session.
    Cancelled,
    /// The configured step budget was used up.
    StepLimit,
}

impl fmt::Display for Exit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Exit::Halted => "CPU halted",
            Exit::Stopped => "CPU stopped",
            Exit::Cancelled => "cancelled",
            Exit::StepLimit => "step limit reached",
        };
        f.write_str(reason)
    }
}

/// Running flag shared between a session and its handles.
///
/// `cancel` is set only by `RunHandle::stop`; a session ending on its own
/// clears `running` alone.
#[derive(Debug)]
struct RunFlag {
    running: AtomicBool,
    cancel: AtomicBool,
}

/// Cloneable handle to a session's running flag.
///
/// Stopping from any thread makes `run` return `Exit::Cancelled` at the
/// next instruction boundary.
#[derive(Clone, Debug)]
pub struct RunHandle(Arc<RunFlag>);

impl RunHandle {
    pub fn stop(&self) {
        self.0.cancel.store(true, Ordering::Release);
        self.0.running.store(false, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.0.running.load(Ordering::Acquire)
    }
}

/// One emulated console: CPU, bus and the session's trace buffer.
pub struct GameBoy {
    pub cpu: Cpu,
    bus: SystemBus,
    serial: Serial,
    flag: Arc<RunFlag>,
    debug: bool,
    max_steps: Option<u64>,
    steps: u64,
    trace: Disassembly,
}

impl GameBoy {
    /// Load the configured cartridge and prepare a session.
    pub fn new(config: SessionConfig) -> Result<Self> {
        let rom = cartridge::load(&config.cartridge)?;
        log::info!(
            "loaded cartridge '{}' from {} ({} bytes, type 0x{:02X})",
            cartridge::title(&rom),
            config.cartridge.display(),
            rom.len(),
            cartridge::cart_type(&rom),
        );

        let mut gb = Self::from_rom(&rom, config.debug);
        gb.max_steps = config.max_steps;
        Ok(gb)
    }

    /// Build a session from an in-memory cartridge image.
    pub fn from_rom(rom: &[u8], debug: bool) -> Self {
        let mut bus = SystemBus::new();
        bus.load_cartridge(rom);

        let mut cpu = Cpu::new();
        cpu.set_trace(debug);

        let mut gb = Self {
            cpu,
            bus,
            serial: Serial::default(),
            flag: Arc::new(RunFlag {
                running: AtomicBool::new(true),
                cancel: AtomicBool::new(false),
            }),
            debug,
            max_steps: None,
            steps: 0,
            trace: Disassembly::default(),
        };
        gb.refresh_full_disassembly();
        gb
    }

    fn refresh_full_disassembly(&mut self) {
        match disasm::disassemble(self.bus.memory(), 0, MEMORY_SIZE - 1) {
            Ok(listing) => self.trace = listing,
            Err(err) => log::warn!("initial disassembly failed: {err}"),
        }
    }

    /// Put the machine in the state the boot ROM leaves it in and arm the
    /// running flag. A pending cancellation is discarded.
    pub fn power_up(&mut self) {
        self.cpu.power_up(self.bus.header_checksum());
        io::apply_dmg_defaults(&mut self.bus);
        self.serial.sync(&self.bus);
        self.steps = 0;
        self.flag.cancel.store(false, Ordering::Release);
        self.flag.running.store(true, Ordering::Release);

        let regs = &self.cpu.regs;
        log::info!(
            "power-up: pc=0x{:04X} sp=0x{:04X} af=0x{:04X} bc=0x{:04X} de=0x{:04X} hl=0x{:04X}",
            regs.pc,
            regs.sp,
            regs.af(),
            regs.bc(),
            regs.de(),
            regs.hl(),
        );
    }

    /// Power up and run until an exit condition.
    pub fn start(&mut self) -> Result<Exit> {
        self.power_up();
        self.run()
    }

    /// Step until the CPU halts or stops, the step budget runs out, or a
    /// `RunHandle` stops the session.
    ///
    /// The running flag is set while the loop runs and cleared on every
    /// exit. Calling `run` again continues where the previous call left
    /// off, with a fresh step budget; a halted or stopped CPU returns its
    /// mode again straight away. A stop requested through a handle is
    /// consumed by the `Exit::Cancelled` it produces.
    ///
    /// An unimplemented opcode clears the running flag and is returned as
    /// the error; the CPU state is left as it was before the fetch.
    pub fn run(&mut self) -> Result<Exit> {
        self.flag.running.store(true, Ordering::Release);
        let budget_start = self.steps;

        loop {
            if self.flag.cancel.swap(false, Ordering::AcqRel) {
                return Ok(self.finish(Exit::Cancelled));
            }

            if let Some(limit) = self.max_steps {
                if self.steps - budget_start >= limit {
                    return Ok(self.finish(Exit::StepLimit));
                }
            }

            if let Err(err) = self.step() {
                self.flag.running.store(false, Ordering::Release);
                self.report_fatal(&err);
                return Err(err);
            }

            match self.cpu.mode() {
                CpuMode::Running => {}
                CpuMode::Halted => return Ok(self.finish(Exit::Halted)),
                CpuMode::Stopped => return Ok(self.finish(Exit::Stopped)),
            }
        }
    }

    /// Execute one instruction and return its machine cycles.
    pub fn step(&mut self) -> Result<u32> {
        let cycles = self.cpu.step(&mut self.bus)?;
        if cycles > 0 {
            self.steps += 1;
        }
        self.serial.observe(&mut self.bus, self.debug);
        Ok(cycles)
    }

    fn finish(&mut self, exit: Exit) -> Exit {
        self.flag.running.store(false, Ordering::Release);
        log::info!(
            "execution ended: {exit} after {} steps ({} machine cycles) at pc=0x{:04X}",
            self.steps,
            self.cpu.cycles(),
            self.cpu.regs.pc,
        );
        exit
    }

    fn report_fatal(&self, err: &Error) {
        let regs = &self.cpu.regs;
        log::error!(
            "{err} in {region} (SP=0x{sp:04X} AF=0x{af:04X} BC=0x{bc:04X} DE=0x{de:04X} HL=0x{hl:04X} IME={ime})",
            region = Region::of(regs.pc).name(),
            sp = regs.sp,
            af = regs.af(),
            bc = regs.bc(),
            de = regs.de(),
            hl = regs.hl(),
            ime = self.cpu.ime,
        );
    }

    /// Regenerate the trace buffer for `start..=end`. On error the previous
    /// buffer is kept untouched.
    pub fn disassemble(&mut self, start: u16, end: usize) -> Result<()> {
        self.trace = disasm::disassemble(self.bus.memory(), start, end)?;
        Ok(())
    }

    /// The most recently generated trace buffer.
    pub fn disassembly(&self) -> &Disassembly {
        &self.trace
    }

    pub fn run_handle(&self) -> RunHandle {
        RunHandle(Arc::clone(&self.flag))
    }

    pub fn is_running(&self) -> bool {
        self.flag.running.load(Ordering::Acquire)
    }

    /// Bytes sent over the serial port so far.
    pub fn serial_output(&self) -> &[u8] {
        self.serial.output()
    }

    /// Instructions retired since the last power-up.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn bus(&self) -> &SystemBus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut SystemBus {
        &mut self.bus
    }
}
