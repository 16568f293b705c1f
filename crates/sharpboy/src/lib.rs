use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use sharpboy_gb::machine::load_cartridge;
use sharpboy_gb::{disasm, Disassembly, Exit, GameBoy, SessionConfig, SystemBus};

/// Inclusive address range given as `START:END` in hex.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct AddressRange {
    pub start: u16,
    pub end: usize,
}

impl FromStr for AddressRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once(':')
            .ok_or_else(|| format!("expected START:END, got '{s}'"))?;
        let start = parse_hex(start)?;
        let end = parse_hex(end)?;
        let start = u16::try_from(start).map_err(|_| format!("start 0x{start:X} exceeds 0xFFFF"))?;
        if (start as usize) > end {
            return Err(format!("start 0x{start:04X} is after end 0x{end:04X}"));
        }
        Ok(Self { start, end })
    }
}

fn parse_hex(s: &str) -> Result<usize, String> {
    let digits = s
        .trim()
        .trim_start_matches('$')
        .trim_start_matches("0x")
        .trim_start_matches("0X");
    usize::from_str_radix(digits, 16).map_err(|err| format!("invalid address '{s}': {err}"))
}

/// Power up the configured cartridge and run it to completion.
///
/// Bytes the program sent over the serial port are returned alongside the
/// exit reason.
pub fn run(config: SessionConfig) -> Result<(Exit, Vec<u8>)> {
    let path = config.cartridge.clone();
    let mut gb = GameBoy::new(config)
        .with_context(|| format!("failed to create session for {}", path.display()))?;

    let exit = gb
        .start()
        .with_context(|| format!("execution of {} failed", path.display()))?;

    Ok((exit, gb.serial_output().to_vec()))
}

/// Static listing of `range` in the cartridge mapped at address 0.
pub fn disassemble(cartridge: &Path, range: AddressRange) -> Result<Disassembly> {
    let rom = load_cartridge(cartridge)
        .with_context(|| format!("failed to load {}", cartridge.display()))?;
    let mut bus = SystemBus::new();
    bus.load_cartridge(&rom);

    disasm::disassemble(bus.memory(), range.start, range.end)
        .with_context(|| format!("cannot disassemble 0x{:04X}:0x{:X}", range.start, range.end))
}
