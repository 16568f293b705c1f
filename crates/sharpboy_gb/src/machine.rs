mod bus;
mod cartridge;
mod config;
mod gameboy;
mod io;
mod serial;

pub use bus::SystemBus;
pub use cartridge::load as load_cartridge;
pub use config::SessionConfig;
pub use gameboy::{Exit, GameBoy, RunHandle};

/// Total addressable memory for the Game Boy (64 KiB).
///
/// The bus is a flat array; cartridge ROM is copied to address 0 and every
/// other region is plain read/write storage.
pub const MEMORY_SIZE: usize = 0x10000;

/// Address the boot ROM hands control to.
pub const ENTRY_POINT: u16 = 0x0100;

/// Cartridge header checksum byte.
pub const HEADER_CHECKSUM: u16 = 0x014D;

/// Serial transfer data.
pub const SB: u16 = 0xFF01;
/// Serial transfer control.
pub const SC: u16 = 0xFF02;

/// Memory map regions of the DMG address space.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Region {
    /// 0x0000–0x3FFF, fixed cartridge bank.
    Rom0,
    /// 0x4000–0x7FFF, switchable cartridge bank.
    RomX,
    /// 0x8000–0x97FF
    VramTiles,
    /// 0x9800–0x9BFF
    VramBgMap1,
    /// 0x9C00–0x9FFF
    VramBgMap2,
    /// 0xA000–0xBFFF
    ExternalRam,
    /// 0xC000–0xDFFF
    WorkRam,
    /// 0xE000–0xFDFF, mirror of work RAM on hardware.
    EchoRam,
    /// 0xFE00–0xFE9F, sprite attribute table.
    Oam,
    /// 0xFEA0–0xFEFF
    Unusable,
    /// 0xFF00–0xFF7F
    Io,
    /// 0xFF80–0xFFFE
    HighRam,
    /// 0xFFFF
    InterruptEnable,
}

impl Region {
    pub fn of(addr: u16) -> Self {
        match addr {
            0x0000..=0x3FFF => Region::Rom0,
            0x4000..=0x7FFF => Region::RomX,
            0x8000..=0x97FF => Region::VramTiles,
            0x9800..=0x9BFF => Region::VramBgMap1,
            0x9C00..=0x9FFF => Region::VramBgMap2,
            0xA000..=0xBFFF => Region::ExternalRam,
            0xC000..=0xDFFF => Region::WorkRam,
            0xE000..=0xFDFF => Region::EchoRam,
            0xFE00..=0xFE9F => Region::Oam,
            0xFEA0..=0xFEFF => Region::Unusable,
            0xFF00..=0xFF7F => Region::Io,
            0xFF80..=0xFFFE => Region::HighRam,
            0xFFFF => Region::InterruptEnable,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Region::Rom0 => "ROM0",
            Region::RomX => "ROMX",
            Region::VramTiles => "VRAM tiles",
            Region::VramBgMap1 => "VRAM BG map 1",
            Region::VramBgMap2 => "VRAM BG map 2",
            Region::ExternalRam => "external RAM",
            Region::WorkRam => "WRAM",
            Region::EchoRam => "echo RAM",
            Region::Oam => "OAM",
            Region::Unusable => "unusable",
            Region::Io => "I/O",
            Region::HighRam => "HRAM",
            Region::InterruptEnable => "IE",
        }
    }
}
