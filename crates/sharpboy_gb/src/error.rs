use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the emulator core.
#[derive(Debug, Error)]
pub enum Error {
    /// The cartridge file could not be read; the session is not created.
    #[error("cartridge not found: {}", path.display())]
    CartridgeNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A disassembly range ends beyond the backing memory.
    #[error("address out of range: {end:#06X} (memory size {size:#06X})")]
    AddressOutOfRange { end: usize, size: usize },

    /// The CPU fetched an opcode with no behaviour. Continuing would
    /// desynchronise from hardware, so execution stops here.
    #[error("unimplemented opcode {opcode:#04X} at {addr:#06X}")]
    UnimplementedOpcode { opcode: u8, addr: u16 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
