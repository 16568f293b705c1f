use std::path::Path;

use crate::error::{Error, Result};

/// Title field of the cartridge header.
const TITLE: std::ops::Range<usize> = 0x0134..0x0144;
/// Cartridge type byte (mapper and extra hardware).
const CART_TYPE: usize = 0x0147;

/// Read a cartridge image from disk.
pub fn load(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| Error::CartridgeNotFound {
        path: path.to_path_buf(),
        source,
    })
}

/// Printable title from the header, empty when the image is too short.
pub(super) fn title(rom: &[u8]) -> String {
    rom.get(TITLE)
        .unwrap_or_default()
        .iter()
        .take_while(|&&b| b != 0)
        .filter(|b| b.is_ascii_graphic() || **b == b' ')
        .map(|&b| b as char)
        .collect()
}

pub(super) fn cart_type(rom: &[u8]) -> u8 {
    rom.get(CART_TYPE).copied().unwrap_or(0)
}
