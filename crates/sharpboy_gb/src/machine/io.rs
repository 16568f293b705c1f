use crate::cpu::Bus;

/// Hardware register contents the DMG boot ROM leaves behind at 0x0100.
///
/// OBP0/OBP1 are officially uninitialised and are left at 0.
const DMG_IO_DEFAULTS: &[(u16, u8)] = &[
    // Joypad.
    (0xFF00, 0xCF),
    // Serial.
    (0xFF01, 0x00),
    (0xFF02, 0x7E),
    // Divider and timer.
    (0xFF04, 0xAB),
    (0xFF05, 0x00),
    (0xFF06, 0x00),
    (0xFF07, 0xF8),
    // IF: upper bits read as 1, VBlank already requested.
    (0xFF0F, 0xE1),
    // Sound.
    (0xFF10, 0x80),
    (0xFF11, 0xBF),
    (0xFF12, 0xF3),
    (0xFF13, 0xFF),
    (0xFF14, 0xBF),
    (0xFF16, 0x3F),
    (0xFF17, 0x00),
    (0xFF18, 0xFF),
    (0xFF19, 0xBF),
    (0xFF1A, 0x7F),
    (0xFF1B, 0xFF),
    (0xFF1C, 0x9F),
    (0xFF1D, 0xFF),
    (0xFF1E, 0xBF),
    (0xFF20, 0xFF),
    (0xFF21, 0x00),
    (0xFF22, 0x00),
    (0xFF23, 0xBF),
    (0xFF24, 0x77),
    (0xFF25, 0xF3),
    (0xFF26, 0xF1),
    // LCD.
    (0xFF40, 0x91), // LCDC
    (0xFF41, 0x85), // STAT
    (0xFF42, 0x00), // SCY
    (0xFF43, 0x00), // SCX
    (0xFF44, 0x00), // LY
    (0xFF45, 0x00), // LYC
    (0xFF46, 0xFF), // DMA
    (0xFF47, 0xFC), // BGP
    (0xFF4A, 0x00), // WY
    (0xFF4B, 0x00), // WX
    // Interrupt enable.
    (0xFFFF, 0x00),
];

/// Write the DMG post-boot hardware register values.
pub(super) fn apply_dmg_defaults<B: Bus>(bus: &mut B) {
    for &(addr, value) in DMG_IO_DEFAULTS {
        bus.write8(addr, value);
    }
}
