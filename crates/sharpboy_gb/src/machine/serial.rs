use crate::cpu::Bus;

use super::{SB, SC};

/// Observer for the serial registers SB/SC.
///
/// The bus is flat, so nothing reacts to serial writes by itself. After each
/// step the session samples SB and SC; when a transfer is started on SC
/// (bit 7 set while bit 0 is 1) the current SB value is appended to
/// `output` and the start bit is cleared, as a link partner would.
#[derive(Debug, Default)]
pub(super) struct Serial {
    sb: u8,
    sc: u8,
    output: Vec<u8>,
}

impl Serial {
    /// Take the current register values as the baseline without reacting.
    pub(super) fn sync<B: Bus>(&mut self, bus: &B) {
        self.sb = bus.peek8(SB);
        self.sc = bus.peek8(SC);
    }

    pub(super) fn observe<B: Bus>(&mut self, bus: &mut B, log_changes: bool) {
        let sb = bus.peek8(SB);
        if sb != self.sb {
            if log_changes {
                log::debug!("SB {:02X} -> {:02X}", self.sb, sb);
            }
            self.sb = sb;
        }

        let sc = bus.peek8(SC);
        if sc != self.sc {
            if log_changes {
                log::debug!("SC {:02X} -> {:02X}", self.sc, sc);
            }
            self.sc = sc;
        }

        // Internal clock & start bit set?
        if (self.sc & 0x81) == 0x81 {
            self.output.push(self.sb);
            self.sc &= !0x80;
            bus.write8(SC, self.sc);
        }
    }

    pub(super) fn output(&self) -> &[u8] {
        &self.output
    }
}
