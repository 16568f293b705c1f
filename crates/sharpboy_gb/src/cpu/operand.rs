use super::{Bus, Cpu, Pair};

/// An 8-bit location an instruction can read or write.
///
/// Covers the register halves and the byte addressed by `HL`. Every access
/// to `MemHl` costs one extra machine cycle, which `get`/`set` charge to
/// the instruction in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operand8 {
    High(Pair),
    Low(Pair),
    MemHl,
}

impl Operand8 {
    pub const A: Self = Operand8::High(Pair::AF);
    pub const B: Self = Operand8::High(Pair::BC);
    pub const C: Self = Operand8::Low(Pair::BC);
    pub const D: Self = Operand8::High(Pair::DE);
    pub const E: Self = Operand8::Low(Pair::DE);
    pub const H: Self = Operand8::High(Pair::HL);
    pub const L: Self = Operand8::Low(Pair::HL);

    /// Decode the 3-bit register field used across the opcode tables:
    /// 0=B, 1=C, 2=D, 3=E, 4=H, 5=L, 6=(HL), 7=A.
    pub(crate) fn from_index(index: u8) -> Self {
        match index & 0x07 {
            0 => Self::B,
            1 => Self::C,
            2 => Self::D,
            3 => Self::E,
            4 => Self::H,
            5 => Self::L,
            6 => Self::MemHl,
            _ => Self::A,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Operand8::High(pair) => pair.high_name(),
            Operand8::Low(pair) => pair.low_name(),
            Operand8::MemHl => "(HL)",
        }
    }

    #[inline]
    pub fn is_memory(self) -> bool {
        self == Operand8::MemHl
    }

    pub(crate) fn get<B: Bus>(self, cpu: &mut Cpu, bus: &mut B) -> u8 {
        match self {
            Operand8::High(pair) => cpu.regs.high(pair),
            Operand8::Low(pair) => cpu.regs.low(pair),
            Operand8::MemHl => {
                cpu.charge(1);
                bus.read8(cpu.regs.hl())
            }
        }
    }

    pub(crate) fn set<B: Bus>(self, cpu: &mut Cpu, bus: &mut B, value: u8) {
        match self {
            Operand8::High(pair) => cpu.regs.set_high(pair, value),
            Operand8::Low(pair) => cpu.regs.set_low(pair, value),
            Operand8::MemHl => {
                cpu.charge(1);
                bus.write8(cpu.regs.hl(), value);
            }
        }
    }
}
