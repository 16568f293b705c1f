/// Registers for the Sharp SM83 CPU core.
///
/// The eight 8-bit registers are stored individually; the 16-bit pairs
/// (`AF`, `BC`, `DE`, `HL`) are views built from them, so a pair always
/// equals `(high << 8) | low`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub f: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,
}

/// One of the four register pairs that can be split into 8-bit halves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pair {
    AF,
    BC,
    DE,
    HL,
}

impl Pair {
    pub fn name(self) -> &'static str {
        match self {
            Pair::AF => "AF",
            Pair::BC => "BC",
            Pair::DE => "DE",
            Pair::HL => "HL",
        }
    }

    pub fn high_name(self) -> &'static str {
        match self {
            Pair::AF => "A",
            Pair::BC => "B",
            Pair::DE => "D",
            Pair::HL => "H",
        }
    }

    pub fn low_name(self) -> &'static str {
        match self {
            Pair::AF => "F",
            Pair::BC => "C",
            Pair::DE => "E",
            Pair::HL => "L",
        }
    }
}

/// 16-bit operand of loads, INC/DEC rr and `ADD HL,rr`.
///
/// Encoded by bits 4–5 of the opcode: 0=BC, 1=DE, 2=HL, 3=SP.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reg16 {
    BC,
    DE,
    HL,
    SP,
}

impl Reg16 {
    pub(crate) fn from_index(index: u8) -> Self {
        match index & 0x03 {
            0 => Reg16::BC,
            1 => Reg16::DE,
            2 => Reg16::HL,
            _ => Reg16::SP,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Reg16::BC => "BC",
            Reg16::DE => "DE",
            Reg16::HL => "HL",
            Reg16::SP => "SP",
        }
    }
}

impl Registers {
    #[inline]
    pub fn af(&self) -> u16 {
        u16::from_be_bytes([self.a, self.f & 0xF0])
    }

    #[inline]
    pub fn set_af(&mut self, value: u16) {
        let [a, f] = value.to_be_bytes();
        self.a = a;
        // Lower 4 bits of F are always zero.
        self.f = f & 0xF0;
    }

    #[inline]
    pub fn bc(&self) -> u16 {
        u16::from_be_bytes([self.b, self.c])
    }

    #[inline]
    pub fn set_bc(&mut self, value: u16) {
        let [b, c] = value.to_be_bytes();
        self.b = b;
        self.c = c;
    }

    #[inline]
    pub fn de(&self) -> u16 {
        u16::from_be_bytes([self.d, self.e])
    }

    #[inline]
    pub fn set_de(&mut self, value: u16) {
        let [d, e] = value.to_be_bytes();
        self.d = d;
        self.e = e;
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        u16::from_be_bytes([self.h, self.l])
    }

    #[inline]
    pub fn set_hl(&mut self, value: u16) {
        let [h, l] = value.to_be_bytes();
        self.h = h;
        self.l = l;
    }

    pub fn pair(&self, pair: Pair) -> u16 {
        match pair {
            Pair::AF => self.af(),
            Pair::BC => self.bc(),
            Pair::DE => self.de(),
            Pair::HL => self.hl(),
        }
    }

    pub fn set_pair(&mut self, pair: Pair, value: u16) {
        match pair {
            Pair::AF => self.set_af(value),
            Pair::BC => self.set_bc(value),
            Pair::DE => self.set_de(value),
            Pair::HL => self.set_hl(value),
        }
    }

    pub fn high(&self, pair: Pair) -> u8 {
        match pair {
            Pair::AF => self.a,
            Pair::BC => self.b,
            Pair::DE => self.d,
            Pair::HL => self.h,
        }
    }

    pub fn set_high(&mut self, pair: Pair, value: u8) {
        match pair {
            Pair::AF => self.a = value,
            Pair::BC => self.b = value,
            Pair::DE => self.d = value,
            Pair::HL => self.h = value,
        }
    }

    pub fn low(&self, pair: Pair) -> u8 {
        match pair {
            Pair::AF => self.f & 0xF0,
            Pair::BC => self.c,
            Pair::DE => self.e,
            Pair::HL => self.l,
        }
    }

    pub fn set_low(&mut self, pair: Pair, value: u8) {
        match pair {
            Pair::AF => self.f = value & 0xF0,
            Pair::BC => self.c = value,
            Pair::DE => self.e = value,
            Pair::HL => self.l = value,
        }
    }

    /// Increment a pair, wrapping at 0xFFFF. Flags are not touched.
    pub fn inc_pair(&mut self, pair: Pair) {
        let value = self.pair(pair).wrapping_add(1);
        self.set_pair(pair, value);
    }

    /// Decrement a pair, wrapping at 0x0000. Flags are not touched.
    pub fn dec_pair(&mut self, pair: Pair) {
        let value = self.pair(pair).wrapping_sub(1);
        self.set_pair(pair, value);
    }

    pub fn reg16(&self, reg: Reg16) -> u16 {
        match reg {
            Reg16::BC => self.bc(),
            Reg16::DE => self.de(),
            Reg16::HL => self.hl(),
            Reg16::SP => self.sp,
        }
    }

    pub fn set_reg16(&mut self, reg: Reg16, value: u16) {
        match reg {
            Reg16::BC => self.set_bc(value),
            Reg16::DE => self.set_de(value),
            Reg16::HL => self.set_hl(value),
            Reg16::SP => self.sp = value,
        }
    }

    #[inline]
    pub fn flag(&self, flag: Flag) -> bool {
        self.f & flag.mask() != 0
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        if value {
            self.f |= flag.mask();
        } else {
            self.f &= !flag.mask();
        }
    }
}

/// Flag bits in the F register.
///
/// Layout (bit index in the byte, from MSB to LSB):
/// - bit 7: Z (zero)
/// - bit 6: N (subtract)
/// - bit 5: H (half carry)
/// - bit 4: C (carry)
/// - bits 0–3 are always zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flag {
    Z = 7,
    N = 6,
    H = 5,
    C = 4,
}

impl Flag {
    #[inline]
    pub const fn mask(self) -> u8 {
        1 << self as u8
    }
}
