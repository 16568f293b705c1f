use super::table::{AluOp, ShiftOp};
use super::{Cpu, Flag};

impl Cpu {
    /// Apply one of the eight accumulator operations with `value` as the
    /// right-hand operand. CP only updates the flags.
    pub(super) fn alu(&mut self, op: AluOp, value: u8) {
        match op {
            AluOp::Add => self.regs.a = self.alu_add(value, false),
            AluOp::Adc => self.regs.a = self.alu_add(value, true),
            AluOp::Sub => self.regs.a = self.alu_sub(value, false),
            AluOp::Sbc => self.regs.a = self.alu_sub(value, true),
            AluOp::And => self.regs.a = self.alu_and(value),
            AluOp::Xor => self.regs.a = self.alu_xor(value),
            AluOp::Or => self.regs.a = self.alu_or(value),
            AluOp::Cp => {
                self.alu_sub(value, false);
            }
        }
    }

    /// Core 8-bit ADD/ADC of `value` to A.
    ///
    /// `use_carry` selects between ADD (false) and ADC (true). Returns the
    /// result; the caller decides where it goes.
    pub(super) fn alu_add(&mut self, value: u8, use_carry: bool) -> u8 {
        let a = self.regs.a;
        let carry_in = u8::from(use_carry && self.get_flag(Flag::C));

        let half = (a & 0x0F) + (value & 0x0F) + carry_in;
        let full = a as u16 + value as u16 + carry_in as u16;
        let result = full as u8;

        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::H, half > 0x0F);
        self.set_flag(Flag::C, full > 0xFF);
        result
    }

    /// Core 8-bit SUB/SBC/CP of `value` from A.
    pub(super) fn alu_sub(&mut self, value: u8, use_carry: bool) -> u8 {
        let a = self.regs.a;
        let carry_in = i16::from(use_carry && self.get_flag(Flag::C));

        let half = (a & 0x0F) as i16 - (value & 0x0F) as i16 - carry_in;
        let full = a as i16 - value as i16 - carry_in;
        let result = full as u8;

        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, half < 0);
        self.set_flag(Flag::C, full < 0);
        result
    }

    #[inline]
    pub(super) fn alu_and(&mut self, value: u8) -> u8 {
        let result = self.regs.a & value;
        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::H, true);
        result
    }

    #[inline]
    pub(super) fn alu_or(&mut self, value: u8) -> u8 {
        let result = self.regs.a | value;
        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
        result
    }

    #[inline]
    pub(super) fn alu_xor(&mut self, value: u8) -> u8 {
        let result = self.regs.a ^ value;
        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
        result
    }

    /// Decimal adjust accumulator after BCD addition/subtraction.
    ///
    /// Uses C, H, N and A to compute a correction value. Updates A, Z, H
    /// and C; N is left unchanged.
    pub(super) fn alu_daa(&mut self) {
        let mut a = self.regs.a;
        let mut adjust: u8 = if self.get_flag(Flag::C) { 0x60 } else { 0x00 };
        if self.get_flag(Flag::H) {
            adjust |= 0x06;
        }

        if !self.get_flag(Flag::N) {
            if (a & 0x0F) > 0x09 {
                adjust |= 0x06;
            }
            if a > 0x99 {
                adjust |= 0x60;
            }
            a = a.wrapping_add(adjust);
        } else {
            a = a.wrapping_sub(adjust);
        }

        self.set_flag(Flag::C, adjust >= 0x60);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::Z, a == 0);
        self.regs.a = a;
    }

    /// 8-bit increment used by INC r and INC (HL). C is unaffected.
    #[inline]
    pub(super) fn alu_inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, (value & 0x0F) == 0x0F);
        result
    }

    /// 8-bit decrement used by DEC r and DEC (HL). C is unaffected.
    #[inline]
    pub(super) fn alu_dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, (value & 0x0F) == 0);
        result
    }

    /// `ADD HL,rr`.
    ///
    /// The SM83 performs this as two byte additions, low bytes first. H
    /// and C therefore come from the high-byte addition: H is the carry
    /// out of bit 3 of `H + rr_hi + carry` (bit 11 of the word), C the
    /// carry out of bit 7. Z is unaffected, N cleared.
    pub(super) fn alu_add16_hl(&mut self, value: u16) {
        let [h, l] = self.regs.hl().to_be_bytes();
        let [value_hi, value_lo] = value.to_be_bytes();

        let (lo, low_carry) = l.overflowing_add(value_lo);
        let carry = u8::from(low_carry);
        let half = (h & 0x0F) + (value_hi & 0x0F) + carry;
        let full = h as u16 + value_hi as u16 + carry as u16;

        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, half > 0x0F);
        self.set_flag(Flag::C, full > 0xFF);

        self.regs.set_hl(u16::from_be_bytes([full as u8, lo]));
    }

    /// Add a signed 8-bit immediate to a 16-bit base, as done by
    /// `ADD SP,e8` and `LD HL,SP+e8`.
    ///
    /// Z and N are cleared; H and C come from the unsigned low-byte add.
    pub(super) fn alu_add16_signed(&mut self, base: u16, imm8: u8) -> u16 {
        let offset = imm8 as i8 as i16 as u16;
        self.set_flag(Flag::Z, false);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, (base & 0x000F) + (offset & 0x000F) > 0x000F);
        self.set_flag(Flag::C, (base & 0x00FF) + (offset & 0x00FF) > 0x00FF);
        base.wrapping_add(offset)
    }

    /// Rotate/shift `value` and set flags as the CB-prefixed forms do:
    /// Z from the result, N and H cleared, C from the bit shifted out
    /// (cleared for SWAP).
    pub(super) fn alu_shift(&mut self, op: ShiftOp, value: u8) -> u8 {
        let carry_in = self.get_flag(Flag::C);
        let (result, carry_out) = match op {
            ShiftOp::Rlc => (value.rotate_left(1), value & 0x80 != 0),
            ShiftOp::Rrc => (value.rotate_right(1), value & 0x01 != 0),
            ShiftOp::Rl => ((value << 1) | u8::from(carry_in), value & 0x80 != 0),
            ShiftOp::Rr => ((value >> 1) | (u8::from(carry_in) << 7), value & 0x01 != 0),
            ShiftOp::Sla => (value << 1, value & 0x80 != 0),
            ShiftOp::Sra => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
            ShiftOp::Swap => (value.rotate_left(4), false),
            ShiftOp::Srl => (value >> 1, value & 0x01 != 0),
        };

        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::C, carry_out);
        result
    }

    /// Accumulator rotate (RLCA/RRCA/RLA/RRA): like the CB form, but Z is
    /// always cleared.
    pub(super) fn alu_rotate_a(&mut self, op: ShiftOp) {
        self.regs.a = self.alu_shift(op, self.regs.a);
        self.set_flag(Flag::Z, false);
    }

    /// BIT b: Z set when the tested bit is 0, N cleared, H set, C kept.
    pub(super) fn alu_bit(&mut self, bit: u8, value: u8) {
        self.set_flag(Flag::Z, value & (1 << bit) == 0);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, true);
    }
}

/// SET b: only the selected bit changes.
#[inline]
pub(super) fn set_bit(bit: u8, value: u8) -> u8 {
    value | (1 << bit)
}

/// RES b: only the selected bit changes.
#[inline]
pub(super) fn res_bit(bit: u8, value: u8) -> u8 {
    value & !(1 << bit)
}
