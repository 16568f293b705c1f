//! Opcode descriptor tables for the primary and 0xCB-prefixed spaces.
//!
//! Both tables are derived from the opcode bit fields once, the first time
//! they are needed, and are read-only afterwards. Every session shares the
//! same `InstructionSet`.
//!
//! ```text
//! bits:    7 6 | 5 4 3 | 2 1 0
//! field:    x  |   y   |   z
//!              | p | q |
//! ```

use lazy_static::lazy_static;

use super::{Flag, Operand8, Pair, Reg16, Registers};

/// Branch condition of JR/JP/CALL/RET cc.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cond {
    NZ,
    Z,
    NC,
    C,
}

impl Cond {
    fn from_index(index: u8) -> Self {
        match index & 0x03 {
            0 => Cond::NZ,
            1 => Cond::Z,
            2 => Cond::NC,
            _ => Cond::C,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Cond::NZ => "NZ",
            Cond::Z => "Z",
            Cond::NC => "NC",
            Cond::C => "C",
        }
    }

    pub fn holds(self, regs: &Registers) -> bool {
        match self {
            Cond::NZ => !regs.flag(Flag::Z),
            Cond::Z => regs.flag(Flag::Z),
            Cond::NC => !regs.flag(Flag::C),
            Cond::C => regs.flag(Flag::C),
        }
    }
}

/// 8-bit accumulator operation selected by bits 3–5 of 0x80–0xBF and of
/// the `d8` forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AluOp {
    Add,
    Adc,
    Sub,
    Sbc,
    And,
    Xor,
    Or,
    Cp,
}

impl AluOp {
    fn from_index(index: u8) -> Self {
        match index & 0x07 {
            0 => AluOp::Add,
            1 => AluOp::Adc,
            2 => AluOp::Sub,
            3 => AluOp::Sbc,
            4 => AluOp::And,
            5 => AluOp::Xor,
            6 => AluOp::Or,
            _ => AluOp::Cp,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            AluOp::Add => "ADD",
            AluOp::Adc => "ADC",
            AluOp::Sub => "SUB",
            AluOp::Sbc => "SBC",
            AluOp::And => "AND",
            AluOp::Xor => "XOR",
            AluOp::Or => "OR",
            AluOp::Cp => "CP",
        }
    }
}

/// Rotate/shift operation of the CB-prefixed 0x00–0x3F block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShiftOp {
    Rlc,
    Rrc,
    Rl,
    Rr,
    Sla,
    Sra,
    Swap,
    Srl,
}

impl ShiftOp {
    fn from_index(index: u8) -> Self {
        match index & 0x07 {
            0 => ShiftOp::Rlc,
            1 => ShiftOp::Rrc,
            2 => ShiftOp::Rl,
            3 => ShiftOp::Rr,
            4 => ShiftOp::Sla,
            5 => ShiftOp::Sra,
            6 => ShiftOp::Swap,
            _ => ShiftOp::Srl,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            ShiftOp::Rlc => "RLC",
            ShiftOp::Rrc => "RRC",
            ShiftOp::Rl => "RL",
            ShiftOp::Rr => "RR",
            ShiftOp::Sla => "SLA",
            ShiftOp::Sra => "SRA",
            ShiftOp::Swap => "SWAP",
            ShiftOp::Srl => "SRL",
        }
    }
}

/// Memory operand of `LD (rr),A` / `LD A,(rr)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Indirect {
    BC,
    DE,
    /// `(HL+)`: HL is incremented after the access.
    HLI,
    /// `(HL-)`: HL is decremented after the access.
    HLD,
}

impl Indirect {
    fn from_index(index: u8) -> Self {
        match index & 0x03 {
            0 => Indirect::BC,
            1 => Indirect::DE,
            2 => Indirect::HLI,
            _ => Indirect::HLD,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Indirect::BC => "(BC)",
            Indirect::DE => "(DE)",
            Indirect::HLI => "(HL+)",
            Indirect::HLD => "(HL-)",
        }
    }
}

/// The behaviour of one opcode, with its operands resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    Nop,
    Stop,
    Halt,
    Di,
    Ei,

    /// `LD r,r'`
    Ld { dst: Operand8, src: Operand8 },
    /// `LD r,d8`
    LdImm(Operand8),
    /// `LD rr,d16`
    LdImm16(Reg16),
    /// `LD (rr),A`
    StoreA(Indirect),
    /// `LD A,(rr)`
    LoadA(Indirect),
    /// `LD (a16),SP`
    StoreSp,
    /// `LDH (a8),A`
    StoreHigh,
    /// `LDH A,(a8)`
    LoadHigh,
    /// `LDH (C),A`
    StoreHighC,
    /// `LDH A,(C)`
    LoadHighC,
    /// `LD (a16),A`
    StoreAbs,
    /// `LD A,(a16)`
    LoadAbs,
    /// `LD HL,SP+e8`
    LdHlSpOffset,
    /// `LD SP,HL`
    LdSpHl,

    Inc(Operand8),
    Dec(Operand8),
    Inc16(Reg16),
    Dec16(Reg16),
    AddHl(Reg16),
    /// `ADD SP,e8`
    AddSpOffset,
    Alu(AluOp, Operand8),
    AluImm(AluOp),
    /// `RLCA`/`RRCA`/`RLA`/`RRA`: the CB shift on A with Z forced clear.
    RotateA(ShiftOp),
    Daa,
    Cpl,
    Scf,
    Ccf,

    Jr(Option<Cond>),
    Jp(Option<Cond>),
    JpHl,
    Call(Option<Cond>),
    Ret(Option<Cond>),
    Reti,
    Rst(u8),
    Push(Pair),
    Pop(Pair),

    /// 0xCB: the following byte selects an entry of the prefixed table.
    Prefix,
    Shift(ShiftOp, Operand8),
    Bit(u8, Operand8),
    Res(u8, Operand8),
    Set(u8, Operand8),
}

/// Immutable descriptor of one opcode.
///
/// `cycles` is the machine-cycle cost with register operands and with
/// conditional branches not taken. The behaviour charges anything on top
/// (see `Operand8` and the control-flow ops).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub mnemonic: &'static str,
    pub length: u8,
    pub cycles: u8,
    pub op: Op,
}

const fn inst(mnemonic: &'static str, length: u8, cycles: u8, op: Op) -> Instruction {
    Instruction {
        mnemonic,
        length,
        cycles,
        op,
    }
}

/// Primary and CB-prefixed descriptor tables.
pub struct InstructionSet {
    primary: [Option<Instruction>; 256],
    prefixed: [Instruction; 256],
}

lazy_static! {
    static ref INSTRUCTIONS: InstructionSet = InstructionSet::build();
}

/// The process-wide instruction set, built on first use.
pub fn instruction_set() -> &'static InstructionSet {
    &INSTRUCTIONS
}

impl InstructionSet {
    fn build() -> Self {
        Self {
            primary: std::array::from_fn(|opcode| decode_primary(opcode as u8)),
            prefixed: std::array::from_fn(|opcode| decode_prefixed(opcode as u8)),
        }
    }

    /// Descriptor of a primary opcode, or `None` for the opcode holes.
    #[inline]
    pub fn primary(&self, opcode: u8) -> Option<&Instruction> {
        self.primary[opcode as usize].as_ref()
    }

    #[inline]
    pub fn prefixed(&self, opcode: u8) -> &Instruction {
        &self.prefixed[opcode as usize]
    }

    /// Resolve the instruction starting with `opcode`. `next` fetches the
    /// following byte and is only called for the 0xCB prefix.
    pub fn decode(&self, opcode: u8, next: impl FnOnce() -> u8) -> Option<&Instruction> {
        let instruction = self.primary(opcode)?;
        if instruction.op == Op::Prefix {
            Some(self.prefixed(next()))
        } else {
            Some(instruction)
        }
    }
}

fn decode_primary(opcode: u8) -> Option<Instruction> {
    let x = opcode >> 6;
    let y = (opcode >> 3) & 0x07;
    let z = opcode & 0x07;
    let p = y >> 1;
    let q = y & 0x01;

    let instruction = match (x, z) {
        (0, 0) => match y {
            0 => inst("NOP", 1, 1, Op::Nop),
            1 => inst("LD", 3, 5, Op::StoreSp),
            2 => inst("STOP", 2, 1, Op::Stop),
            3 => inst("JR", 2, 3, Op::Jr(None)),
            _ => inst("JR", 2, 2, Op::Jr(Some(Cond::from_index(y - 4)))),
        },
        (0, 1) if q == 0 => inst("LD", 3, 3, Op::LdImm16(Reg16::from_index(p))),
        (0, 1) => inst("ADD", 1, 2, Op::AddHl(Reg16::from_index(p))),
        (0, 2) if q == 0 => inst("LD", 1, 2, Op::StoreA(Indirect::from_index(p))),
        (0, 2) => inst("LD", 1, 2, Op::LoadA(Indirect::from_index(p))),
        (0, 3) if q == 0 => inst("INC", 1, 2, Op::Inc16(Reg16::from_index(p))),
        (0, 3) => inst("DEC", 1, 2, Op::Dec16(Reg16::from_index(p))),
        (0, 4) => inst("INC", 1, 1, Op::Inc(Operand8::from_index(y))),
        (0, 5) => inst("DEC", 1, 1, Op::Dec(Operand8::from_index(y))),
        (0, 6) => inst("LD", 2, 2, Op::LdImm(Operand8::from_index(y))),
        (0, 7) => match y {
            0 => inst("RLCA", 1, 1, Op::RotateA(ShiftOp::Rlc)),
            1 => inst("RRCA", 1, 1, Op::RotateA(ShiftOp::Rrc)),
            2 => inst("RLA", 1, 1, Op::RotateA(ShiftOp::Rl)),
            3 => inst("RRA", 1, 1, Op::RotateA(ShiftOp::Rr)),
            4 => inst("DAA", 1, 1, Op::Daa),
            5 => inst("CPL", 1, 1, Op::Cpl),
            6 => inst("SCF", 1, 1, Op::Scf),
            _ => inst("CCF", 1, 1, Op::Ccf),
        },
        (1, 6) if y == 6 => inst("HALT", 1, 1, Op::Halt),
        (1, _) => inst(
            "LD",
            1,
            1,
            Op::Ld {
                dst: Operand8::from_index(y),
                src: Operand8::from_index(z),
            },
        ),
        (2, _) => {
            let alu = AluOp::from_index(y);
            inst(alu.mnemonic(), 1, 1, Op::Alu(alu, Operand8::from_index(z)))
        }
        (3, 0) => match y {
            0..=3 => inst("RET", 1, 2, Op::Ret(Some(Cond::from_index(y)))),
            4 => inst("LDH", 2, 3, Op::StoreHigh),
            5 => inst("ADD", 2, 4, Op::AddSpOffset),
            6 => inst("LDH", 2, 3, Op::LoadHigh),
            _ => inst("LD", 2, 3, Op::LdHlSpOffset),
        },
        (3, 1) if q == 0 => inst("POP", 1, 3, Op::Pop(stack_pair(p))),
        (3, 1) => match p {
            0 => inst("RET", 1, 4, Op::Ret(None)),
            1 => inst("RETI", 1, 4, Op::Reti),
            2 => inst("JP", 1, 1, Op::JpHl),
            _ => inst("LD", 1, 2, Op::LdSpHl),
        },
        (3, 2) => match y {
            0..=3 => inst("JP", 3, 3, Op::Jp(Some(Cond::from_index(y)))),
            4 => inst("LDH", 1, 2, Op::StoreHighC),
            5 => inst("LD", 3, 4, Op::StoreAbs),
            6 => inst("LDH", 1, 2, Op::LoadHighC),
            _ => inst("LD", 3, 4, Op::LoadAbs),
        },
        (3, 3) => match y {
            0 => inst("JP", 3, 4, Op::Jp(None)),
            1 => inst("PREFIX", 1, 1, Op::Prefix),
            6 => inst("DI", 1, 1, Op::Di),
            7 => inst("EI", 1, 1, Op::Ei),
            // 0xD3, 0xDB, 0xE3, 0xEB
            _ => return None,
        },
        (3, 4) => match y {
            0..=3 => inst("CALL", 3, 3, Op::Call(Some(Cond::from_index(y)))),
            // 0xE4, 0xEC, 0xF4, 0xFC
            _ => return None,
        },
        (3, 5) if q == 0 => inst("PUSH", 1, 4, Op::Push(stack_pair(p))),
        (3, 5) => match p {
            0 => inst("CALL", 3, 6, Op::Call(None)),
            // 0xDD, 0xED, 0xFD
            _ => return None,
        },
        (3, 6) => {
            let alu = AluOp::from_index(y);
            inst(alu.mnemonic(), 2, 2, Op::AluImm(alu))
        }
        (3, 7) => inst("RST", 1, 4, Op::Rst(y * 8)),
        _ => unreachable!("opcode bit fields out of range: {opcode:#04X}"),
    };

    Some(instruction)
}

/// PUSH/POP operand: 0=BC, 1=DE, 2=HL, 3=AF.
fn stack_pair(index: u8) -> Pair {
    match index & 0x03 {
        0 => Pair::BC,
        1 => Pair::DE,
        2 => Pair::HL,
        _ => Pair::AF,
    }
}

fn decode_prefixed(opcode: u8) -> Instruction {
    let x = opcode >> 6;
    let y = (opcode >> 3) & 0x07;
    let target = Operand8::from_index(opcode & 0x07);

    match x {
        0 => {
            let shift = ShiftOp::from_index(y);
            inst(shift.mnemonic(), 2, 2, Op::Shift(shift, target))
        }
        1 => inst("BIT", 2, 2, Op::Bit(y, target)),
        2 => inst("RES", 2, 2, Op::Res(y, target)),
        _ => inst("SET", 2, 2, Op::Set(y, target)),
    }
}
