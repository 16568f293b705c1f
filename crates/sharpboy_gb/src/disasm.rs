//! Read-only SM83 disassembler.
//!
//! Decodes instructions from any byte source without executing them. The
//! CPU uses `decode_at` for its per-instruction debug trace; sessions use
//! `disassemble` for a static listing of memory.

use std::collections::BTreeMap;
use std::fmt;

use crate::cpu::table::{Cond, Op};
use crate::cpu::{instruction_set, Instruction};
use crate::error::{Error, Result};

/// One decoded instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceLine {
    pub addr: u16,
    bytes: [u8; 3],
    len: u8,
    pub mnemonic: &'static str,
    pub operands: String,
}

impl TraceLine {
    /// Raw encoded bytes of the instruction (1–3).
    pub fn bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    /// Encoded length in bytes.
    pub fn length(&self) -> u16 {
        self.len as u16
    }
}

impl fmt::Display for TraceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let raw = self
            .bytes()
            .iter()
            .map(|b| format!("{b:02X}"))
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "[{:04X}]: {raw:<8} {}", self.addr, self.mnemonic)?;
        if !self.operands.is_empty() {
            write!(f, " {}", self.operands)?;
        }
        Ok(())
    }
}

/// Decode the instruction at `addr`, reading bytes through `fetch`.
///
/// Opcode holes decode as a one-byte `DB $xx`.
pub fn decode_at<F>(fetch: F, addr: u16) -> TraceLine
where
    F: Fn(u16) -> u8,
{
    let opcode = fetch(addr);
    let b1 = fetch(addr.wrapping_add(1));
    let b2 = fetch(addr.wrapping_add(2));

    let Some(instruction) = instruction_set().decode(opcode, || b1) else {
        return TraceLine {
            addr,
            bytes: [opcode, 0, 0],
            len: 1,
            mnemonic: "DB",
            operands: format!("${opcode:02X}"),
        };
    };

    TraceLine {
        addr,
        bytes: [opcode, b1, b2],
        len: instruction.length,
        mnemonic: instruction.mnemonic,
        operands: render_operands(instruction, addr, b1, b2),
    }
}

fn render_operands(instruction: &Instruction, addr: u16, b1: u8, b2: u8) -> String {
    let d8 = b1;
    let a16 = u16::from_le_bytes([b1, b2]);
    let e8 = b1 as i8;
    let with_cond = |cond: Option<Cond>, target: String| match cond {
        Some(cond) => format!("{},{target}", cond.name()),
        None => target,
    };

    match instruction.op {
        Op::Nop
        | Op::Stop
        | Op::Halt
        | Op::Di
        | Op::Ei
        | Op::RotateA(_)
        | Op::Daa
        | Op::Cpl
        | Op::Scf
        | Op::Ccf
        | Op::Reti
        | Op::Prefix => String::new(),

        Op::Ld { dst, src } => format!("{},{}", dst.name(), src.name()),
        Op::LdImm(dst) => format!("{},${d8:02X}", dst.name()),
        Op::LdImm16(reg) => format!("{},${a16:04X}", reg.name()),
        Op::StoreA(ind) => format!("{},A", ind.name()),
        Op::LoadA(ind) => format!("A,{}", ind.name()),
        Op::StoreSp => format!("(${a16:04X}),SP"),
        Op::StoreHigh => format!("(${:04X}),A", 0xFF00 | d8 as u16),
        Op::LoadHigh => format!("A,(${:04X})", 0xFF00 | d8 as u16),
        Op::StoreHighC => "(C),A".to_string(),
        Op::LoadHighC => "A,(C)".to_string(),
        Op::StoreAbs => format!("(${a16:04X}),A"),
        Op::LoadAbs => format!("A,(${a16:04X})"),
        Op::LdHlSpOffset => format!("HL,SP{}", signed_hex(e8)),
        Op::LdSpHl => "SP,HL".to_string(),

        Op::Inc(target) | Op::Dec(target) => target.name().to_string(),
        Op::Inc16(reg) | Op::Dec16(reg) => reg.name().to_string(),
        Op::AddHl(reg) => format!("HL,{}", reg.name()),
        Op::AddSpOffset => format!("SP,{}", signed_hex(e8)),
        Op::Alu(_, src) => format!("A,{}", src.name()),
        Op::AluImm(_) => format!("A,${d8:02X}"),

        Op::Jr(cond) => {
            let target = addr
                .wrapping_add(instruction.length as u16)
                .wrapping_add(e8 as u16);
            with_cond(cond, format!("${target:04X}"))
        }
        Op::Jp(cond) | Op::Call(cond) => with_cond(cond, format!("${a16:04X}")),
        Op::JpHl => "HL".to_string(),
        Op::Ret(cond) => cond.map(|c| c.name().to_string()).unwrap_or_default(),
        Op::Rst(vector) => format!("${vector:02X}"),
        Op::Push(pair) | Op::Pop(pair) => pair.name().to_string(),

        Op::Shift(_, target) => target.name().to_string(),
        Op::Bit(bit, target) | Op::Res(bit, target) | Op::Set(bit, target) => {
            format!("{bit},{}", target.name())
        }
    }
}

fn signed_hex(value: i8) -> String {
    if value < 0 {
        format!("-${:02X}", value.unsigned_abs())
    } else {
        format!("+${value:02X}")
    }
}

/// Address-keyed listing produced by `disassemble`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Disassembly {
    lines: BTreeMap<u16, TraceLine>,
}

impl Disassembly {
    /// The line of the instruction starting exactly at `addr`, if any.
    pub fn get(&self, addr: u16) -> Option<&TraceLine> {
        self.lines.get(&addr)
    }

    pub fn lines(&self) -> impl Iterator<Item = &TraceLine> {
        self.lines.values()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for Disassembly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Disassemble `memory` from `start` through `end` (inclusive), one line
/// per instruction start.
///
/// Fails without producing anything when `end` lies beyond the memory.
/// Operand bytes past the end of `memory` read as zero.
pub fn disassemble(memory: &[u8], start: u16, end: usize) -> Result<Disassembly> {
    if end >= memory.len() {
        return Err(Error::AddressOutOfRange {
            end,
            size: memory.len(),
        });
    }

    let fetch = |addr: u16| memory.get(addr as usize).copied().unwrap_or(0);
    let mut lines = BTreeMap::new();
    let mut addr = start as usize;
    while addr <= end {
        let line = decode_at(fetch, addr as u16);
        addr += line.length() as usize;
        lines.insert(line.addr, line);
    }

    Ok(Disassembly { lines })
}
