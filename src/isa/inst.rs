use crate::common;
use crate::isa::hw::{mask, Word, WORD_WIDTH};
use bitflags::bitflags;
use derive_more::Display;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use once_cell::sync::Lazy;
use static_assertions::const_assert;
use std::collections::HashMap;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/*
    Instruction formats (bit 15 high, 0 low; `D` destination register,
    `S` source register, `B` base register, `T` third register):

        BR[nzp]        0000 NZP OOOOOOOOO      9-bit pc-relative offset
        ADD/AND (reg)  0001 DDD SSS 0 00 TTT
        ADD/AND (imm)  0001 DDD SSS 1 IIIII    5-bit signed immediate
        NOT            1001 DDD SSS 111111     low bits fixed, unary convention
        LD/LEA         0010 DDD OOOOOOOOO      9-bit pc-relative offset
        LDR/STR        0110 DDD BBB OOOOOO     6-bit signed offset

    The opcode always occupies the top four bits; the three condition bits of
    the branch family sit where the destination register otherwise would.
*/

pub const OPCODE_WIDTH: u32 = 4;
pub const OPCODE_SHIFT: u32 = WORD_WIDTH - OPCODE_WIDTH;

pub const REG_WIDTH: u32 = 3;
pub const DR_SHIFT: u32 = 9;
pub const SR_SHIFT: u32 = 6;

pub const IMM_FLAG: Word = 1 << IMM5_WIDTH;
pub const IMM5_WIDTH: u32 = 5;
pub const OFF6_WIDTH: u32 = 6;
pub const OFF9_WIDTH: u32 = 9;

const_assert!(DR_SHIFT + REG_WIDTH == OPCODE_SHIFT);
const_assert!(SR_SHIFT + REG_WIDTH == DR_SHIFT);
const_assert!(OPCODE_WIDTH + REG_WIDTH + OFF9_WIDTH == WORD_WIDTH);
const_assert!(OPCODE_WIDTH + 2 * REG_WIDTH + OFF6_WIDTH == WORD_WIDTH);
const_assert!(OPCODE_WIDTH + 2 * REG_WIDTH + 1 + IMM5_WIDTH == WORD_WIDTH);

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum Opcode {
    BR,
    ADD,
    LD,
    AND,
    LDR,
    STR,
    NOT,
    LEA,
}

impl Opcode {
    pub const fn code(self) -> Word {
        match self {
            Opcode::BR => 0b0000,
            Opcode::ADD => 0b0001,
            Opcode::LD => 0b0010,
            Opcode::AND => 0b0101,
            Opcode::LDR => 0b0110,
            Opcode::STR => 0b0111,
            Opcode::NOT => 0b1001,
            Opcode::LEA => 0b1110,
        }
    }

    /// The opcode alone, in position.
    pub const fn word(self) -> Word {
        self.code() << OPCODE_SHIFT
    }

    pub fn decode(inst: Word) -> Option<Opcode> {
        Opcode::iter().find(|op| op.code() == inst >> OPCODE_SHIFT)
    }
}

static MNEMONICS: Lazy<HashMap<String, Opcode>> = Lazy::new(|| {
    Opcode::iter()
        .map(|op| (sanitize_name(&op.to_string()), op))
        .collect()
});

fn sanitize_name(name: &str) -> String {
    name.to_lowercase()
}

pub fn lookup_opcode(name: &str) -> Option<Opcode> {
    MNEMONICS.get(&sanitize_name(name)).copied()
}

pub const BRANCH_PREFIX: &str = "BR";

/// Whether `name` begins with the branch mnemonic prefix. This alone does not
/// make a valid branch; the suffix still has to pass `Cond::of_suffix`.
pub fn is_branch(name: &str) -> bool {
    name.get(..BRANCH_PREFIX.len())
        .map_or(false, |prefix| common::eq_ignore_case(prefix, BRANCH_PREFIX))
}

pub fn is_mnemonic(token: &str) -> bool {
    is_branch(token) || lookup_opcode(token).is_some()
}

bitflags! {
    pub struct Cond: Word {
        const N = 1 << 11;
        const Z = 1 << 10;
        const P = 1 << 9;
    }
}

impl Cond {
    /// Condition set named by the letters after the branch prefix, in any
    /// order and case. The empty suffix branches unconditionally.
    pub fn of_suffix(suffix: &str) -> Option<Cond> {
        if suffix.is_empty() {
            return Some(Cond::all());
        }

        let mut cond = Cond::empty();
        for c in suffix.chars() {
            match c.to_ascii_lowercase() {
                'n' => cond |= Cond::N,
                'z' => cond |= Cond::Z,
                'p' => cond |= Cond::P,
                _ => return None,
            }
        }
        Some(cond)
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, FromPrimitive, EnumIter)]
pub enum Reg {
    R0,
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
}

impl Reg {
    pub fn of_name(name: &str) -> Option<Reg> {
        Reg::iter().find(|reg| common::eq_ignore_case(name, &reg.to_string()))
    }

    pub fn decode(inst: Word, shift: u32) -> Reg {
        // Infallible once masked to three bits.
        Reg::from_u16((inst >> shift) & mask(REG_WIDTH)).unwrap()
    }
}

pub const DIRECTIVE_MARKER: char = '.';

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum Directive {
    ORIG,
    END,
    FILL,
    BLKW,
    STRINGZ,
}

impl Directive {
    /// Recognize a `.`-marked token; `None` for unmarked tokens and for
    /// unknown names after the marker (the caller decides which it was).
    pub fn of_token(token: &str) -> Option<Directive> {
        let name = token.strip_prefix(DIRECTIVE_MARKER)?;
        Directive::iter().find(|dir| common::eq_ignore_case(name, &dir.to_string()))
    }
}
