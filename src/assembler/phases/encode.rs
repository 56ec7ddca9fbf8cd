use super::types::{Error, SourceRecord, SymbolTable};
use crate::assembler::literal;
use crate::isa::hw::{fit_signed, mask, Addr, Word};
use crate::isa::inst::{
    self, Cond, Opcode, Reg, DR_SHIFT, IMM5_WIDTH, IMM_FLAG, OFF6_WIDTH, OFF9_WIDTH, SR_SHIFT,
};

/// Encode one instruction record into its word. `addr` is the record's own
/// address; pc-relative offsets count from the slot after it.
pub fn encode(rec: &SourceRecord, addr: Addr, symbols: &SymbolTable) -> Result<Word, Error> {
    let op = match rec.op.as_deref() {
        Some(op) => op,
        // A bare label line has nothing to encode.
        None => return Err(Error::UnsupportedOpcode(String::new())),
    };

    if inst::is_branch(op) {
        let cond = Cond::of_suffix(&op[inst::BRANCH_PREFIX.len()..])
            .ok_or_else(|| Error::UnsupportedOpcode(op.to_owned()))?;
        let off = pc_offset(rec.operand(0), addr, symbols)?;
        return Ok(Opcode::BR.word() | cond.bits() | off);
    }

    let opcode = inst::lookup_opcode(op).ok_or_else(|| Error::UnsupportedOpcode(op.to_owned()))?;

    match opcode {
        Opcode::ADD | Opcode::AND => {
            let dr = reg(rec.operand(0))?;
            let sr1 = reg(rec.operand(1))?;
            let third = rec.operand(2);
            let low = if third.starts_with('r') || third.starts_with('R') {
                reg(third)? as Word
            } else {
                let imm = literal::parse(third)?;
                IMM_FLAG | fit_signed(imm, IMM5_WIDTH).ok_or(Error::OutOfRange(imm, IMM5_WIDTH))?
            };
            Ok(opcode.word() | ((dr as Word) << DR_SHIFT) | ((sr1 as Word) << SR_SHIFT) | low)
        }
        Opcode::NOT => {
            let dr = reg(rec.operand(0))?;
            let sr = reg(rec.operand(1))?;
            Ok(opcode.word()
                | ((dr as Word) << DR_SHIFT)
                | ((sr as Word) << SR_SHIFT)
                | mask(OFF6_WIDTH))
        }
        Opcode::LD | Opcode::LEA => {
            let dr = reg(rec.operand(0))?;
            let off = pc_offset(rec.operand(1), addr, symbols)?;
            Ok(opcode.word() | ((dr as Word) << DR_SHIFT) | off)
        }
        Opcode::LDR | Opcode::STR => {
            let dr = reg(rec.operand(0))?;
            let base = reg(rec.operand(1))?;
            let off = literal::parse(rec.operand(2))?;
            let off = fit_signed(off, OFF6_WIDTH).ok_or(Error::OutOfRange(off, OFF6_WIDTH))?;
            Ok(opcode.word()
                | ((dr as Word) << DR_SHIFT)
                | ((base as Word) << SR_SHIFT)
                | off)
        }
        // Every branch spelling took the prefix path above.
        Opcode::BR => unreachable!(),
    }
}

fn reg(token: &str) -> Result<Reg, Error> {
    Reg::of_name(token).ok_or_else(|| Error::BadRegister(token.to_owned()))
}

/// A branch/load target: a known label resolves pc-relative, anything else
/// must parse as a literal offset, and a token that is neither reads as a
/// reference to a label that was never defined.
fn pc_offset(token: &str, addr: Addr, symbols: &SymbolTable) -> Result<Word, Error> {
    let off = match symbols.get(token) {
        Some(&target) => i64::from(target) - (i64::from(addr) + 1),
        None => literal::parse(token).map_err(|_| Error::UnknownLabel(token.to_owned()))?,
    };
    fit_signed(off, OFF9_WIDTH).ok_or(Error::OutOfRange(off, OFF9_WIDTH))
}
