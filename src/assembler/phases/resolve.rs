use super::types::{Error, Layout, Located, SourceRecord, SymbolTable};
use crate::assembler::literal;
use crate::isa::hw::{Addr, WORD_WIDTH};
use crate::isa::inst::{Directive, DIRECTIVE_MARKER};
use std::convert::TryFrom;

/// Pass one: walk the records once, fix the origin, give every record its
/// starting address, and bind labels. Addresses stop at `.END`, which is how
/// pass two knows where the program stops.
pub fn resolve(records: &[SourceRecord]) -> Result<Layout, Located<Error>> {
    let mut origin: Option<Addr> = None;
    // Wider than an address so directive expansion can run past the top of
    // memory and get caught below instead of wrapping.
    let mut pc: u32 = 0;
    let mut symbols = SymbolTable::new();
    let mut addrs = Vec::new();

    for rec in records {
        let dir = rec.op.as_deref().and_then(Directive::of_token);

        if let Some(Directive::ORIG) = dir {
            if origin.is_some() {
                return Err(rec.locate(Error::DuplicateOrigin));
            }
            // A label on the origin line belongs to no address and is dropped.
            let base = parse_addr(rec.operand(0)).map_err(|err| rec.locate(err))?;
            origin = Some(base);
            pc = u32::from(base);
            addrs.push(base);
            continue;
        }

        if origin.is_none() {
            return Err(rec.locate(Error::CodeBeforeOrigin));
        }

        if let Some(Directive::END) = dir {
            if let Some(label) = &rec.label {
                let addr = fit_addr(pc).map_err(|err| rec.locate(err))?;
                define(&mut symbols, label, addr).map_err(|err| rec.locate(err))?;
            }
            break;
        }

        let addr = fit_addr(pc).map_err(|err| rec.locate(err))?;
        if let Some(label) = &rec.label {
            define(&mut symbols, label, addr).map_err(|err| rec.locate(err))?;
        }
        addrs.push(addr);

        pc += slot_size(rec, dir).map_err(|err| rec.locate(err))?;
    }

    match origin {
        Some(origin) => Ok(Layout {
            origin,
            addrs,
            symbols,
        }),
        None => Err(Error::MissingOrigin.into()),
    }
}

/// How far the record advances the location counter.
fn slot_size(rec: &SourceRecord, dir: Option<Directive>) -> Result<u32, Error> {
    match dir {
        Some(Directive::FILL) => Ok(1),
        Some(Directive::BLKW) => literal::block_count(rec.operand(0)).map(u32::from),
        Some(Directive::STRINGZ) => {
            Ok(literal::string_body(rec.operand(0)).chars().count() as u32 + 1)
        }
        // `.ORIG` and `.END` never reach here; the caller owns them.
        Some(Directive::ORIG) | Some(Directive::END) => unreachable!(),
        None => match rec.op.as_deref() {
            Some(op) if op.starts_with(DIRECTIVE_MARKER) => {
                Err(Error::UnknownDirective(op.to_owned()))
            }
            // An instruction, valid or not, takes one slot; the encoder has
            // the final say in pass two.
            _ => Ok(1),
        },
    }
}

fn parse_addr(token: &str) -> Result<Addr, Error> {
    let val = literal::parse(token)?;
    Addr::try_from(val).map_err(|_| Error::OutOfRange(val, WORD_WIDTH))
}

fn fit_addr(pc: u32) -> Result<Addr, Error> {
    Addr::try_from(pc).map_err(|_| Error::OutOfRange(i64::from(pc), WORD_WIDTH))
}

fn define(symbols: &mut SymbolTable, label: &str, addr: Addr) -> Result<(), Error> {
    match symbols.insert(label.to_owned(), addr) {
        None => Ok(()),
        Some(_) => Err(Error::DuplicateLabel(label.to_owned())),
    }
}
