use super::encode::encode;
use super::types::{Error, Layout, Located, SourceRecord, SymbolTable};
use crate::assembler::literal;
use crate::common;
use crate::isa::hw::{Addr, Word};
use crate::isa::inst::Directive;

/// Pass two: expand every record against the frozen layout, in order. The
/// zip is bounded by the address list, so records past `.END` are never
/// visited and the `.END` record itself contributes nothing.
pub fn emit(records: &[SourceRecord], layout: &Layout) -> Result<Vec<Word>, Located<Error>> {
    common::accumulate_vecs(
        records
            .iter()
            .zip(layout.addrs.iter())
            .map(|(rec, &addr)| expand(rec, addr, layout).map_err(|err| rec.locate(err))),
    )
}

fn expand(rec: &SourceRecord, addr: Addr, layout: &Layout) -> Result<Vec<Word>, Error> {
    match rec.op.as_deref().and_then(Directive::of_token) {
        Some(Directive::ORIG) | Some(Directive::END) => Ok(vec![]),
        Some(Directive::FILL) => Ok(vec![fill_value(rec.operand(0), &layout.symbols)?]),
        Some(Directive::BLKW) => {
            let count = literal::block_count(rec.operand(0))?;
            Ok(vec![0; usize::from(count)])
        }
        Some(Directive::STRINGZ) => Ok(string_words(rec.operand(0))),
        None => Ok(vec![encode(rec, addr, &layout.symbols)?]),
    }
}

/// `.FILL` takes a label or a literal; the value is masked to word width,
/// not range-checked, so `.FILL #-1` yields 0xFFFF.
fn fill_value(token: &str, symbols: &SymbolTable) -> Result<Word, Error> {
    let val = match symbols.get(token) {
        Some(&target) => i64::from(target),
        None => literal::parse(token).map_err(|_| Error::UnknownLabel(token.to_owned()))?,
    };
    Ok(val as Word)
}

/// One word per character, code point masked to eight bits, then the
/// terminator.
fn string_words(token: &str) -> Vec<Word> {
    literal::string_body(token)
        .chars()
        .map(|c| (c as u32 & 0xFF) as Word)
        .chain(std::iter::once(0))
        .collect()
}
