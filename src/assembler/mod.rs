pub mod literal;
pub mod phases;

pub use phases::types::{Error, Loc, Located};

use crate::isa::hw::{self, Word};

/// Assemble full source text into its machine words.
pub fn assemble(source: &str) -> Result<Vec<Word>, Located<Error>> {
    let records = phases::lex(source);
    log::debug!("lexed {} records", records.len());

    let layout = phases::resolve(&records)?;
    log::debug!(
        "pass one: origin {:#06X}, {} labels",
        layout.origin,
        layout.symbols.len()
    );

    let words = phases::emit(&records, &layout)?;
    log::debug!("pass two: emitted {} words", words.len());

    Ok(words)
}

/// Assemble straight to the textual output form, one uppercase hex word per
/// line.
pub fn assemble_hex(source: &str) -> Result<String, Located<Error>> {
    Ok(hw::words_to_hex(&assemble(source)?))
}
