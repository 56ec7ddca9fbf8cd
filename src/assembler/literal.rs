use super::phases::types::Error;
use crate::isa::hw::WORD_WIDTH;
use std::convert::TryFrom;

/// Parse an immediate/offset token: `#` marks decimal, `x` hex, `b` binary;
/// anything unmarked is decimal with an optional sign. Underscores are digit
/// grouping and ignored.
pub fn parse(token: &str) -> Result<i64, Error> {
    let digits: String = token.chars().filter(|&c| c != '_').collect();

    let (body, radix) = match digits.chars().next() {
        Some('#') => (&digits[1..], 10),
        Some('x') | Some('X') => (&digits[1..], 16),
        Some('b') | Some('B') => (&digits[1..], 2),
        _ => (digits.as_str(), 10),
    };

    i64::from_str_radix(body, radix).map_err(|_| Error::MalformedNumber(token.to_owned()))
}

/// A `.BLKW` word count; counts are unsigned and bounded by the address space.
pub fn block_count(token: &str) -> Result<u16, Error> {
    let val = parse(token)?;
    u16::try_from(val).map_err(|_| Error::OutOfRange(val, WORD_WIDTH))
}

/// The characters of a string operand, with one leading and one trailing
/// quote stripped. No escape forms exist. Sizing in pass one and expansion in
/// pass two both go through here, so they cannot disagree.
pub fn string_body(token: &str) -> &str {
    let body = token.strip_prefix('"').unwrap_or(token);
    body.strip_suffix('"').unwrap_or(body)
}
