pub type Word = u16;
pub type Addr = Word;

pub const WORD_WIDTH: u32 = 16;
pub const ADDR_MAX: Addr = 0xFFFF;

pub const fn mask(width: u32) -> Word {
    ((1u32 << width) - 1) as Word
}

pub const fn signed_min(width: u32) -> i64 {
    -(1 << (width - 1))
}

pub const fn signed_max(width: u32) -> i64 {
    (1 << (width - 1)) - 1
}

/// Two's-complement bit pattern of `val` in a `width`-bit field, or `None`
/// if `val` lies outside [-2^(width-1), 2^(width-1) - 1].
pub fn fit_signed(val: i64, width: u32) -> Option<Word> {
    if val < signed_min(width) || val > signed_max(width) {
        return None;
    }
    Some((val as Word) & mask(width))
}

/// Inverse of `fit_signed`: sign-extend the low `width` bits of `bits`.
pub fn extend_signed(bits: Word, width: u32) -> i64 {
    let val = i64::from(bits & mask(width));
    if val <= signed_max(width) {
        val
    } else {
        val - (1 << width)
    }
}

pub fn words_to_hex(words: &[Word]) -> String {
    words.iter().map(|w| format!("{:04X}\n", w)).collect()
}
