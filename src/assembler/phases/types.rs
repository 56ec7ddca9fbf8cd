use crate::isa::hw::Addr;
use crate::isa::inst::Reg;
use derive_more::Constructor;
use itertools::Itertools;
use std::collections::HashMap;
use std::fmt::Display;
use strum::IntoEnumIterator;

/*
    The assembler runs in fixed phases over one immutable record list:

        1.  Lexing: each source line is stripped of its comment and split into
            an optional label, an opcode-or-directive token, and operand
            tokens, yielding one `SourceRecord` per non-blank line. No errors
            arise here; anything suspicious is left for later phases to
            reject.

        2.  Resolution (pass one): the records are walked once to fix the
            origin, assign every record its starting address (each record
            advances the location counter by its slot size), and bind labels.
            The output is a `Layout`; the records themselves are not touched.

        3.  Emission (pass two): the records are walked again against the
            frozen `Layout`, bounded by its address list so nothing beyond
            `.END` is visited. Directives expand to their data words and
            instructions are encoded one word each, with label references
            resolved through the symbol table.

    Errors carry the kind plus the offending token or value, wrapped in
    `Located` to pin them to a source line where one exists.
*/

pub type LabelName = String;

pub type SymbolTable = HashMap<LabelName, Addr>;

/// One non-blank source line, split but otherwise uninterpreted.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct SourceRecord {
    pub line: usize,
    pub label: Option<String>,
    pub op: Option<String>,
    pub operands: Vec<String>,
    pub raw: String,
}

impl SourceRecord {
    pub fn locate<T>(&self, val: T) -> Located<T> {
        Located::with_loc(Loc::new(self.line), val)
    }

    /// Operand by position; missing operands read as the empty token and are
    /// rejected by whichever parser the position feeds.
    pub fn operand(&self, idx: usize) -> &str {
        self.operands.get(idx).map(String::as_str).unwrap_or("")
    }
}

/// Pass one's output: the origin, one starting address per record up to (but
/// not including) the `.END` record, and the frozen symbol table.
#[derive(Debug, PartialEq, Eq)]
pub struct Layout {
    pub origin: Addr,
    pub addrs: Vec<Addr>,
    pub symbols: SymbolTable,
}

#[derive(Debug, PartialEq, Clone, Eq, Constructor)]
pub struct Loc {
    line: usize,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Located<T: Sized> {
    loc: Option<Loc>,
    val: T,
}

impl Display for Loc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}", self.line)
    }
}

impl<T: Display> Display for Located<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.loc {
            None => write!(f, "{}", self.val),
            Some(loc) => write!(f, "@{}: {}", loc, self.val),
        }
    }
}

impl<T> Located<T> {
    fn new(loc: Option<Loc>, val: T) -> Self {
        Located { loc, val }
    }

    pub fn with_loc(loc: Loc, val: T) -> Self {
        Located::new(Some(loc), val)
    }

    pub fn value(self) -> T {
        self.val
    }
}

impl<T> From<T> for Located<T> {
    fn from(val: T) -> Self {
        Located { loc: None, val }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    MissingOrigin,
    DuplicateOrigin,
    CodeBeforeOrigin,
    DuplicateLabel(LabelName),
    UnknownLabel(LabelName),
    UnknownDirective(String),
    MalformedNumber(String),
    OutOfRange(i64, u32),
    BadRegister(String),
    UnsupportedOpcode(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MissingOrigin => write!(f, "no .ORIG directive in source"),
            Error::DuplicateOrigin => write!(f, ".ORIG redefined"),
            Error::CodeBeforeOrigin => write!(f, "code before .ORIG"),
            Error::DuplicateLabel(label) => write!(f, "duplicate label '{}'", label),
            Error::UnknownLabel(label) => write!(f, "undefined label '{}'", label),
            Error::UnknownDirective(token) => write!(f, "unknown directive '{}'", token),
            Error::MalformedNumber(token) => write!(f, "malformed number '{}'", token),
            Error::OutOfRange(val, width) => {
                write!(f, "value {} does not fit in {} bits", val, width)
            }
            Error::BadRegister(token) => write!(
                f,
                "bad register '{}', expected one of {}",
                token,
                Reg::iter().map(|reg| reg.to_string()).join(", ")
            ),
            Error::UnsupportedOpcode(token) => write!(f, "unsupported opcode '{}'", token),
        }
    }
}

impl std::error::Error for Located<Error> {}
