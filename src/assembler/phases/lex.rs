use super::types::SourceRecord;
use crate::isa::inst::{self, DIRECTIVE_MARKER};

const COMMENT_CHAR: char = ';';
const LABEL_TERMINATOR: char = ':';
const STRING_QUOTE: char = '"';
const SEPARATOR: char = ',';

/// Split source into one record per meaningful line. This phase cannot fail:
/// blank and comment-only lines produce nothing, and every other kind of
/// trouble is left for the later phases to reject with a proper location.
pub fn lex(source: &str) -> Vec<SourceRecord> {
    source
        .lines()
        .enumerate()
        .filter_map(|(line_no, line)| lex_line(line_no + 1, line))
        .collect()
}

fn lex_line(line_no: usize, raw: &str) -> Option<SourceRecord> {
    let code = match raw.find(COMMENT_CHAR) {
        Some(idx) => &raw[..idx],
        None => raw,
    };

    let mut tokens = split_tokens(code);
    if tokens.is_empty() {
        return None;
    }

    let label = take_label(&mut tokens);
    let mut rest = tokens.into_iter();
    let op = rest.next();
    let operands = rest.collect();

    Some(SourceRecord {
        line: line_no,
        label,
        op,
        operands,
        raw: raw.to_owned(),
    })
}

/// A leading token is a label if it carries the terminator, or positionally:
/// anything that is not a directive and not a known (or branch-prefixed)
/// mnemonic has no other way to start a line.
fn take_label(tokens: &mut Vec<String>) -> Option<String> {
    let first = tokens.first()?;
    let label = match first.strip_suffix(LABEL_TERMINATOR) {
        Some(name) => name.to_owned(),
        None if !first.starts_with(DIRECTIVE_MARKER) && !inst::is_mnemonic(first) => first.clone(),
        None => return None,
    };
    tokens.remove(0);
    Some(label)
}

/// Split on runs of whitespace and separators, except between quotes so a
/// string operand survives as one token.
fn split_tokens(code: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut cur = String::new();
    let mut in_string = false;

    for c in code.chars() {
        match c {
            STRING_QUOTE => {
                in_string = !in_string;
                cur.push(c);
            }
            c if !in_string && (c.is_whitespace() || c == SEPARATOR) => {
                if !cur.is_empty() {
                    tokens.push(std::mem::take(&mut cur));
                }
            }
            c => cur.push(c),
        }
    }
    if !cur.is_empty() {
        tokens.push(cur);
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(
        line: usize,
        label: Option<&str>,
        op: Option<&str>,
        operands: &[&str],
        raw: &str,
    ) -> SourceRecord {
        SourceRecord {
            line,
            label: label.map(str::to_owned),
            op: op.map(str::to_owned),
            operands: operands.iter().map(|s| (*s).to_owned()).collect(),
            raw: raw.to_owned(),
        }
    }

    #[test]
    fn plain_instruction() {
        assert_eq!(
            lex("ADD R1, R2, R3"),
            vec![rec(
                1,
                None,
                Some("ADD"),
                &["R1", "R2", "R3"],
                "ADD R1, R2, R3"
            )]
        );
    }

    #[test]
    fn label_with_terminator() {
        assert_eq!(
            lex("LOOP: ADD R1, R1, #-1"),
            vec![rec(
                1,
                Some("LOOP"),
                Some("ADD"),
                &["R1", "R1", "#-1"],
                "LOOP: ADD R1, R1, #-1"
            )]
        );
    }

    #[test]
    fn label_positional() {
        assert_eq!(
            lex("VAL .FILL #5"),
            vec![rec(1, Some("VAL"), Some(".FILL"), &["#5"], "VAL .FILL #5")]
        );
    }

    #[test]
    fn label_alone() {
        assert_eq!(lex("HERE:"), vec![rec(1, Some("HERE"), None, &[], "HERE:")]);
    }

    #[test]
    fn branch_is_not_a_label() {
        assert_eq!(
            lex("BRzp SKIP"),
            vec![rec(1, None, Some("BRzp"), &["SKIP"], "BRzp SKIP")]
        );
    }

    #[test]
    fn comment_truncates() {
        assert_eq!(
            lex("NOT R0, R1 ; flip"),
            vec![rec(1, None, Some("NOT"), &["R0", "R1"], "NOT R0, R1 ; flip")]
        );
    }

    #[test]
    fn comment_truncates_inside_string() {
        assert_eq!(
            lex(".STRINGZ \"a;b\""),
            vec![rec(1, None, Some(".STRINGZ"), &["\"a"], ".STRINGZ \"a;b\"")]
        );
    }

    #[test]
    fn string_operand_keeps_spaces_and_commas() {
        assert_eq!(
            lex("MSG .STRINGZ \"a b, c\""),
            vec![rec(
                1,
                Some("MSG"),
                Some(".STRINGZ"),
                &["\"a b, c\""],
                "MSG .STRINGZ \"a b, c\""
            )]
        );
    }

    #[test]
    fn blank_and_comment_lines_skipped() {
        assert_eq!(lex("\n   \n; nothing here\n"), vec![]);
    }

    #[test]
    fn separators_alone_yield_nothing() {
        assert_eq!(lex(", ,,"), vec![]);
    }

    #[test]
    fn line_numbers_skip_blanks() {
        assert_eq!(
            lex("\n\nNOT R0, R0\n"),
            vec![rec(3, None, Some("NOT"), &["R0", "R0"], "NOT R0, R0")]
        );
    }
}
