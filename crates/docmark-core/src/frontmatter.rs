//! Front matter helpers.
//!
//! A front-matter region is delimited by two lines that are exactly `---`.
//! The only key the system acts on is `hidden`; every other entry is read
//! past and dropped.

use crate::lexer::Lexer;

/// The line that opens and closes a front-matter region.
pub const DELIMITER: &str = "---";

/// Check whether a region line sets `hidden` to `true`.
///
/// Key and value are matched case-sensitively; whitespace around either is
/// ignored.
pub fn is_hidden_entry(line: &str) -> bool {
    match line.trim().split_once(':') {
        Some((key, value)) => key.trim() == "hidden" && value.trim() == "true",
        None => false,
    }
}

/// Check whether a page opens with front matter marking it hidden.
///
/// Only a region starting on the very first line counts, which is what the
/// document store looks at when it builds its visibility index. An
/// unterminated region is scanned to the end of the text.
pub fn marks_hidden(text: &str) -> bool {
    let mut lexer = Lexer::new(text);

    match lexer.next_line() {
        Some(line) if line.text == DELIMITER => {}
        _ => return false,
    }

    while let Some(line) = lexer.next_line() {
        if line.text == DELIMITER {
            break;
        }
        if is_hidden_entry(line.text) {
            return true;
        }
    }

    false
}
