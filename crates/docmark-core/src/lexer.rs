//! Line lexer feeding the block tokenizer.
//!
//! Splits the document into lines with `memchr` and hands them out through a
//! peek/consume API. Lines borrow from the input; a `\r` immediately before a
//! `\n` is excluded from the line text, so CRLF and LF documents scan the same.

use memchr::memchr;

use crate::span::Span;

/// A single line of the document, without its line terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub text: &'a str,
    /// Byte span of `text` in the original input.
    pub span: Span,
}

impl<'a> Line<'a> {
    /// True when the line holds nothing but whitespace.
    #[inline]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    #[inline]
    pub fn trimmed(&self) -> &'a str {
        self.text.trim()
    }
}

/// Peekable line iterator over a document.
pub struct Lexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    offset: usize,
    peeked: Option<Line<'a>>,
}

impl<'a> Lexer<'a> {
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            offset: 0,
            peeked: None,
        }
    }

    /// The full text being lexed.
    #[inline]
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Look at the next line without consuming it.
    #[inline]
    pub fn peek_line(&mut self) -> Option<&Line<'a>> {
        if self.peeked.is_none() {
            self.peeked = self.read_line();
        }
        self.peeked.as_ref()
    }

    /// Consume and return the next line.
    #[inline]
    pub fn next_line(&mut self) -> Option<Line<'a>> {
        if let Some(line) = self.peeked.take() {
            return Some(line);
        }
        self.read_line()
    }

    /// Skip blank lines, returning how many were skipped.
    pub fn skip_blank_lines(&mut self) -> usize {
        let mut count = 0;
        while let Some(line) = self.peek_line() {
            if !line.is_blank() {
                break;
            }
            self.next_line();
            count += 1;
        }
        count
    }

    /// Text covered by a span produced by this lexer.
    ///
    /// Spans always start and end on line boundaries, which are ASCII, so the
    /// slice never splits a character.
    #[inline]
    pub fn slice(&self, span: Span) -> &'a str {
        &self.input[span.start..span.end]
    }

    fn read_line(&mut self) -> Option<Line<'a>> {
        if self.offset >= self.bytes.len() {
            return None;
        }

        let start = self.offset;
        let (end, next) = match memchr(b'\n', &self.bytes[start..]) {
            Some(pos) => (start + pos, start + pos + 1),
            None => (self.bytes.len(), self.bytes.len()),
        };

        // Only a CR that belongs to a CRLF pair is dropped.
        let text_end = if end < self.bytes.len() && end > start && self.bytes[end - 1] == b'\r' {
            end - 1
        } else {
            end
        };

        self.offset = next;

        Some(Line {
            text: &self.input[start..text_end],
            span: Span::new(start, text_end),
        })
    }
}
