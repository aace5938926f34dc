//! Inline tokenizer.
//!
//! One left-to-right pass over a span of text. At each special character the
//! constructs are tried in a fixed order: code, link, strong, emphasis. A
//! construct always closes at the *nearest* matching terminator; nothing is
//! balanced and there is no lookahead beyond that terminator, so overlapping
//! markup resolves in favour of whichever span opened first.
//!
//! Plain text is never flushed until a structured token is emitted, so
//! adjacent text runs come out as a single borrowed `Text` token.

use std::borrow::Cow;

use memchr::{memchr, memchr3, memmem};
use tracing::trace;

use crate::ast::{Emphasis, Inline, InlineCode, Link, Strong, Text};

/// Nesting depth after which strong, emphasis and link bodies are kept as
/// literal text instead of being tokenized further.
pub const MAX_INLINE_DEPTH: usize = 64;

/// Tokenize one span of text with the default depth limit.
///
/// ```rust
/// use docmark_core::ast::Inline;
/// use docmark_core::inline::tokenize_inline;
///
/// let tokens = tokenize_inline("a *b*");
/// assert_eq!(tokens, vec![
///     Inline::text("a "),
///     Inline::emphasis(vec![Inline::text("b")]),
/// ]);
/// ```
pub fn tokenize_inline(text: &str) -> Vec<Inline<'_>> {
    InlineTokenizer::new().tokenize(text)
}

/// Inline tokenizer with a configurable depth limit.
#[derive(Debug, Clone, Copy)]
pub struct InlineTokenizer {
    max_depth: usize,
}

impl Default for InlineTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl InlineTokenizer {
    pub fn new() -> Self {
        Self {
            max_depth: MAX_INLINE_DEPTH,
        }
    }

    /// Limit how deeply nested bodies are tokenized.
    ///
    /// Output is identical to the default for any input that nests less
    /// deeply than `max_depth`.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn tokenize<'a>(&self, text: &'a str) -> Vec<Inline<'a>> {
        Scanner::new(text, 0, self.max_depth).run()
    }
}

struct Scanner<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    /// Start of the pending plain-text run.
    text_start: usize,
    depth: usize,
    max_depth: usize,
    out: Vec<Inline<'a>>,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str, depth: usize, max_depth: usize) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            text_start: 0,
            depth,
            max_depth,
            out: Vec::with_capacity(8),
        }
    }

    fn run(mut self) -> Vec<Inline<'a>> {
        while self.pos < self.bytes.len() {
            let matched = match self.bytes[self.pos] {
                b'`' => self.code(),
                b'[' => self.link(),
                b'*' | b'_' => self.strong() || self.emphasis(),
                _ => false,
            };

            if !matched {
                // At least one character always goes to the text run.
                self.pos += 1;
                self.pos = self.next_special();
            }
        }

        self.flush_text();
        self.out
    }

    /// Position of the next `` ` ``, `[`, `*` or `_` at or after `pos`.
    fn next_special(&self) -> usize {
        let rest = &self.bytes[self.pos..];
        let common = memchr3(b'*', b'`', b'[', rest);
        let underscore = memchr(b'_', rest);
        let offset = match (common, underscore) {
            (Some(a), Some(b)) => a.min(b),
            (Some(a), None) | (None, Some(a)) => a,
            (None, None) => rest.len(),
        };
        self.pos + offset
    }

    fn flush_text(&mut self) {
        let end = self.pos.min(self.bytes.len());
        if self.text_start < end {
            self.out.push(Inline::Text(Text {
                value: Cow::Borrowed(&self.text[self.text_start..end]),
            }));
        }
        self.text_start = end;
    }

    /// Flush pending text, push `token`, and resume scanning at `resume`.
    fn emit(&mut self, token: Inline<'a>, resume: usize) {
        self.flush_text();
        self.out.push(token);
        self.pos = resume;
        self.text_start = resume;
    }

    /// Tokenize a nested body one level deeper, or keep it literal past the limit.
    fn nested(&self, body: &'a str) -> Vec<Inline<'a>> {
        let depth = self.depth + 1;
        if depth > self.max_depth {
            trace!(depth, len = body.len(), "inline depth limit reached");
            if body.is_empty() {
                return Vec::new();
            }
            return vec![Inline::Text(Text {
                value: Cow::Borrowed(body),
            })];
        }
        Scanner::new(body, depth, self.max_depth).run()
    }

    fn find_byte(&self, from: usize, needle: u8) -> Option<usize> {
        memchr(needle, self.bytes.get(from..)?).map(|offset| from + offset)
    }

    /// `` `code` ``. Without a closing backtick the rest of the span is text.
    fn code(&mut self) -> bool {
        let open = self.pos;
        match self.find_byte(open + 1, b'`') {
            Some(close) => {
                let value = &self.text[open + 1..close];
                self.emit(
                    Inline::Code(InlineCode {
                        value: Cow::Borrowed(value),
                    }),
                    close + 1,
                );
            }
            None => {
                self.pos = self.bytes.len();
            }
        }
        true
    }

    /// `[label](href)`, where `]` is the first one after `[` and must be
    /// followed directly by `(`.
    fn link(&mut self) -> bool {
        let open = self.pos;
        let Some(close_label) = self.find_byte(open + 1, b']') else {
            return false;
        };
        if self.bytes.get(close_label + 1) != Some(&b'(') {
            return false;
        }
        let Some(close_paren) = self.find_byte(close_label + 2, b')') else {
            return false;
        };

        let label = &self.text[open + 1..close_label];
        let href = &self.text[close_label + 2..close_paren];
        let children = self.nested(label);
        self.emit(
            Inline::Link(Link {
                href: Cow::Borrowed(href),
                children,
            }),
            close_paren + 1,
        );
        true
    }

    /// `**body**` or `__body__`, closed by the next occurrence of the same pair.
    fn strong(&mut self) -> bool {
        let open = self.pos;
        let marker = self.bytes[open];
        if self.bytes.get(open + 1) != Some(&marker) {
            return false;
        }

        let pair = &self.bytes[open..open + 2];
        let Some(offset) = memmem::find(&self.bytes[open + 2..], pair) else {
            return false;
        };
        let close = open + 2 + offset;

        let children = self.nested(&self.text[open + 2..close]);
        self.emit(Inline::Strong(Strong { children }), close + 2);
        true
    }

    /// `*body*` or `_body_` opened by a marker that is not doubled.
    fn emphasis(&mut self) -> bool {
        let open = self.pos;
        let marker = self.bytes[open];
        if self.bytes.get(open + 1) == Some(&marker) {
            return false;
        }
        let Some(close) = self.find_byte(open + 1, marker) else {
            return false;
        };

        let children = self.nested(&self.text[open + 1..close]);
        self.emit(Inline::Emphasis(Emphasis { children }), close + 1);
        true
    }
}
