//! Block tokenizer.
//!
//! Walks the document line by line and groups lines into [`Block`] tokens.
//! The tokenizer is permissive: it never fails, and anything that looks like
//! a construct without fully matching it falls back to the widest capture
//! available (an unterminated fence runs to the end of input, everything
//! else becomes paragraph text).

use std::borrow::Cow;

use tracing::debug;

use crate::ast::{
    Block, Callout, CalloutKind, CowStr, FencedCode, FrontMatterNote, Heading, Image, Paragraph,
    UnorderedList,
};
use crate::frontmatter;
use crate::lexer::{Lexer, Line};
use crate::span::Span;

/// Deepest heading level; a longer `#` run is plain text.
pub const MAX_HEADING_LEVEL: usize = 5;

const FENCE: &str = "```";

/// Tokenize a whole document into block tokens.
///
/// Blank lines only separate blocks and never produce a token of their own.
///
/// ```rust
/// use docmark_core::ast::{Block, Heading};
/// use docmark_core::parser::tokenize;
///
/// let blocks = tokenize("# Title\n\nBody text.");
/// assert_eq!(blocks.len(), 2);
/// assert!(matches!(&blocks[0], Block::Heading(Heading { level: 1, .. })));
/// ```
pub fn tokenize(input: &str) -> Vec<Block<'_>> {
    let mut tokenizer = BlockTokenizer::new(input);
    let blocks = tokenizer.run();
    debug!(bytes = input.len(), blocks = blocks.len(), "tokenized document");
    blocks
}

/// How a line opens, decided only from the line itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineStart<'a> {
    Blank,
    FrontMatter,
    Heading(u8, &'a str),
    ListItem(&'a str),
    Fence(Option<&'a str>),
    Image { alt: &'a str, src: &'a str },
    Callout(CalloutKind, &'a str),
    Text,
}

impl<'a> LineStart<'a> {
    fn of(line: &Line<'a>) -> Self {
        let text = line.text;
        if line.is_blank() {
            Self::Blank
        } else if text == frontmatter::DELIMITER {
            Self::FrontMatter
        } else if let Some((level, rest)) = heading(text) {
            Self::Heading(level, rest)
        } else if let Some(item) = list_item(text) {
            Self::ListItem(item)
        } else if let Some(lang) = fence_open(text) {
            Self::Fence(lang)
        } else if let Some((alt, src)) = image(text) {
            Self::Image { alt, src }
        } else if let Some((kind, body)) = callout(text) {
            Self::Callout(kind, body)
        } else {
            Self::Text
        }
    }
}

struct BlockTokenizer<'a> {
    lexer: Lexer<'a>,
}

impl<'a> BlockTokenizer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            lexer: Lexer::new(input),
        }
    }

    fn run(&mut self) -> Vec<Block<'a>> {
        let mut blocks = Vec::with_capacity(16);

        loop {
            self.lexer.skip_blank_lines();
            let Some(&line) = self.lexer.peek_line() else {
                break;
            };

            let block = match LineStart::of(&line) {
                LineStart::Blank => {
                    self.lexer.next_line();
                    None
                }
                LineStart::FrontMatter => self.front_matter(),
                LineStart::Heading(level, text) => {
                    self.lexer.next_line();
                    Some(Block::Heading(Heading {
                        level,
                        text: Cow::Borrowed(text),
                    }))
                }
                LineStart::ListItem(_) => Some(self.list()),
                LineStart::Fence(lang) => Some(self.fenced_code(lang)),
                LineStart::Image { alt, src } => {
                    self.lexer.next_line();
                    Some(Block::Image(Image {
                        src: Cow::Borrowed(src),
                        alt: Cow::Borrowed(alt),
                    }))
                }
                LineStart::Callout(kind, text) => {
                    self.lexer.next_line();
                    Some(Block::Callout(Callout {
                        kind,
                        text: Cow::Borrowed(text),
                    }))
                }
                LineStart::Text => Some(self.paragraph()),
            };

            if let Some(block) = block {
                blocks.push(block);
            }
        }

        blocks
    }

    /// Consume a front-matter region. Only a `hidden: true` entry yields a token.
    fn front_matter(&mut self) -> Option<Block<'a>> {
        self.lexer.next_line();

        let mut hidden = false;
        while let Some(line) = self.lexer.next_line() {
            if line.text == frontmatter::DELIMITER {
                break;
            }
            hidden |= frontmatter::is_hidden_entry(line.text);
        }

        hidden.then_some(Block::FrontMatterNote(FrontMatterNote { hidden }))
    }

    fn list(&mut self) -> Block<'a> {
        let mut items: Vec<CowStr<'a>> = Vec::with_capacity(8);

        while let Some(line) = self.lexer.peek_line() {
            let Some(item) = list_item(line.text) else {
                break;
            };
            items.push(Cow::Borrowed(item));
            self.lexer.next_line();
        }

        Block::UnorderedList(UnorderedList { items })
    }

    fn fenced_code(&mut self, lang: Option<&'a str>) -> Block<'a> {
        self.lexer.next_line();

        let mut body: Option<Span> = None;
        let mut closed = false;
        while let Some(line) = self.lexer.next_line() {
            if is_fence_close(line.text) {
                closed = true;
                break;
            }
            body = Some(match body {
                Some(span) => span.to(line.span),
                None => line.span,
            });
        }

        // Without a closer the code runs to the very end of the input, so a
        // trailing newline stays part of it.
        if !closed {
            body = body.map(|span| span.to(Span::new(span.start, self.lexer.input().len())));
        }

        let code = match body {
            Some(span) => {
                let raw = self.lexer.slice(span);
                if raw.contains("\r\n") {
                    Cow::Owned(raw.replace("\r\n", "\n"))
                } else {
                    Cow::Borrowed(raw)
                }
            }
            None => Cow::Borrowed(""),
        };

        Block::FencedCode(FencedCode {
            lang: lang.map(Cow::Borrowed),
            code,
        })
    }

    /// Join the current line and every following plain line with single spaces.
    fn paragraph(&mut self) -> Block<'a> {
        let mut text: CowStr<'a> = match self.lexer.next_line() {
            Some(line) => Cow::Borrowed(line.trimmed()),
            None => Cow::Borrowed(""),
        };

        while let Some(line) = self.lexer.peek_line() {
            if LineStart::of(line) != LineStart::Text {
                break;
            }
            let next = line.trimmed();
            let joined = text.to_mut();
            joined.push(' ');
            joined.push_str(next);
            self.lexer.next_line();
        }

        Block::Paragraph(Paragraph { text })
    }
}

/// `#{1,5}` followed by whitespace. Returns the level and the verbatim rest.
fn heading(text: &str) -> Option<(u8, &str)> {
    let hashes = text.bytes().take_while(|&b| b == b'#').count();
    if hashes == 0 || hashes > MAX_HEADING_LEVEL {
        return None;
    }

    let rest = &text[hashes..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some((hashes as u8, rest.trim_start()))
}

/// Optional indent, `-` or `*`, whitespace. Returns the item text.
fn list_item(text: &str) -> Option<&str> {
    let rest = text.trim_start();
    let rest = rest.strip_prefix(['-', '*'])?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.trim_start())
}

/// Opening fence: three backticks, an optional word tag, trailing whitespace.
///
/// The outer `Option` says whether the line is a fence; the inner one holds
/// the tag.
fn fence_open(text: &str) -> Option<Option<&str>> {
    let rest = text.strip_prefix(FENCE)?;
    let tag_len = rest
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count();
    let (tag, trailing) = rest.split_at(tag_len);
    if !trailing.trim().is_empty() {
        return None;
    }
    Some((!tag.is_empty()).then_some(tag))
}

fn is_fence_close(text: &str) -> bool {
    text.strip_prefix(FENCE)
        .is_some_and(|rest| rest.trim().is_empty())
}

/// Whole-line `![alt](src)`. The alt text runs to the last `](` on the line.
fn image(text: &str) -> Option<(&str, &str)> {
    let inner = text.strip_prefix("![")?.strip_suffix(')')?;
    let split = inner.rfind("](")?;
    Some((&inner[..split], &inner[split + 2..]))
}

/// Whole-line `{kind}(text)` with a known kind.
fn callout(text: &str) -> Option<(CalloutKind, &str)> {
    let rest = text.strip_prefix('{')?;
    let (name, rest) = rest.split_once('}')?;
    let kind = CalloutKind::from_name(name)?;
    let body = rest.strip_prefix('(')?.strip_suffix(')')?;
    Some((kind, body))
}
