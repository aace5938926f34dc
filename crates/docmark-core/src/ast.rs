//! Token types produced by the block and inline tokenizers.
//!
//! Both unions are closed: every consumer dispatches on them with an
//! exhaustive `match`. Text fields borrow from the document wherever the value
//! is a contiguous slice of it and only own their text when the tokenizer had
//! to build it (joined paragraph lines, CRLF code blocks).

use std::borrow::Cow;
use std::fmt;

/// Borrowed or owned string used throughout the token types.
pub type CowStr<'a> = Cow<'a, str>;

/// Callout flavours recognised by `{kind}(text)` lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "lowercase")
)]
pub enum CalloutKind {
    Info,
    Warning,
    Extension,
}

impl CalloutKind {
    /// Look up a kind by the name written between the braces.
    ///
    /// Matching is exact and case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "info" => Some(Self::Info),
            "warning" => Some(Self::Warning),
            "extension" => Some(Self::Extension),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Extension => "extension",
        }
    }
}

impl fmt::Display for CalloutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Block-level token, one per logical unit of the document.
///
/// Tokens come out of [`crate::parser::tokenize`] in document order. Heading,
/// paragraph and list item text is kept raw; the renderer runs it through the
/// inline tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub enum Block<'a> {
    /// Front matter that marks the page hidden.
    FrontMatterNote(FrontMatterNote),
    /// `#` to `#####` heading.
    Heading(Heading<'a>),
    /// Run of consecutive `-` / `*` items.
    UnorderedList(UnorderedList<'a>),
    /// Triple-backtick fenced code.
    FencedCode(FencedCode<'a>),
    /// A line that is exactly `![alt](src)`.
    Image(Image<'a>),
    /// A line that is exactly `{kind}(text)`.
    Callout(Callout<'a>),
    /// Anything else: consecutive plain lines joined by single spaces.
    Paragraph(Paragraph<'a>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FrontMatterNote {
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Heading<'a> {
    /// Number of leading `#` characters (1-5).
    pub level: u8,
    /// Everything after the whitespace following the `#` run, verbatim.
    pub text: CowStr<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UnorderedList<'a> {
    pub items: Vec<CowStr<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FencedCode<'a> {
    /// Word-character tag after the opening fence, if any.
    pub lang: Option<CowStr<'a>>,
    /// Lines between the fences, joined with `\n`.
    pub code: CowStr<'a>,
}

impl FencedCode<'_> {
    /// Check the language tag against `lang`.
    pub fn is_lang(&self, lang: &str) -> bool {
        self.lang.as_deref() == Some(lang)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Image<'a> {
    pub src: CowStr<'a>,
    pub alt: CowStr<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Callout<'a> {
    pub kind: CalloutKind,
    /// Raw text between the parentheses. Never inline-tokenized.
    pub text: CowStr<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Paragraph<'a> {
    pub text: CowStr<'a>,
}

/// Inline token, nested through `children`.
///
/// Concatenating the literal content of a token sequence gives back the
/// source span minus the delimiters that were consumed. Two `Text` tokens
/// are never adjacent.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub enum Inline<'a> {
    Text(Text<'a>),
    /// `*text*` or `_text_`.
    Emphasis(Emphasis<'a>),
    /// `**text**` or `__text__`.
    Strong(Strong<'a>),
    /// `` `code` ``
    Code(InlineCode<'a>),
    /// `[label](href)`
    Link(Link<'a>),
}

impl<'a> Inline<'a> {
    /// Shorthand for a borrowed or owned `Text` token.
    pub fn text(value: impl Into<CowStr<'a>>) -> Self {
        Inline::Text(Text {
            value: value.into(),
        })
    }

    pub fn emphasis(children: Vec<Inline<'a>>) -> Self {
        Inline::Emphasis(Emphasis { children })
    }

    pub fn strong(children: Vec<Inline<'a>>) -> Self {
        Inline::Strong(Strong { children })
    }

    pub fn code(value: impl Into<CowStr<'a>>) -> Self {
        Inline::Code(InlineCode {
            value: value.into(),
        })
    }

    pub fn link(href: impl Into<CowStr<'a>>, children: Vec<Inline<'a>>) -> Self {
        Inline::Link(Link {
            href: href.into(),
            children,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Text<'a> {
    pub value: CowStr<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Emphasis<'a> {
    pub children: Vec<Inline<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Strong<'a> {
    pub children: Vec<Inline<'a>>,
}

/// Inline code span. Content is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InlineCode<'a> {
    pub value: CowStr<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Link<'a> {
    /// Text between the parentheses, verbatim.
    pub href: CowStr<'a>,
    /// Tokenized label.
    pub children: Vec<Inline<'a>>,
}
