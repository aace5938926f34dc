//! # docmark core
//!
//! Tokenizer and renderer for the markup used by documentation pages.
//!
//! Processing runs in three stages:
//!
//! 1. [`parser::tokenize`] groups the lines of a document into [`Block`] tokens
//!    (front-matter note, heading, list, fenced code, image, callout, paragraph).
//! 2. [`inline::tokenize_inline`] scans heading, paragraph and list item text for
//!    emphasis, strong emphasis, inline code and links.
//! 3. [`render::Renderer`] walks the blocks, tokenizes their inline text and
//!    produces a [`Node`] tree. Fenced code tagged `scratch` is drawn by an
//!    injected [`DiagramRenderer`].
//!
//! Every stage accepts any input: there is no parse error, and malformed markup
//! degrades to plain text.
//!
//! ## Quick Start
//!
//! ```rust
//! use docmark_core::{render_document, NoDiagrams};
//!
//! let page = "# Hello\n\nSome *emphasis* and `code`.";
//! let tree = render_document(page, NoDiagrams);
//!
//! assert_eq!(
//!     tree.to_html(),
//!     "<h1>Hello</h1>\n<p>Some <em>emphasis</em> and <code>code</code>.</p>\n"
//! );
//! ```

pub mod ast;
pub mod error;
pub mod frontmatter;
pub mod inline;
pub mod lexer;
pub mod node;
pub mod parser;
pub mod render;
pub mod span;

pub use ast::{Block, CalloutKind, Inline};
pub use error::DiagramError;
pub use frontmatter::marks_hidden;
pub use inline::{tokenize_inline, InlineTokenizer};
pub use node::Node;
pub use parser::tokenize;
pub use render::{DiagramRenderer, NoDiagrams, Renderer};

/// Tokenize and render a document in one call with the default diagram tag.
pub fn render_document<D: DiagramRenderer>(text: &str, diagrams: D) -> Node {
    let blocks = tokenize(text);
    Renderer::new(diagrams).render(&blocks)
}
