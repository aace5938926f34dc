//! Document renderer.
//!
//! Turns a block token sequence into a [`Node`] tree, running heading,
//! paragraph and list item text through the inline tokenizer on the way.
//! Fenced code tagged with the diagram language is handed to an injected
//! [`DiagramRenderer`]; every other block is rendered here.
//!
//! Rendering is pure: the renderer keeps no state between calls, so one
//! instance can be shared across threads whenever its diagram renderer can.

use std::borrow::Cow;

use tracing::{debug, warn};

use crate::ast::{Block, FencedCode, Inline};
use crate::error::DiagramError;
use crate::inline::InlineTokenizer;
use crate::node::Node;

/// Language tag that routes a fenced block to the diagram renderer.
pub const DEFAULT_DIAGRAM_LANG: &str = "scratch";

/// Capability that draws a diagram from its source text.
///
/// Implemented for closures, which keeps test doubles short:
///
/// ```rust
/// use docmark_core::node::Node;
/// use docmark_core::render::Renderer;
/// use docmark_core::DiagramError;
///
/// let renderer = Renderer::new(|code: &str| -> Result<Node, DiagramError> {
///     Ok(Node::Raw { markup: format!("<svg>{}</svg>", code.len()) })
/// });
/// # let _ = renderer;
/// ```
pub trait DiagramRenderer {
    fn render(&self, source: &str) -> Result<Node, DiagramError>;
}

impl<F> DiagramRenderer for F
where
    F: Fn(&str) -> Result<Node, DiagramError>,
{
    fn render(&self, source: &str) -> Result<Node, DiagramError> {
        self(source)
    }
}

/// Diagram renderer for embedders without a diagram backend.
///
/// Every diagram renders as an error node.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDiagrams;

impl DiagramRenderer for NoDiagrams {
    fn render(&self, _source: &str) -> Result<Node, DiagramError> {
        Err(DiagramError::Unavailable)
    }
}

/// Renders block tokens into a node tree.
#[derive(Debug, Clone)]
pub struct Renderer<D> {
    diagrams: D,
    diagram_lang: Cow<'static, str>,
    inline: InlineTokenizer,
}

impl<D: DiagramRenderer> Renderer<D> {
    pub fn new(diagrams: D) -> Self {
        Self {
            diagrams,
            diagram_lang: Cow::Borrowed(DEFAULT_DIAGRAM_LANG),
            inline: InlineTokenizer::new(),
        }
    }

    /// Route fenced code tagged `lang` to the diagram renderer instead of `scratch`.
    pub fn with_diagram_lang(mut self, lang: impl Into<String>) -> Self {
        self.diagram_lang = Cow::Owned(lang.into());
        self
    }

    /// Use a custom inline tokenizer (e.g. a tighter depth limit).
    pub fn with_inline_tokenizer(mut self, inline: InlineTokenizer) -> Self {
        self.inline = inline;
        self
    }

    pub fn diagram_lang(&self) -> &str {
        &self.diagram_lang
    }

    /// Render a full block sequence under a [`Node::Document`] root.
    pub fn render(&self, blocks: &[Block<'_>]) -> Node {
        let children: Vec<Node> = blocks.iter().map(|block| self.render_block(block)).collect();
        debug!(blocks = blocks.len(), "rendered document");
        Node::Document { children }
    }

    pub fn render_block(&self, block: &Block<'_>) -> Node {
        match block {
            Block::Heading(heading) => Node::Heading {
                level: heading.level.clamp(1, 5),
                children: self.render_text(&heading.text),
            },
            Block::Paragraph(paragraph) => Node::Paragraph {
                children: self.render_text(&paragraph.text),
            },
            Block::UnorderedList(list) => Node::List {
                items: list
                    .items
                    .iter()
                    .map(|item| Node::ListItem {
                        children: self.render_text(item),
                    })
                    .collect(),
            },
            Block::FencedCode(code) if code.is_lang(&self.diagram_lang) => {
                self.render_diagram(code)
            }
            Block::FencedCode(code) => Node::Preformatted {
                lang: code.lang.as_deref().map(str::to_owned),
                code: code.code.to_string(),
            },
            Block::Image(image) => Node::Figure {
                src: image.src.to_string(),
                alt: image.alt.to_string(),
                caption: image.alt.to_string(),
            },
            Block::Callout(callout) => Node::Note {
                kind: callout.kind,
                text: callout.text.to_string(),
            },
            Block::FrontMatterNote(_) => Node::HiddenNotice,
        }
    }

    fn render_text(&self, text: &str) -> Vec<Node> {
        render_inlines(&self.inline.tokenize(text))
    }

    fn render_diagram(&self, code: &FencedCode<'_>) -> Node {
        match self.diagrams.render(&code.code) {
            Ok(rendered) => Node::Diagram {
                source: code.code.to_string(),
                rendered: Box::new(rendered),
            },
            Err(err) => {
                warn!(error = %err, lang = %self.diagram_lang, "diagram failed to render");
                Node::Error {
                    message: format!("Error rendering diagram: {err}"),
                }
            }
        }
    }
}

impl Default for Renderer<NoDiagrams> {
    fn default() -> Self {
        Self::new(NoDiagrams)
    }
}

/// Convert inline tokens into nodes.
pub fn render_inlines(tokens: &[Inline<'_>]) -> Vec<Node> {
    tokens.iter().map(render_inline).collect()
}

fn render_inline(token: &Inline<'_>) -> Node {
    match token {
        Inline::Text(text) => Node::Text {
            value: text.value.to_string(),
        },
        Inline::Emphasis(emphasis) => Node::Emphasis {
            children: render_inlines(&emphasis.children),
        },
        Inline::Strong(strong) => Node::Strong {
            children: render_inlines(&strong.children),
        },
        Inline::Code(code) => Node::Code {
            value: code.value.to_string(),
        },
        Inline::Link(link) => Node::Anchor {
            href: link.href.to_string(),
            children: render_inlines(&link.children),
        },
    }
}
