//! Error types.
//!
//! Document content never produces an error: malformed constructs degrade to
//! text or verbatim capture inside the tokenizers. The only failure the core
//! knows about comes from the diagram renderer collaborator, and the document
//! renderer turns that into a visible [`Node::Error`](crate::node::Node::Error)
//! instead of propagating it.

use thiserror::Error;

/// Failure reported by a [`DiagramRenderer`](crate::render::DiagramRenderer).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagramError {
    /// The fenced block had no content to draw.
    #[error("diagram source is empty")]
    EmptySource,
    /// No diagram backend is available to this renderer.
    #[error("no diagram renderer configured")]
    Unavailable,
    /// The backend rejected or failed on the source.
    #[error("{0}")]
    Failed(String),
}

impl DiagramError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}
