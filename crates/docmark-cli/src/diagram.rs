//! Diagram renderer for static HTML output.
//!
//! Block scripts are not drawn here: the source is emitted, escaped, in a
//! `<pre class="blocks">` element for the scratchblocks script to pick up in
//! the browser.

use docmark_core::node::Node;
use docmark_core::{DiagramError, DiagramRenderer};

/// Passes diagram source through to client-side rendering.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ScratchSource;

impl DiagramRenderer for ScratchSource {
    fn render(&self, source: &str) -> Result<Node, DiagramError> {
        if source.trim().is_empty() {
            return Err(DiagramError::EmptySource);
        }

        let mut markup = String::with_capacity(source.len() + 32);
        markup.push_str("<pre class=\"blocks\">");
        html_escape::encode_text_to_string(source, &mut markup);
        markup.push_str("</pre>");

        Ok(Node::Raw { markup })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docmark_core::render_document;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_source_is_escaped() {
        let node = ScratchSource.render("if <(x) > (1)> then").unwrap();
        assert_eq!(
            node,
            Node::Raw {
                markup: "<pre class=\"blocks\">if &lt;(x) &gt; (1)&gt; then</pre>".to_owned(),
            }
        );
    }

    #[test]
    fn test_empty_source_fails() {
        assert!(matches!(
            ScratchSource.render("  \n "),
            Err(DiagramError::EmptySource)
        ));
    }

    #[test]
    fn test_page_html() {
        let html = render_document("```scratch\nsay [Hi]\n```", ScratchSource).to_html();
        assert_eq!(
            html,
            "<div class=\"diagram\"><pre class=\"blocks\">say [Hi]</pre></div>\n"
        );
    }

    #[test]
    fn test_empty_block_renders_error() {
        let html = render_document("```scratch\n```", ScratchSource).to_html();
        assert!(html.contains("Error rendering diagram: diagram source is empty"));
    }
}
