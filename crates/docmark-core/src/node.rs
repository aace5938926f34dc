//! Renderable node tree.
//!
//! [`Node`] is what the document renderer hands to an embedder. It owns its
//! text, so a rendered tree outlives the document it came from. Two surfaces
//! ship with the crate: [`Node::to_html`] and [`Node::text_content`]; anything
//! else (terminal output, a UI toolkit) walks the tree itself.

use std::fmt::Write;

use crate::ast::CalloutKind;

/// Label shown by [`Node::HiddenNotice`].
pub const HIDDEN_NOTICE: &str = "Hidden Page";

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum Node {
    /// Root of a rendered document.
    Document { children: Vec<Node> },
    Heading { level: u8, children: Vec<Node> },
    Paragraph { children: Vec<Node> },
    /// Bulleted list; every entry is a [`Node::ListItem`].
    List { items: Vec<Node> },
    ListItem { children: Vec<Node> },
    /// Code shown verbatim.
    Preformatted {
        lang: Option<String>,
        code: String,
    },
    /// Output of the diagram renderer, embedded as-is.
    Diagram { source: String, rendered: Box<Node> },
    /// Image with a caption derived from its alt text.
    Figure {
        src: String,
        alt: String,
        caption: String,
    },
    /// Callout box; the text is not inline-parsed.
    Note { kind: CalloutKind, text: String },
    /// Marker for pages whose front matter hides them.
    HiddenNotice,
    Text { value: String },
    Emphasis { children: Vec<Node> },
    Strong { children: Vec<Node> },
    Code { value: String },
    Anchor { href: String, children: Vec<Node> },
    /// Markup produced by a collaborator, emitted without escaping.
    Raw { markup: String },
    /// Visible stand-in for something that failed to render.
    Error { message: String },
}

impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text {
            value: value.into(),
        }
    }

    /// Direct children, for the variants that have them.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Document { children }
            | Node::Heading { children, .. }
            | Node::Paragraph { children }
            | Node::ListItem { children }
            | Node::Emphasis { children }
            | Node::Strong { children }
            | Node::Anchor { children, .. } => children,
            Node::List { items } => items,
            Node::Diagram { rendered, .. } => std::slice::from_ref(rendered),
            Node::Preformatted { .. }
            | Node::Figure { .. }
            | Node::Note { .. }
            | Node::HiddenNotice
            | Node::Text { .. }
            | Node::Code { .. }
            | Node::Raw { .. }
            | Node::Error { .. } => &[],
        }
    }

    /// Concatenated literal content of the tree, without any markup.
    ///
    /// Diagrams contribute their source rather than their rendering, and
    /// figures contribute their caption.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text { value } | Node::Code { value } => out.push_str(value),
            Node::Preformatted { code, .. } => out.push_str(code),
            Node::Diagram { source, .. } => out.push_str(source),
            Node::Figure { caption, .. } => out.push_str(caption),
            Node::Note { text, .. } => out.push_str(text),
            Node::HiddenNotice | Node::Raw { .. } | Node::Error { .. } => {}
            _ => {
                for child in self.children() {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Render the tree as an HTML fragment.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    pub fn write_html(&self, out: &mut String) {
        match self {
            Node::Document { children } => write_children(out, children),
            Node::Heading { level, children } => {
                let _ = write!(out, "<h{level}>");
                write_children(out, children);
                let _ = writeln!(out, "</h{level}>");
            }
            Node::Paragraph { children } => {
                out.push_str("<p>");
                write_children(out, children);
                out.push_str("</p>\n");
            }
            Node::List { items } => {
                out.push_str("<ul>\n");
                write_children(out, items);
                out.push_str("</ul>\n");
            }
            Node::ListItem { children } => {
                out.push_str("<li>");
                write_children(out, children);
                out.push_str("</li>\n");
            }
            Node::Preformatted { lang, code } => {
                match lang {
                    Some(lang) => {
                        out.push_str("<pre><code class=\"language-");
                        html_escape::encode_double_quoted_attribute_to_string(lang, out);
                        out.push_str("\">");
                    }
                    None => out.push_str("<pre><code>"),
                }
                html_escape::encode_text_to_string(code, out);
                out.push_str("</code></pre>\n");
            }
            Node::Diagram { rendered, .. } => {
                out.push_str("<div class=\"diagram\">");
                rendered.write_html(out);
                out.push_str("</div>\n");
            }
            Node::Figure { src, alt, caption } => {
                out.push_str("<figure><img src=\"");
                html_escape::encode_double_quoted_attribute_to_string(src, out);
                out.push_str("\" alt=\"");
                html_escape::encode_double_quoted_attribute_to_string(alt, out);
                out.push_str("\"><figcaption>");
                html_escape::encode_text_to_string(caption, out);
                out.push_str("</figcaption></figure>\n");
            }
            Node::Note { kind, text } => {
                let _ = write!(out, "<aside class=\"callout callout-{kind}\">");
                html_escape::encode_text_to_string(text, out);
                out.push_str("</aside>\n");
            }
            Node::HiddenNotice => {
                let _ = writeln!(out, "<div class=\"hidden-page\">{HIDDEN_NOTICE}</div>");
            }
            Node::Text { value } => {
                html_escape::encode_text_to_string(value, out);
            }
            Node::Emphasis { children } => {
                out.push_str("<em>");
                write_children(out, children);
                out.push_str("</em>");
            }
            Node::Strong { children } => {
                out.push_str("<strong>");
                write_children(out, children);
                out.push_str("</strong>");
            }
            Node::Code { value } => {
                out.push_str("<code>");
                html_escape::encode_text_to_string(value, out);
                out.push_str("</code>");
            }
            Node::Anchor { href, children } => {
                out.push_str("<a href=\"");
                html_escape::encode_double_quoted_attribute_to_string(href, out);
                out.push_str("\">");
                write_children(out, children);
                out.push_str("</a>");
            }
            Node::Raw { markup } => out.push_str(markup),
            Node::Error { message } => {
                out.push_str("<span class=\"render-error\">");
                html_escape::encode_text_to_string(message, out);
                out.push_str("</span>");
            }
        }
    }
}

fn write_children(out: &mut String, children: &[Node]) {
    for child in children {
        child.write_html(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn html_escapes_text_and_attributes() {
        let node = Node::Paragraph {
            children: vec![
                Node::text("a < b & "),
                Node::Anchor {
                    href: "/x?a=1&b=\"2\"".to_string(),
                    children: vec![Node::text("link")],
                },
            ],
        };
        assert_eq!(
            node.to_html(),
            "<p>a &lt; b &amp; <a href=\"/x?a=1&amp;b=&quot;2&quot;\">link</a></p>\n"
        );
    }

    #[test]
    fn raw_markup_is_not_escaped() {
        let node = Node::Raw {
            markup: "<svg></svg>".to_string(),
        };
        assert_eq!(node.to_html(), "<svg></svg>");
    }

    #[test]
    fn text_content_skips_markup_and_notices() {
        let node = Node::Document {
            children: vec![
                Node::HiddenNotice,
                Node::Heading {
                    level: 2,
                    children: vec![Node::text("Title")],
                },
                Node::Paragraph {
                    children: vec![
                        Node::Strong {
                            children: vec![Node::text("bold")],
                        },
                        Node::Code {
                            value: "x".to_string(),
                        },
                    ],
                },
            ],
        };
        assert_eq!(node.text_content(), "Titleboldx");
    }

    #[test]
    fn note_class_uses_kind() {
        let node = Node::Note {
            kind: CalloutKind::Warning,
            text: "careful".to_string(),
        };
        assert_eq!(
            node.to_html(),
            "<aside class=\"callout callout-warning\">careful</aside>\n"
        );
    }
}
