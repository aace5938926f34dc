//! Robustness tests: adversarial input, content preservation, determinism

use docmark_core::ast::Inline;
use docmark_core::{render_document, tokenize, tokenize_inline, InlineTokenizer, NoDiagrams};
use proptest::prelude::*;

/// Literal content of an inline sequence (link hrefs included, in source
/// order) and the number of delimiter bytes the tokenizer consumed.
fn flatten(tokens: &[Inline<'_>], out: &mut String) -> usize {
    let mut consumed = 0;
    for token in tokens {
        match token {
            Inline::Text(t) => out.push_str(&t.value),
            Inline::Code(c) => {
                out.push_str(&c.value);
                consumed += 2;
            }
            Inline::Emphasis(e) => consumed += 2 + flatten(&e.children, out),
            Inline::Strong(s) => consumed += 4 + flatten(&s.children, out),
            Inline::Link(l) => {
                consumed += 4 + flatten(&l.children, out);
                out.push_str(&l.href);
            }
        }
    }
    consumed
}

fn is_subsequence(needle: &str, haystack: &str) -> bool {
    let mut rest = haystack.chars();
    needle.chars().all(|c| rest.any(|h| h == c))
}

fn non_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Text dense in markup characters.
fn markup_text() -> impl Strategy<Value = String> {
    "[a-c *_`\\[\\]()]{0,80}"
}

/// Documents dense in block-level syntax.
fn markup_document() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("---".to_string()),
            Just("hidden: true".to_string()),
            Just("```".to_string()),
            Just("```scratch".to_string()),
            Just(String::new()),
            "#{1,7} [a-z*_ ]{0,10}",
            "[-*] [a-z`\\[\\]() ]{0,10}",
            "!\\[[a-z]{0,4}\\]\\([a-z./]{0,6}\\)",
            "\\{(info|warning|tip)\\}\\([a-z ]{0,8}\\)",
            "[a-z*_`\\[\\]() ]{1,20}",
        ],
        0..25,
    )
    .prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn inline_tokens_cover_input_minus_delimiters(input in markup_text()) {
        let tokens = tokenize_inline(&input);
        let mut content = String::new();
        let consumed = flatten(&tokens, &mut content);

        prop_assert_eq!(content.len() + consumed, input.len());
        prop_assert!(is_subsequence(&content, &input));
    }

    #[test]
    fn depth_limit_preserves_content(input in markup_text(), depth in 0usize..3) {
        let tokens = InlineTokenizer::new().with_max_depth(depth).tokenize(&input);
        let mut content = String::new();
        let consumed = flatten(&tokens, &mut content);

        prop_assert_eq!(content.len() + consumed, input.len());
    }

    #[test]
    fn inline_never_panics(input in any::<String>()) {
        let _ = tokenize_inline(&input);
    }

    #[test]
    fn document_never_panics(input in any::<String>()) {
        let _ = render_document(&input, NoDiagrams).to_html();
    }

    #[test]
    fn rendered_text_keeps_source_order(input in markup_document()) {
        let tree = render_document(&input, NoDiagrams);
        let rendered = non_whitespace(&tree.text_content());
        prop_assert!(is_subsequence(&rendered, &non_whitespace(&input)));
    }

    #[test]
    fn rendering_is_deterministic(input in markup_document()) {
        prop_assert_eq!(
            render_document(&input, NoDiagrams),
            render_document(&input, NoDiagrams)
        );
    }
}

// ============================================================================
// Pathological Inputs
// ============================================================================

#[test]
fn test_long_runs_of_openers() {
    for opener in ["*", "_", "**", "__", "[", "`", "](", "[a]("] {
        let input = opener.repeat(10_000);
        let tokens = tokenize_inline(&input);
        let mut content = String::new();
        let consumed = flatten(&tokens, &mut content);
        assert_eq!(content.len() + consumed, input.len(), "opener {:?}", opener);
    }
}

#[test]
fn test_deeply_alternating_markers() {
    let mut input = String::new();
    for _ in 0..5_000 {
        input.push_str("[*_**");
    }
    input.push('x');
    for _ in 0..5_000 {
        input.push_str("**_*](y)");
    }
    let _ = tokenize_inline(&input);
}

#[test]
fn test_many_blocks() {
    let mut input = String::new();
    for i in 0..2_000 {
        input.push_str(&format!("# Heading {i}\n\n- item\n- *item*\n\n```\ncode\n\nParagraph {i}\n"));
    }
    let blocks = tokenize(&input);
    assert!(!blocks.is_empty());
}

#[test]
fn test_only_front_matter_delimiters() {
    let input = "---\n".repeat(1_001);
    let tree = render_document(&input, NoDiagrams);
    assert!(tree.children().is_empty());
}
