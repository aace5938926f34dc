//! Integration tests for the inline tokenizer

use docmark_core::ast::Inline;
use docmark_core::tokenize_inline;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn text(value: &str) -> Inline<'_> {
    Inline::text(value)
}

// ============================================================================
// Emphasis and Strong
// ============================================================================

#[test]
fn test_emphasis_and_strong_in_sentence() {
    assert_eq!(
        tokenize_inline("Some *em* and **bold** text."),
        vec![
            text("Some "),
            Inline::emphasis(vec![text("em")]),
            text(" and "),
            Inline::strong(vec![text("bold")]),
            text(" text."),
        ]
    );
}

#[rstest]
#[case("_under_")]
#[case("*star*")]
fn test_single_markers(#[case] input: &str) {
    assert_eq!(
        tokenize_inline(input),
        vec![Inline::emphasis(vec![text(&input[1..input.len() - 1])])]
    );
}

#[rstest]
#[case("__under__")]
#[case("**star**")]
fn test_double_markers(#[case] input: &str) {
    assert_eq!(
        tokenize_inline(input),
        vec![Inline::strong(vec![text(&input[2..input.len() - 2])])]
    );
}

#[test]
fn test_strong_contains_emphasis() {
    assert_eq!(
        tokenize_inline("**very _nice_ work**"),
        vec![Inline::strong(vec![
            text("very "),
            Inline::emphasis(vec![text("nice")]),
            text(" work"),
        ])]
    );
}

#[test]
fn test_markers_do_not_mix() {
    // `*` and `_` never close each other
    assert_eq!(tokenize_inline("*a_"), vec![text("*a_")]);
    assert_eq!(tokenize_inline("**a__"), vec![text("**a__")]);
}

#[test]
fn test_empty_strong() {
    assert_eq!(tokenize_inline("****"), vec![Inline::strong(vec![])]);
}

#[test]
fn test_emphasis_closes_on_nearest_marker() {
    // the closer may be the first half of a doubled marker
    assert_eq!(
        tokenize_inline("*a**"),
        vec![Inline::emphasis(vec![text("a")]), text("*")]
    );
}

#[test]
fn test_strong_closes_on_nearest_pair() {
    assert_eq!(
        tokenize_inline("**a **b** c**"),
        vec![
            Inline::strong(vec![text("a ")]),
            text("b"),
            Inline::strong(vec![text(" c")]),
        ]
    );
}

#[test]
fn test_snake_case_words() {
    assert_eq!(
        tokenize_inline("use snake_case_names here"),
        vec![
            text("use snake"),
            Inline::emphasis(vec![text("case")]),
            text("names here"),
        ]
    );
}

// ============================================================================
// Inline Code
// ============================================================================

#[test]
fn test_code_span() {
    assert_eq!(
        tokenize_inline("run `cargo test` now"),
        vec![text("run "), Inline::code("cargo test"), text(" now")]
    );
}

#[test]
fn test_code_is_not_tokenized() {
    assert_eq!(
        tokenize_inline("`*not em* [x](y)`"),
        vec![Inline::code("*not em* [x](y)")]
    );
}

#[test]
fn test_unterminated_code_is_text() {
    assert_eq!(tokenize_inline("`abc"), vec![text("`abc")]);
}

#[test]
fn test_unterminated_code_swallows_rest() {
    assert_eq!(
        tokenize_inline("before ` *after*"),
        vec![text("before ` *after*")]
    );
}

#[test]
fn test_empty_code_span() {
    assert_eq!(
        tokenize_inline("a``b"),
        vec![text("a"), Inline::code(""), text("b")]
    );
}

#[test]
fn test_code_wins_over_emphasis() {
    assert_eq!(
        tokenize_inline("`*`*"),
        vec![Inline::code("*"), text("*")]
    );
}

// ============================================================================
// Links
// ============================================================================

#[test]
fn test_link() {
    assert_eq!(
        tokenize_inline("see [the docs](https://example.com/docs)."),
        vec![
            text("see "),
            Inline::link("https://example.com/docs", vec![text("the docs")]),
            text("."),
        ]
    );
}

#[test]
fn test_link_label_is_tokenized() {
    assert_eq!(
        tokenize_inline("[**bold** link](/x)"),
        vec![Inline::link(
            "/x",
            vec![Inline::strong(vec![text("bold")]), text(" link")]
        )]
    );
}

#[test]
fn test_link_href_is_verbatim() {
    assert_eq!(
        tokenize_inline("[a](*b*)"),
        vec![Inline::link("*b*", vec![text("a")])]
    );
}

#[rstest]
#[case("[no paren]")]
#[case("[gap] (x)")]
#[case("[open](never closed")]
#[case("[unclosed")]
fn test_not_a_link(#[case] input: &str) {
    assert_eq!(tokenize_inline(input), vec![text(input)]);
}

#[test]
fn test_link_uses_first_closing_bracket() {
    // `]` after `a` is not followed by `(`, so the first `[` is text
    assert_eq!(
        tokenize_inline("[a] [b](c)"),
        vec![text("[a] "), Inline::link("c", vec![text("b")])]
    );
}

#[test]
fn test_link_crosses_emphasis() {
    // the link opens first, so it owns the `*`
    assert_eq!(
        tokenize_inline("[a *b](c) d*"),
        vec![
            Inline::link("c", vec![text("a *b")]),
            text(" d*"),
        ]
    );
}

#[test]
fn test_emphasis_crosses_link() {
    assert_eq!(
        tokenize_inline("*a [b* c](d)"),
        vec![
            Inline::emphasis(vec![text("a [b")]),
            text(" c](d)"),
        ]
    );
}

// ============================================================================
// Invariants
// ============================================================================

#[test]
fn test_no_adjacent_text_tokens() {
    fn check(tokens: &[Inline<'_>]) {
        for pair in tokens.windows(2) {
            assert!(
                !matches!(pair, [Inline::Text(_), Inline::Text(_)]),
                "adjacent text tokens: {:?}",
                pair
            );
        }
        for token in tokens {
            match token {
                Inline::Emphasis(e) => check(&e.children),
                Inline::Strong(s) => check(&s.children),
                Inline::Link(l) => check(&l.children),
                Inline::Text(_) | Inline::Code(_) => {}
            }
        }
    }

    for input in [
        "a * b _ c [ d ** e __ f",
        "*x* * _y_ _ [z](w) [",
        "`ok` `open",
        "**a*b**c*",
    ] {
        check(&tokenize_inline(input));
    }
}

#[test]
fn test_tokenizing_twice_is_identical() {
    let input = "**a** _b_ `c` [d](e) *f";
    assert_eq!(tokenize_inline(input), tokenize_inline(input));
}
