//! Benchmarks for block tokenizing, inline tokenizing and rendering
//!
//! Run with: cargo bench -p docmark-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use docmark_core::node::Node;
use docmark_core::{tokenize, tokenize_inline, DiagramError, Renderer};

/// A typical documentation page
const SAMPLE: &str = r#"---
title: Moving sprites
hidden: true
---

# Moving sprites

Sprites move with the **motion** blocks. Each block has a _number input_
that says how far to go, and `move (10) steps` is the one you will use most.
See [the motion guide](/guide/motion) before you start.

## Steps

- Drag a **move** block onto the scripts area
- Click it and watch the *sprite* move
- Change the number to `-10` to go backwards

```scratch
when flag clicked
repeat (10)
  move (10) steps
  turn cw (15) degrees
end
```

![The stage with the cat sprite](/img/stage.png)
{info}(Sprites can leave the stage if you move them too far)

## Code Example

```rust
fn fibonacci(n: u64) -> u64 {
    match n {
        0 => 0,
        1 => 1,
        _ => fibonacci(n - 1) + fibonacci(n - 2),
    }
}
```

{warning}(Blocks run in order, top to bottom)

End of document.
"#;

fn source_length(code: &str) -> Result<Node, DiagramError> {
    Ok(Node::Raw {
        markup: format!("<pre class=\"blocks\">{}</pre>", code.len()),
    })
}

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");
    group.throughput(Throughput::Bytes(SAMPLE.len() as u64));

    group.bench_function("blocks", |b| {
        b.iter(|| black_box(tokenize(black_box(SAMPLE)).len()))
    });

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    group.throughput(Throughput::Bytes(SAMPLE.len() as u64));

    let renderer = Renderer::new(source_length);
    let blocks = tokenize(SAMPLE);

    group.bench_function("tree", |b| {
        b.iter(|| black_box(renderer.render(black_box(&blocks))))
    });

    group.bench_function("end_to_end_html", |b| {
        b.iter(|| {
            let blocks = tokenize(black_box(SAMPLE));
            black_box(renderer.render(&blocks).to_html().len())
        })
    });

    group.finish();
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");
    let renderer = Renderer::new(source_length);

    for size in [1, 5, 10, 20].iter() {
        let content: String = SAMPLE.repeat(*size);
        group.throughput(Throughput::Bytes(content.len() as u64));

        group.bench_with_input(BenchmarkId::new("docmark", size), &content, |b, content| {
            b.iter(|| {
                let blocks = tokenize(black_box(content));
                black_box(renderer.render(&blocks))
            })
        });
    }

    group.finish();
}

fn bench_inline(c: &mut Criterion) {
    let mut group = c.benchmark_group("inline");

    let plain = "A sentence without any markup in it at all, just words and punctuation.";
    let dense = "This has *emphasis*, **strong**, `code`, [a link](https://example.com), and __more__.";
    let unclosed = "*".repeat(256) + &"[".repeat(256);

    group.bench_function("plain", |b| {
        b.iter(|| black_box(tokenize_inline(black_box(plain)).len()))
    });
    group.bench_function("dense", |b| {
        b.iter(|| black_box(tokenize_inline(black_box(dense)).len()))
    });
    group.bench_function("unclosed_markers", |b| {
        b.iter(|| black_box(tokenize_inline(black_box(&unclosed)).len()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_tokenize,
    bench_render,
    bench_scaling,
    bench_inline
);
criterion_main!(benches);
