use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pagecraft_compiler_html::{compile_to_markup, CompileOptions, StyleMode};
use pagecraft_tree::Node;

fn card(key: u64) -> Node {
    Node::container("div", key)
        .with_style("padding", 16)
        .with_style("backgroundColor", "white")
        .with_position(key as f64, 0.0)
        .with_children(vec![
            Node::single("img", key + 1).with_attr("src", "hero.png"),
            Node::container("h2", key + 2).with_child(Node::text("Title", key + 3)),
            Node::container("p", key + 4)
                .with_style("opacity", 0.8)
                .with_child(Node::text("Body & more", key + 5)),
        ])
}

fn page() -> Vec<Node> {
    vec![Node::container("main", 0u64).with_children((1..=100).map(|i| card(i * 10)).collect())]
}

fn compile_inline(c: &mut Criterion) {
    let nodes = page();
    let options = CompileOptions::default();

    c.bench_function("compile_100_cards_inline", |b| {
        b.iter(|| compile_to_markup(black_box(&nodes), &options))
    });
}

fn compile_classname(c: &mut Criterion) {
    let nodes = page();
    let options = CompileOptions {
        style_mode: StyleMode::Classname,
        ..Default::default()
    };

    c.bench_function("compile_100_cards_classname", |b| {
        b.iter(|| compile_to_markup(black_box(&nodes), &options))
    });
}

criterion_group!(benches, compile_inline, compile_classname);
criterion_main!(benches);
