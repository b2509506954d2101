use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pagecraft_evaluator::{SourceNode, Transformer};

fn card(key: u64) -> SourceNode {
    SourceNode::branch(
        "div",
        key,
        vec![
            SourceNode::leaf("img", key + 1),
            SourceNode::branch(
                "div",
                key + 2,
                vec![SourceNode::leaf("h2", key + 3), SourceNode::leaf("p", key + 4)],
            ),
            SourceNode::leaf("button", key + 5),
        ],
    )
}

fn nested(depth: u64, key: u64) -> SourceNode {
    if depth == 0 {
        return SourceNode::leaf("span", key);
    }
    SourceNode::branch("div", key, vec![nested(depth - 1, key + 1)])
}

fn transform_many_siblings(c: &mut Criterion) {
    let forest: Vec<SourceNode> = (0..100).map(|i| card(i * 10)).collect();

    c.bench_function("transform_100_identical_cards", |b| {
        b.iter(|| {
            let mut transformer = Transformer::new();
            transformer.transform(black_box(&forest))
        })
    });
}

fn transform_warm_cache(c: &mut Criterion) {
    let forest: Vec<SourceNode> = (0..100).map(|i| card(i * 10)).collect();
    let mut transformer = Transformer::new();
    transformer.transform(&forest);

    c.bench_function("transform_100_cards_warm", |b| {
        b.iter(|| transformer.transform(black_box(&forest)))
    });
}

fn transform_deeply_nested(c: &mut Criterion) {
    let forest = vec![nested(50, 0)];

    c.bench_function("transform_depth_50", |b| {
        b.iter(|| {
            let mut transformer = Transformer::new();
            transformer.transform(black_box(&forest))
        })
    });
}

criterion_group!(
    benches,
    transform_many_siblings,
    transform_warm_cache,
    transform_deeply_nested
);
criterion_main!(benches);
