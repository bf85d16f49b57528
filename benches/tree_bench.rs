//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lintree::{notation, ArrayTree, EditConfig, Preference};

/// Root with `width` children cycling through a few values, each holding a leaf
fn duplicate_heavy(width: usize) -> ArrayTree<u32> {
    let children: Vec<_> = (0..width)
        .map(|i| ArrayTree::node((i % 16) as u32, [ArrayTree::leaf(i as u32)]))
        .collect();
    ArrayTree::node(u32::MAX, children)
}

fn benchmark_make_distinct(c: &mut Criterion) {
    let mut group = c.benchmark_group("make_distinct");
    for width in [64, 512, 4096] {
        let tree = duplicate_heavy(width);
        group.bench_with_input(BenchmarkId::from_parameter(width), &tree, |b, tree| {
            b.iter(|| black_box(tree.make_distinct(Preference::Leftmost)));
        });
    }
    group.finish();
}

fn benchmark_insert_branch(c: &mut Criterion) {
    let mut tree = ArrayTree::leaf(0u32);
    for i in 0..256u32 {
        tree = tree.insert_branch(&[0, i % 8, i], EditConfig::distinct());
    }

    c.bench_function("insert_branch_shared_prefix", |b| {
        b.iter(|| black_box(tree.insert_branch(&[0, 3, 1000, 1001], EditConfig::distinct())));
    });
}

fn benchmark_notation(c: &mut Criterion) {
    let depth = 1_000;
    let text = format!("{}x{}", "n(a,".repeat(depth), ")".repeat(depth));

    c.bench_function("parse_chain", |b| {
        b.iter(|| black_box(notation::parse(black_box(&text))));
    });

    let tree = notation::parse(&text).expect("valid notation");
    c.bench_function("render_chain", |b| {
        b.iter(|| black_box(tree.to_string()));
    });
}

criterion_group!(
    benches,
    benchmark_make_distinct,
    benchmark_insert_branch,
    benchmark_notation
);
criterion_main!(benches);
