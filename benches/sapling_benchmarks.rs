use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sapling::utils::median;
use sapling::{DecisionTree, FeatureGenerator, FeatureKind, Record, Table, TreeConfig};
use std::time::Duration;

fn synthetic(n: usize, seed: u64) -> Vec<Record<u8>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let x = FeatureGenerator::new("x", FeatureKind::Continuous);
    let y = FeatureGenerator::new("y", FeatureKind::Continuous);
    let group = FeatureGenerator::new("group", FeatureKind::Discrete);
    (0..n)
        .map(|_| {
            let a: f64 = rng.gen_range(-1.0..1.0);
            let b: f64 = rng.gen_range(-1.0..1.0);
            let g: i64 = rng.gen_range(0..8);
            let target = u8::from(a * a + b * b < 0.5) + u8::from(g == 0);
            Record::labeled(vec![x.generate(a), y.generate(b), group.generate(g)], target).unwrap()
        })
        .collect()
}

pub fn tree_benchmarks(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let column: Vec<i64> = (0..100_000).map(|_| rng.gen()).collect();
    c.bench_function("median", |b| b.iter(|| median(black_box(column.clone()), 0)));

    let records = synthetic(10_000, 1);
    let table = Table::new(records.clone()).unwrap();
    c.bench_function("table_new", |b| b.iter(|| Table::new(black_box(records.clone())).unwrap()));
    c.bench_function("information_gain_continuous", |b| {
        b.iter(|| table.information_gain(black_box("x")).unwrap())
    });
    c.bench_function("information_gain_discrete", |b| {
        b.iter(|| table.information_gain(black_box("group")).unwrap())
    });

    let mut train_group = c.benchmark_group("train");
    train_group.measurement_time(Duration::from_secs(10));
    train_group.sample_size(10);
    let cfg = TreeConfig::default().set_min_node_capacity(20);
    train_group.bench_function("fit_10k", |b| {
        b.iter(|| DecisionTree::fit(black_box(records.clone()), black_box(&cfg)).unwrap())
    });
    train_group.finish();

    let tree = DecisionTree::fit(records, &cfg).unwrap();
    let queries = synthetic(10_000, 2);
    c.bench_function("predict_all_10k", |b| b.iter(|| tree.predict_all(black_box(&queries)).unwrap()));
}

criterion_group!(benches, tree_benchmarks);
criterion_main!(benches);
