use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use indexed_pq::IndexedPriorityQueue;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_weights(n: usize) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..n).map(|_| rng.gen_range(0..1_000_000)).collect()
}

fn bench_insert_and_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_then_remove_top");
    for &n in &[1_000usize, 10_000, 100_000] {
        let weights = random_weights(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &weights, |b, weights| {
            b.iter(|| {
                let mut queue = IndexedPriorityQueue::new().with_capacity(weights.len());
                for (key, &weight) in weights.iter().enumerate() {
                    queue.insert(key, weight, ()).unwrap();
                }
                while let Some(entry) = queue.remove_top() {
                    black_box(entry);
                }
            })
        });
    }
    group.finish();
}

fn bench_remove_by_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_by_key");
    for &n in &[1_000usize, 10_000, 100_000] {
        let weights = random_weights(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &weights, |b, weights| {
            b.iter(|| {
                let mut queue = IndexedPriorityQueue::from_entries(
                    weights.iter().enumerate().map(|(k, &w)| (k, w, ())),
                    indexed_pq::Order::Minimum,
                )
                .unwrap();
                // every other key, highest first
                for key in (0..weights.len()).rev().step_by(2) {
                    black_box(queue.remove_by_key(&key));
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insert_and_drain, bench_remove_by_key);
criterion_main!(benches);
