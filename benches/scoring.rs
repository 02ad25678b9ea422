use arbit::cards::{compute_card_metadata, compute_rarity, Direction, NameTables, TradeMetrics};
use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::hint::black_box;

fn benchmark_scoring(c: &mut Criterion) {
    let tables = NameTables::default();

    // Case 1: small losing short
    let small_loss = TradeMetrics::new(-10.0, 2, 500.0, Direction::Short, "ETH/USD").unwrap();

    // Case 2: everything clamped (MYTHIC)
    let mythic = TradeMetrics::new(200.0, 100, 10_000.0, Direction::Long, "BTC/USD").unwrap();

    let mut group = c.benchmark_group("card_scoring");

    group.bench_function("rarity_small_loss", |b| {
        b.iter(|| {
            black_box(compute_rarity(black_box(&small_loss)));
        })
    });

    group.bench_function("rarity_mythic", |b| {
        b.iter(|| {
            black_box(compute_rarity(black_box(&mythic)));
        })
    });

    group.bench_function("full_metadata", |b| {
        let mut rng = StdRng::seed_from_u64(7);
        b.iter(|| {
            black_box(compute_card_metadata(black_box(&mythic), &tables, &mut rng));
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_scoring);
criterion_main!(benches);
