use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use truco_engine::cards::{compare, Deck, Manilhas};
use truco_engine::core::{DealRng, TeamMap};
use truco_engine::driver::{Agent, MatchDriver, RandomAgent};
use truco_engine::rules::MatchEngine;

fn card_comparison(c: &mut Criterion) {
    let deck = Deck::standard();
    let cards = deck.cards();
    let manilhas = Manilhas::from_vira(cards[17]);

    c.bench_function("compare_all_pairs", |b| {
        b.iter(|| {
            let mut first_wins = 0u32;
            for &x in cards {
                for &y in cards {
                    if x != y && compare(x, y, &manilhas) == truco_engine::Comparison::FirstWins {
                        first_wins += 1;
                    }
                }
            }
            black_box(first_wins)
        })
    });
}

fn full_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_match");
    for seed in [1u64, 2, 3] {
        group.bench_function(BenchmarkId::new("random_agents", seed), |b| {
            b.iter(|| {
                let mut engine = MatchEngine::standard();
                let mut agent_a = RandomAgent::seeded(seed);
                let mut agent_b = RandomAgent::seeded(seed + 100);
                let report = MatchDriver::default()
                    .run(
                        &mut engine,
                        TeamMap::from_array([&mut agent_a as &mut dyn Agent, &mut agent_b]),
                        &mut DealRng::new(seed),
                    )
                    .expect("driver never rejects its own substitutes");
                black_box(report)
            })
        });
    }
    group.finish();
}

fn new_deal(c: &mut Criterion) {
    c.bench_function("new_deal", |b| {
        let mut rng = DealRng::new(7);
        b.iter(|| {
            let mut engine = MatchEngine::standard();
            black_box(engine.new_deal(&mut rng).expect("fresh engine accepts a deal"))
        })
    });
}

criterion_group!(benches, card_comparison, full_match, new_deal);
criterion_main!(benches);
