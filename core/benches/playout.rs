use chrono::{DateTime, TimeDelta, Utc};
use criterion::{Criterion, criterion_group, criterion_main};
use matchpairs_core::*;
use std::hint::black_box;

fn deal(c: &mut Criterion) {
    let mut group = c.benchmark_group("deal");
    for selection in [EmojiSelection::Leading, EmojiSelection::Sampled] {
        group.bench_function(format!("{:?}", selection), |b| {
            let mut seed = 0u64;
            b.iter(|| {
                seed = seed.wrapping_add(1);
                black_box(RandomDeckGenerator::new(seed).generate(selection))
            })
        });
    }
    group.finish();
}

/// Plays a whole game by always flipping the known twin of the first hidden card.
fn perfect_playout(seed: u64) -> u32 {
    let mut session = GameSession::new(GameConfig::default(), MemoryStore::new(), seed);
    let mut now = DateTime::<Utc>::from_timestamp_millis(0).unwrap();

    while !session.state().is_finished() {
        let cards = session.engine().cards();
        let Some(first) = cards.iter().find(|card| card.face.is_hidden()).copied() else {
            now += TimeDelta::milliseconds(250);
            session.advance(now);
            continue;
        };
        let twin = cards
            .iter()
            .find(|card| card.matches(&first))
            .map(|card| card.id)
            .unwrap();

        session.handle_card_click(first.id, now);
        session.handle_card_click(twin, now);
        now += TimeDelta::milliseconds(250);
        session.advance(now);
    }
    session.engine().moves()
}

fn playout(c: &mut Criterion) {
    c.bench_function("perfect_playout", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed = seed.wrapping_add(1);
            black_box(perfect_playout(seed))
        })
    });
}

criterion_group!(benches, deal, playout);
criterion_main!(benches);
