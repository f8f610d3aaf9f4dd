//! # Care Benchmarks
//!
//! Run with: `cargo bench -p pokecare-core`

use criterion::{Criterion, criterion_group, criterion_main};
use pokecare_core::{CareService, CreatureId, CueLog, MemoryStore, RosterStore, TaskBoard};
use std::hint::black_box;

fn service() -> CareService<MemoryStore, TaskBoard, CueLog> {
    CareService::new(
        RosterStore::new(MemoryStore::new()),
        TaskBoard::new(),
        CueLog::new(),
    )
}

fn bench_feed(c: &mut Criterion) {
    let id = CreatureId::new("p1");
    c.bench_function("feed", |b| {
        let mut service = service();
        b.iter(|| {
            service.feed(black_box(&id), "eat.mp3");
            service.cues_mut().take();
        });
    });
}

fn bench_full_line(c: &mut Criterion) {
    let id = CreatureId::new("p1");
    c.bench_function("feed_and_check_to_final_form", |b| {
        b.iter(|| {
            let mut service = service();
            for _ in 0..60 {
                service.feed(&id, "eat.mp3");
                black_box(service.check_and_update(&id));
            }
        });
    });
}

criterion_group!(benches, bench_feed, bench_full_line);
criterion_main!(benches);
