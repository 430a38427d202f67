#![allow(clippy::unwrap_used)]
//! Benchmarks for state transitions and auto-hide timer rearming

#![allow(missing_docs)]

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::{Duration, Instant};
use volume_overlay::session::AutoHideTimer;
use volume_overlay::store::{OverlayStore, SessionState, Transition, VolumeChannel};

fn bench_transition_apply(c: &mut Criterion) {
    let state = SessionState::new("speaker");

    c.bench_function("transition_show_hide", |b| {
        b.iter(|| {
            let shown = Transition::ShowRequested.apply(black_box(&state)).unwrap();
            let hidden = Transition::HideRequested.apply(&shown).unwrap();
            black_box(Transition::HideCompleted.apply(&hidden).unwrap());
        });
    });
}

fn bench_store_dispatch_with_observers(c: &mut Criterion) {
    let mut store = OverlayStore::new(SessionState::new("speaker"));
    let observers: Vec<_> = (0..4).map(|_| store.subscribe()).collect();
    let mut level = 0u8;

    c.bench_function("store_dispatch_volume_adjusted", |b| {
        b.iter(|| {
            level = (level + 1) % 101;
            store
                .dispatch(black_box(Transition::VolumeAdjusted {
                    channel: VolumeChannel::Media,
                    level,
                }))
                .unwrap();
            for observer in &observers {
                black_box(observer.try_iter().count());
            }
        });
    });
}

fn bench_timer_rearm(c: &mut Criterion) {
    let mut timer = AutoHideTimer::new(Duration::from_millis(5000));
    let start = Instant::now();

    c.bench_function("timer_rearm_and_poll", |b| {
        b.iter(|| {
            timer.arm(black_box(start));
            black_box(timer.poll(start + Duration::from_millis(100)));
        });
    });
}

criterion_group!(
    benches,
    bench_transition_apply,
    bench_store_dispatch_with_observers,
    bench_timer_rearm
);
criterion_main!(benches);
