// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for the playback session.
//!
//! Measures the performance of:
//! - Applying bursts of resource events through the inbox
//! - Seek writes during a scrub
//! - Poll ticks while playing

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use futures_util::FutureExt;
use pimo_player::video_player::{
    MediaSession, PollDriver, ResourceEvent, SimulatedHandle, SimulatedResource,
};
use std::hint::black_box;

fn playing_session() -> (MediaSession<SimulatedResource>, SimulatedHandle) {
    let resource = SimulatedResource::new();
    let handle = resource.handle();
    handle.set_next_duration(3600.0);
    let mut session = MediaSession::new(resource, PollDriver::External);
    session.load("bench.mp4");
    session.pump();
    if let Some(outcome) = session.play().now_or_never() {
        let _ = session.resolve_play(outcome);
    }
    (session, handle)
}

/// Benchmark draining a burst of buffering events.
fn bench_event_burst(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_throughput");

    group.bench_function("pump_1000_events", |b| {
        b.iter_batched(
            || {
                let (session, handle) = playing_session();
                let sink = session.event_sink();
                for i in 0..1000 {
                    let event = if i % 2 == 0 {
                        ResourceEvent::BufferingStalled
                    } else {
                        ResourceEvent::PlayableAgain
                    };
                    sink.emit(event);
                }
                (session, handle)
            },
            |(mut session, _handle)| black_box(session.pump()),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

/// Benchmark seek writes and poll ticks on a live session.
fn bench_seek_and_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_throughput");
    let (mut session, handle) = playing_session();

    group.bench_function("seek", |b| {
        let mut target = 0.0;
        b.iter(|| {
            target = (target + 7.5) % 3600.0;
            session.seek(black_box(target));
            session.drain_notifications();
        });
    });

    group.bench_function("tick", |b| {
        let mut position = 0.0;
        b.iter(|| {
            position = (position + 0.016) % 3600.0;
            handle.set_current_time(position);
            session.tick();
            session.drain_notifications();
        });
    });

    group.finish();
}

criterion_group!(benches, bench_event_burst, bench_seek_and_tick);
criterion_main!(benches);
