//! Benchmarks for candidate ordering and endpoint preview.
//!
//! Ordering runs before every dispatch, so it should stay well under a
//! microsecond for realistic endpoint counts.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use notedeck::dispatch::{order_candidates, Dispatcher};
use notedeck::health::HealthTracker;
use notedeck::registry::{Endpoint, EndpointRegistry};
use std::sync::Arc;
use std::time::Duration;

fn endpoints(count: usize) -> Vec<Endpoint> {
    (0..count)
        .map(|i| Endpoint::new(format!("http://notes-{}:3002", i)))
        .collect()
}

fn bench_order_candidates(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_candidates");

    for count in [1, 3, 10, 50] {
        let list = endpoints(count);
        let active = Some(count / 2);

        group.bench_with_input(BenchmarkId::from_parameter(count), &list, |b, list| {
            b.iter(|| {
                order_candidates(black_box(list), black_box(active), |endpoint| {
                    // Every other endpoint unhealthy
                    endpoint.url().len() % 2 == 0
                })
            })
        });
    }

    group.finish();
}

fn bench_preview_endpoint(c: &mut Criterion) {
    let list = endpoints(3);
    let tracker = Arc::new(HealthTracker::new());
    tracker.mark_unhealthy(&list[0]);
    tracker.mark_healthy(&list[1]);

    let dispatcher = Dispatcher::new(
        Arc::new(EndpointRegistry::new(list, Duration::from_secs(5), 1)),
        tracker,
    );

    c.bench_function("preview_endpoint_3", |b| {
        b.iter(|| black_box(dispatcher.preview_endpoint()))
    });
}

criterion_group!(benches, bench_order_candidates, bench_preview_endpoint);
criterion_main!(benches);
