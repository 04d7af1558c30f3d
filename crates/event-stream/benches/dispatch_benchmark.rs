// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmarks for dispatch fan-out and callback invocation.

use chunk_pool::Pool;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use event_stream::{shared, Callback, CallbackObserver, GroupObservable};

fn bench_callback_invoke(c: &mut Criterion) {
    let pool = Pool::new();
    let mut cb: Callback<i32, i32> = Callback::function(&pool, |v| v + 1);
    c.bench_function("callback_invoke", |b| {
        b.iter(|| black_box(cb.invoke(black_box(1))));
    });
}

fn bench_group_fan_out(c: &mut Criterion) {
    let pool = Pool::new();
    let mut group = GroupObservable::new(&pool);
    let mut handles = Vec::new();
    for _ in 0..16 {
        let observer = shared(CallbackObserver::new(&pool).with_next(|v: i32| {
            black_box(v);
        }));
        group.subscribe(&observer);
        handles.push(observer);
    }
    c.bench_function("group_dispatch_16", |b| {
        b.iter(|| group.dispatch(black_box(7)));
    });
}

fn bench_subscribe_unsubscribe(c: &mut Criterion) {
    let pool = Pool::new();
    let mut group = GroupObservable::new(&pool);
    let observer = shared(CallbackObserver::new(&pool).with_next(|v: i32| {
        black_box(v);
    }));
    c.bench_function("subscribe_unsubscribe", |b| {
        b.iter(|| {
            group.subscribe(&observer);
            group.unsubscribe(&observer);
        });
    });
}

criterion_group!(
    benches,
    bench_callback_invoke,
    bench_group_fan_out,
    bench_subscribe_unsubscribe
);
criterion_main!(benches);
