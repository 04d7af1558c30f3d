// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `stream-demo emit` command: wire a source to observers and fire events.
//!
//! Builds a `from_event` adaptor over a plain callback, subscribes N
//! counting observers, triggers the callback M times, and reports who
//! saw what alongside the pool's allocation statistics.

use chunk_pool::Pool;
use event_stream::{shared, Callback, CallbackObserver, Observable};
use std::cell::RefCell;
use std::rc::Rc;

pub fn execute(pool: &Pool, observers: usize, events: u32, start: i32) -> anyhow::Result<()> {
    println!("emit: {observers} observers, {events} events\n");

    let mut handler: Callback<i32> = Callback::new(pool);
    // SAFETY: `source` lives to the end of this function and the handler
    // is cleared before it drops.
    let mut source = unsafe { event_stream::from_event(pool, &mut handler) };

    // Per-observer counters, reported at the end.
    let counters: Vec<Rc<RefCell<(u64, i64)>>> = (0..observers)
        .map(|_| Rc::new(RefCell::new((0u64, 0i64))))
        .collect();

    let handles: Vec<_> = counters
        .iter()
        .map(|counter| {
            let sink = Rc::clone(counter);
            shared(CallbackObserver::new(pool).with_next(move |v: i32| {
                let mut entry = sink.borrow_mut();
                entry.0 += 1;
                entry.1 += i64::from(v);
            }))
        })
        .collect();

    for handle in &handles {
        source.subscribe(handle);
    }

    for offset in 0..events {
        handler.invoke(start + offset as i32);
    }
    source.completed();
    handler.clear();

    println!("  {:<10} {:>8} {:>10}", "Observer", "Events", "Sum");
    println!("  {}", "-".repeat(30));
    for (index, counter) in counters.iter().enumerate() {
        let (seen, sum) = *counter.borrow();
        println!("  {:<10} {:>8} {:>10}", format!("#{index}"), seen, sum);
    }

    println!("\npool: {}", pool.stats().summary());
    Ok(())
}
