// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Example: adapt a widget's click handler into an observable stream.
//!
//! A `Button` owns a plain callback it fires on every click. Wiring the
//! callback through `from_event` turns those clicks into a push stream
//! that any number of observers can watch, without the button knowing.
//!
//! ```bash
//! cargo run -p event-stream --example click_stream
//! ```

use chunk_pool::Pool;
use event_stream::{from_event, shared, Callback, ErrorCode, Observable, Observer};

/// A stand-in for a host-framework widget that fires a callback on click.
struct Button {
    on_click: Callback<i32>,
}

impl Button {
    fn new(pool: &Pool) -> Self {
        Self {
            on_click: Callback::new(pool),
        }
    }

    /// Simulates the user clicking the button with some payload id.
    fn click(&mut self, id: i32) {
        if self.on_click.is_bound() {
            self.on_click.invoke(id);
        }
    }
}

struct ClickLogger {
    name: &'static str,
}

impl Observer<i32> for ClickLogger {
    fn next(&mut self, id: i32) {
        println!("[{}] click id={id}", self.name);
    }
    fn error(&mut self, code: ErrorCode) {
        println!("[{}] error code={code}", self.name);
    }
    fn completed(&mut self) {
        println!("[{}] stream completed", self.name);
    }
}

fn main() {
    tracing_subscriber::fmt().with_env_filter("debug").init();

    let pool = Pool::new();
    let mut button = Button::new(&pool);

    // Adapt the button's callback into an observable stream.
    // SAFETY: `clicks` lives to the end of main and `button.on_click` is
    // cleared before it drops.
    let mut clicks = unsafe { from_event(&pool, &mut button.on_click) };

    let header = shared(ClickLogger { name: "header" });
    let sidebar = shared(ClickLogger { name: "sidebar" });
    clicks.subscribe(&header);
    clicks.subscribe(&sidebar);

    button.click(1);
    button.click(2);

    clicks.unsubscribe(&header);
    button.click(3); // Only the sidebar sees this one.

    clicks.completed();
    button.on_click.clear();

    println!("\npool: {}", pool.stats().summary());
}
