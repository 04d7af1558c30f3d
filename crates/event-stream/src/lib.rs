// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # event-stream
//!
//! Minimal push-based observer/observable primitives built on the
//! [`chunk_pool`] allocator. Designed for high-frequency, short-lived
//! reactive objects — observer registrations, bound closures, event
//! sources — in a single-threaded host such as a UI loop.
//!
//! # Key Components
//!
//! - [`Callback`] — a type-erased callable over a pool-allocated holder:
//!   either a closure owned by value or a `(target, method)` pair. One
//!   indirect call per invocation, re-bindable after construction.
//! - [`Observer`] — the consumer contract: `next` / `error` /
//!   `completed`, always invoked inline on the emitter's stack.
//! - [`once`] / [`repeat`] / [`from_event`] — observable factories; each
//!   returns an exclusively-owned source allocated through the pool.
//! - [`GroupObservable`] — a broadcaster the owning code drives directly.
//!
//! # Data Flow
//!
//! ```text
//! external trigger ──► Callback ──► FromEvent ──┬─► Observer A
//!                       (bind)      (fan-out)   ├─► Observer B
//!                                               └─► ...
//! ```
//!
//! # Thread Safety
//!
//! None, by contract. Dispatch is synchronous and non-reentrant; nothing
//! queues, suspends, or locks.
//!
//! # Example
//! ```
//! use chunk_pool::Pool;
//! use event_stream::{once, shared, CallbackObserver, Observable};
//!
//! let pool = Pool::new();
//! let observer = shared(CallbackObserver::new(&pool).with_next(|v: i32| {
//!     assert_eq!(v, 42);
//! }));
//! once(&pool, 42).subscribe(&observer);
//! ```

mod callback;
mod group;
mod observer;
mod sources;
mod subscribers;

pub use callback::{Action, Callback, CompletedFn, ErrorFn, ReactFn};
pub use group::GroupObservable;
pub use observer::{shared, CallbackObserver, ErrorCode, Observer, SharedObserver};
pub use sources::{from_event, once, repeat, FromEvent, Observable, Once, Repeat};
pub use subscribers::SubscriberList;
