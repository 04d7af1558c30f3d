// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Observable sources: the producer side of the push protocol.
//!
//! Three variants cover the reactive entry points:
//!
//! - [`Once`] — pushes one value and completes, per subscriber.
//! - [`Repeat`] — pushes a value `count` times and completes, per
//!   subscriber.
//! - [`FromEvent`] — adapts an externally-owned event callback into the
//!   observer protocol: construction re-wires the callback to target the
//!   new source, and every later trigger fans out to the subscriber list.
//!
//! The factory functions allocate each source through the pool and return
//! it behind an exclusively-owned [`PoolBox`].
//!
//! Emission is synchronous and inline; `subscribe` on the single-shot
//! sources emits before it returns. `Once` and `Repeat` keep no
//! subscriber state and no already-fired guard: each `subscribe` replays
//! the full sequence for that subscriber alone.

use crate::callback::Callback;
use crate::observer::{ErrorCode, Observer, SharedObserver};
use crate::subscribers::SubscriberList;
use chunk_pool::{Pool, PoolBox};
use std::ptr::NonNull;

/// The producer-side contract shared by every observable source.
pub trait Observable<T: 'static> {
    /// Registers an observer. Single-shot sources emit to it immediately.
    fn subscribe(&mut self, observer: &SharedObserver<T>);
    /// Deregisters an observer; a no-op when it was never subscribed and
    /// on single-shot sources, which track nothing.
    fn unsubscribe(&mut self, observer: &SharedObserver<T>);
    /// Pushes a value to every current subscriber.
    fn next(&mut self, value: T);
    /// Pushes a domain error code to every current subscriber.
    fn error(&mut self, code: ErrorCode);
    /// Pushes completion to every current subscriber.
    fn completed(&mut self);
}

/// Emits one value, then completion, to each subscriber.
pub struct Once<T: Clone> {
    value: T,
}

impl<T: Clone> Once<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T: Clone + 'static> Observable<T> for Once<T> {
    fn subscribe(&mut self, observer: &SharedObserver<T>) {
        let mut observer = observer.borrow_mut();
        observer.next(self.value.clone());
        observer.completed();
    }

    fn unsubscribe(&mut self, _observer: &SharedObserver<T>) {}

    fn next(&mut self, _value: T) {}

    fn error(&mut self, _code: ErrorCode) {}

    fn completed(&mut self) {}
}

/// Emits a value `count` times, then completion, to each subscriber.
pub struct Repeat<T: Clone> {
    count: u32,
    value: T,
}

impl<T: Clone> Repeat<T> {
    pub fn new(count: u32, value: T) -> Self {
        Self { count, value }
    }
}

impl<T: Clone + 'static> Observable<T> for Repeat<T> {
    fn subscribe(&mut self, observer: &SharedObserver<T>) {
        let mut observer = observer.borrow_mut();
        for _ in 0..self.count {
            observer.next(self.value.clone());
        }
        observer.completed();
    }

    fn unsubscribe(&mut self, _observer: &SharedObserver<T>) {}

    fn next(&mut self, _value: T) {}

    fn error(&mut self, _code: ErrorCode) {}

    fn completed(&mut self) {}
}

/// Push adaptor from an external event callback into the observer
/// protocol.
///
/// Created through [`from_event`], which re-wires the external callback
/// so that triggering it drives this source's `next`.
pub struct FromEvent<T: 'static> {
    subscribers: SubscriberList<T>,
}

impl<T: Clone + 'static> FromEvent<T> {
    fn new(pool: &Pool) -> Self {
        Self {
            subscribers: SubscriberList::new(pool),
        }
    }

    /// Entry point the external callback is bound to.
    fn handle(&mut self, value: T) {
        self.next(value);
    }
}

impl<T: Clone + 'static> Observable<T> for FromEvent<T> {
    fn subscribe(&mut self, observer: &SharedObserver<T>) {
        self.subscribers.add(observer);
        tracing::debug!(subscribers = self.subscribers.len(), "observer subscribed");
    }

    fn unsubscribe(&mut self, observer: &SharedObserver<T>) {
        self.subscribers.remove(observer);
        tracing::debug!(subscribers = self.subscribers.len(), "observer unsubscribed");
    }

    fn next(&mut self, value: T) {
        tracing::trace!(subscribers = self.subscribers.len(), "fan-out next");
        self.subscribers.next_all(value);
    }

    fn error(&mut self, code: ErrorCode) {
        tracing::trace!(code, "fan-out error");
        self.subscribers.error_all(code);
    }

    fn completed(&mut self) {
        tracing::trace!("fan-out completed");
        self.subscribers.completed_all();
    }
}

/// Creates a source that emits `value` once, then completes, every time
/// an observer subscribes.
pub fn once<T: Clone + 'static>(pool: &Pool, value: T) -> PoolBox<dyn Observable<T>> {
    erase(PoolBox::new(pool, Once::new(value)))
}

/// Creates a source that emits `value` `count` times, then completes,
/// every time an observer subscribes. A count of zero emits completion
/// alone.
pub fn repeat<T: Clone + 'static>(pool: &Pool, count: u32, value: T) -> PoolBox<dyn Observable<T>> {
    erase(PoolBox::new(pool, Repeat::new(count, value)))
}

/// Creates a push adaptor and re-wires `handler` to drive it.
///
/// After this call, invoking `handler` pushes its argument through the
/// returned source to every subscribed observer.
///
/// # Safety
///
/// `handler` keeps a raw non-owning pointer to the returned source. The
/// caller must clear, re-bind, or drop `handler` before dropping the
/// source, and must not invoke `handler` while also holding a borrow of
/// the source.
pub unsafe fn from_event<T: Clone + 'static>(
    pool: &Pool,
    handler: &mut Callback<T>,
) -> PoolBox<dyn Observable<T>> {
    let source = PoolBox::new(pool, FromEvent::new(pool));
    let (target, pool_handle) = PoolBox::into_raw(source);
    // SAFETY: the holder targets pool memory whose address never moves;
    // the caller keeps the source alive for as long as the handler may
    // fire.
    unsafe { handler.bind(target, FromEvent::handle) };
    tracing::debug!("event source wired to external handler");
    let wide: *mut dyn Observable<T> = target.as_ptr();
    // SAFETY: reassembling the parts of `into_raw`, pointer widened only.
    unsafe { PoolBox::from_raw(pool_handle, NonNull::new_unchecked(wide)) }
}

/// Widens a concrete source box to the erased observable type.
fn erase<T, S>(concrete: PoolBox<S>) -> PoolBox<dyn Observable<T>>
where
    S: Observable<T> + 'static,
    T: 'static,
{
    let (raw, pool) = PoolBox::into_raw(concrete);
    let wide: *mut dyn Observable<T> = raw.as_ptr();
    // SAFETY: same allocation; only the pointer metadata widened.
    unsafe { PoolBox::from_raw(pool, NonNull::new_unchecked(wide)) }
}
