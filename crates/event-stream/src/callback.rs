// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Type-erased callables over pooled holders.
//!
//! A [`Callback`] stores either a plain callable (free function or
//! closure, owned by value) or a bound method (raw target pointer plus a
//! method pointer) behind one holder trait. The holder is allocated
//! through the pool and sized exactly to the concrete closure; invocation
//! costs a single indirect call.
//!
//! Callbacks are move-only. A default-constructed or cleared callback has
//! no holder; invoking it is a contract violation and aborts.
//!
//! # Example
//! ```
//! use chunk_pool::Pool;
//! use event_stream::Callback;
//!
//! let pool = Pool::new();
//! let mut doubled = 0;
//! let mut cb: Callback<i32> = Callback::function(&pool, move |v| {
//!     doubled = v * 2;
//! });
//! cb.invoke(21);
//! ```

use chunk_pool::{Pool, PoolBox};
use std::ptr::NonNull;

use crate::observer::ErrorCode;

/// The single capability every holder exposes.
pub(crate) trait CallHolder<A, R> {
    fn invoke(&mut self, args: A) -> R;
}

/// Holder for a free function or closure, owned by value.
struct FnHolder<F> {
    f: F,
}

impl<F, A, R> CallHolder<A, R> for FnHolder<F>
where
    F: FnMut(A) -> R,
{
    fn invoke(&mut self, args: A) -> R {
        (self.f)(args)
    }
}

/// Holder for a bound method: non-owning target plus method pointer.
struct BoundHolder<S, A, R> {
    target: NonNull<S>,
    method: fn(&mut S, A) -> R,
}

impl<S, A, R> CallHolder<A, R> for BoundHolder<S, A, R> {
    fn invoke(&mut self, args: A) -> R {
        // SAFETY: the bind contract — the target outlives every
        // invocation, and nothing else touches it during the call.
        unsafe { (self.method)(self.target.as_mut(), args) }
    }
}

/// A movable, type-erased callable taking `A` and returning `R`.
pub struct Callback<A: 'static, R: 'static = ()> {
    holder: Option<PoolBox<dyn CallHolder<A, R>>>,
    pool: Pool,
}

impl<A: 'static, R: 'static> Callback<A, R> {
    /// Creates an unbound callback that will allocate from `pool` once a
    /// target is installed.
    pub fn new(pool: &Pool) -> Self {
        Self {
            holder: None,
            pool: pool.clone(),
        }
    }

    /// Creates a callback over a free function or closure.
    pub fn function<F>(pool: &Pool, f: F) -> Self
    where
        F: FnMut(A) -> R + 'static,
    {
        let mut callback = Self::new(pool);
        callback.set_function(f);
        callback
    }

    /// Creates a callback bound to a method on `target`.
    ///
    /// # Safety
    ///
    /// See [`bind`](Callback::bind).
    pub unsafe fn bound<S: 'static>(
        pool: &Pool,
        target: NonNull<S>,
        method: fn(&mut S, A) -> R,
    ) -> Self {
        let mut callback = Self::new(pool);
        // SAFETY: forwarded contract.
        unsafe { callback.bind(target, method) };
        callback
    }

    /// Replaces the current holder with a free function or closure. The
    /// previous holder, if any, is destroyed first, so a same-sized
    /// replacement recycles its block.
    pub fn set_function<F>(&mut self, f: F)
    where
        F: FnMut(A) -> R + 'static,
    {
        self.holder = None;
        self.holder = Some(erase(PoolBox::new(&self.pool, FnHolder { f })));
    }

    /// Replaces the current holder with a bound method, re-wiring the
    /// callback's target after construction. The previous holder, if any,
    /// is destroyed first.
    ///
    /// # Safety
    ///
    /// `target` is stored raw and non-owning: it must point at a live `S`
    /// whenever the callback is invoked, and the callback must be cleared,
    /// re-bound, or dropped before the target goes away. The target must
    /// not be aliased by a live reference during an invocation.
    pub unsafe fn bind<S: 'static>(&mut self, target: NonNull<S>, method: fn(&mut S, A) -> R) {
        self.holder = None;
        self.holder = Some(erase(PoolBox::new(&self.pool, BoundHolder { target, method })));
    }

    /// Destroys the current holder, leaving the callback unbound.
    pub fn clear(&mut self) {
        self.holder = None;
    }

    /// Whether a holder is installed.
    pub fn is_bound(&self) -> bool {
        self.holder.is_some()
    }

    /// Invokes the held callable.
    ///
    /// Panics if the callback is unbound — calling a callback nobody
    /// wired up is a programming error, not a runtime condition.
    pub fn invoke(&mut self, args: A) -> R {
        self.holder
            .as_mut()
            .expect("invoked an unbound callback")
            .invoke(args)
    }
}

/// Widens a concrete holder box to the erased holder type.
fn erase<A, R, H>(concrete: PoolBox<H>) -> PoolBox<dyn CallHolder<A, R>>
where
    H: CallHolder<A, R> + 'static,
    A: 'static,
    R: 'static,
{
    let (raw, pool) = PoolBox::into_raw(concrete);
    let wide: *mut dyn CallHolder<A, R> = raw.as_ptr();
    // SAFETY: same allocation; only the pointer metadata widened.
    unsafe { PoolBox::from_raw(pool, NonNull::new_unchecked(wide)) }
}

impl<A: 'static, R: 'static> std::fmt::Debug for Callback<A, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callback")
            .field("bound", &self.holder.is_some())
            .finish()
    }
}

/// A callback taking nothing and returning nothing.
pub type Action = Callback<(), ()>;
/// A callback reacting to a pushed value.
pub type ReactFn<T> = Callback<T>;
/// A callback receiving an error code.
pub type ErrorFn = Callback<ErrorCode>;
/// A callback receiving a completion signal.
pub type CompletedFn = Callback<()>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_function_callback() {
        let pool = Pool::new();
        let seen = Rc::new(Cell::new(0));
        let sink = Rc::clone(&seen);
        let mut cb: Callback<i32> = Callback::function(&pool, move |v| sink.set(v));
        cb.invoke(17);
        assert_eq!(seen.get(), 17);
    }

    #[test]
    fn test_returning_callback() {
        let pool = Pool::new();
        let mut cb: Callback<i32, i32> = Callback::function(&pool, |v| v * 3);
        assert_eq!(cb.invoke(4), 12);
    }

    #[test]
    fn test_bound_method() {
        struct Counter {
            hits: u32,
        }
        impl Counter {
            fn bump(&mut self, by: u32) {
                self.hits += by;
            }
        }

        let pool = Pool::new();
        let mut counter = Counter { hits: 0 };
        // SAFETY: `counter` outlives `cb` and is not otherwise borrowed
        // during invocation.
        let mut cb = unsafe { Callback::bound(&pool, NonNull::from(&mut counter), Counter::bump) };
        cb.invoke(2);
        cb.invoke(3);
        drop(cb);
        assert_eq!(counter.hits, 5);
    }

    #[test]
    fn test_rebind_replaces_holder() {
        struct Target {
            last: i32,
        }
        impl Target {
            fn store(&mut self, v: i32) {
                self.last = v;
            }
        }

        let pool = Pool::new();
        let seen = Rc::new(Cell::new(0));
        let sink = Rc::clone(&seen);
        let mut cb: Callback<i32> = Callback::function(&pool, move |v| sink.set(v));
        cb.invoke(1);
        assert_eq!(seen.get(), 1);

        let mut target = Target { last: 0 };
        // SAFETY: `target` outlives the callback's use below.
        unsafe { cb.bind(NonNull::from(&mut target), Target::store) };
        cb.invoke(9);
        drop(cb);
        assert_eq!(target.last, 9);
        // The closure holder was destroyed by the rebind.
        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn test_unbound_state() {
        let pool = Pool::new();
        let mut cb: Callback<i32> = Callback::function(&pool, |_| {});
        assert!(cb.is_bound());
        cb.clear();
        assert!(!cb.is_bound());
    }

    #[test]
    #[should_panic(expected = "unbound callback")]
    fn test_invoke_unbound_aborts() {
        let pool = Pool::new();
        let mut cb: Callback<i32> = Callback::new(&pool);
        cb.invoke(1);
    }

    #[test]
    fn test_holder_allocates_from_pool() {
        let pool = Pool::new();
        let before = pool.stats().total_allocations;
        let cb: Callback<i32> = Callback::function(&pool, |_| {});
        assert_eq!(pool.stats().total_allocations, before + 1);
        drop(cb);
        assert_eq!(pool.stats().live_blocks, 0);
    }

    #[test]
    fn test_captured_state_dropped_with_holder() {
        let pool = Pool::new();
        let marker = Rc::new(());
        let captured = Rc::clone(&marker);
        let cb: Callback<()> = Callback::function(&pool, move |()| {
            let _ = &captured;
        });
        assert_eq!(Rc::strong_count(&marker), 2);
        drop(cb);
        assert_eq!(Rc::strong_count(&marker), 1);
    }

    #[test]
    fn test_move_transfers_holder() {
        let pool = Pool::new();
        let mut cb: Callback<i32, i32> = Callback::function(&pool, |v| v + 1);
        let mut moved = cb;
        assert_eq!(moved.invoke(1), 2);
        // `cb` is gone at compile time; only one holder exists.
        cb = Callback::new(&pool);
        assert!(!cb.is_bound());
        assert_eq!(moved.invoke(5), 6);
    }
}
