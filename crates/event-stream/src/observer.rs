// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The consumer-side contract.
//!
//! An [`Observer`] receives three signals, always synchronously on the
//! emitter's call stack: `next` for each pushed value, `error` for a
//! domain-level failure code, and `completed` when a source finishes. The
//! error channel carries upstream domain failures, not programming
//! errors; delivering one neither unsubscribes the observer nor
//! terminates the source.
//!
//! Observables hold observers weakly: subscribers are shared as
//! [`SharedObserver`] handles and the source keeps only a downgraded
//! reference, so dropping the observer is always safe.

use crate::callback::{CompletedFn, ErrorFn, ReactFn};
use chunk_pool::Pool;
use std::cell::RefCell;
use std::rc::Rc;

/// Domain-level error code pushed through the error channel.
pub type ErrorCode = i32;

/// React to values pushed by an observable.
pub trait Observer<T> {
    fn next(&mut self, value: T);
    fn error(&mut self, code: ErrorCode);
    fn completed(&mut self);
}

/// A shareable observer handle; observables store weak back-references
/// and identify subscribers by pointer.
pub type SharedObserver<T> = Rc<RefCell<dyn Observer<T>>>;

/// Wraps an observer for subscription.
pub fn shared<T, O>(observer: O) -> SharedObserver<T>
where
    O: Observer<T> + 'static,
    T: 'static,
{
    Rc::new(RefCell::new(observer))
}

/// An observer assembled from optional callbacks, one per channel.
///
/// Channels left unbound are silently skipped, so a consumer interested
/// only in values pays for nothing else.
///
/// # Example
/// ```
/// use chunk_pool::Pool;
/// use event_stream::{shared, CallbackObserver, Observer};
///
/// let pool = Pool::new();
/// let observer = CallbackObserver::new(&pool).with_next(|v: i32| {
///     println!("got {v}");
/// });
/// let _handle = shared(observer);
/// ```
pub struct CallbackObserver<T: 'static> {
    on_next: ReactFn<T>,
    on_error: ErrorFn,
    on_completed: CompletedFn,
}

impl<T: 'static> CallbackObserver<T> {
    /// Creates an observer with every channel unbound.
    pub fn new(pool: &Pool) -> Self {
        Self {
            on_next: ReactFn::new(pool),
            on_error: ErrorFn::new(pool),
            on_completed: CompletedFn::new(pool),
        }
    }

    /// Installs the value channel.
    pub fn with_next<F>(mut self, f: F) -> Self
    where
        F: FnMut(T) + 'static,
    {
        self.on_next.set_function(f);
        self
    }

    /// Installs the error channel.
    pub fn with_error<F>(mut self, f: F) -> Self
    where
        F: FnMut(ErrorCode) + 'static,
    {
        self.on_error.set_function(f);
        self
    }

    /// Installs the completion channel.
    pub fn with_completed<F>(mut self, mut f: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.on_completed.set_function(move |()| f());
        self
    }
}

impl<T: 'static> Observer<T> for CallbackObserver<T> {
    fn next(&mut self, value: T) {
        if self.on_next.is_bound() {
            self.on_next.invoke(value);
        }
    }

    fn error(&mut self, code: ErrorCode) {
        if self.on_error.is_bound() {
            self.on_error.invoke(code);
        }
    }

    fn completed(&mut self) {
        if self.on_completed.is_bound() {
            self.on_completed.invoke(());
        }
    }
}
