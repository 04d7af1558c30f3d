// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! A plain multi-subscriber broadcaster.
//!
//! [`GroupObservable`] has the same fan-out behaviour as
//! [`FromEvent`](crate::FromEvent) but no external wiring: the owning
//! code calls [`dispatch`](GroupObservable::dispatch) and friends
//! directly. It is an ordinary movable value; put it on the stack, in a
//! struct, or in a [`PoolBox`](chunk_pool::PoolBox) as the owner prefers.

use crate::observer::{ErrorCode, SharedObserver};
use crate::subscribers::SubscriberList;
use chunk_pool::Pool;

/// Broadcast group driven directly by its owner.
///
/// # Example
/// ```
/// use chunk_pool::Pool;
/// use event_stream::{shared, CallbackObserver, GroupObservable};
///
/// let pool = Pool::new();
/// let mut group = GroupObservable::new(&pool);
/// let seen = shared(CallbackObserver::new(&pool).with_next(|v: i32| {
///     assert_eq!(v, 3);
/// }));
/// group.subscribe(&seen);
/// group.dispatch(3);
/// ```
pub struct GroupObservable<T: 'static> {
    subscribers: SubscriberList<T>,
}

impl<T: Clone + 'static> GroupObservable<T> {
    pub fn new(pool: &Pool) -> Self {
        Self {
            subscribers: SubscriberList::new(pool),
        }
    }

    /// Registers an observer at the end of the dispatch order.
    pub fn subscribe(&mut self, observer: &SharedObserver<T>) {
        self.subscribers.add(observer);
    }

    /// Deregisters an observer; a no-op when it was never subscribed.
    pub fn unsubscribe(&mut self, observer: &SharedObserver<T>) {
        self.subscribers.remove(observer);
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Pushes a value to every subscriber in insertion order.
    pub fn dispatch(&mut self, value: T) {
        tracing::trace!(subscribers = self.subscribers.len(), "group dispatch");
        self.subscribers.next_all(value);
    }

    /// Pushes a domain error code to every subscriber.
    pub fn dispatch_error(&mut self, code: ErrorCode) {
        tracing::trace!(code, "group dispatch error");
        self.subscribers.error_all(code);
    }

    /// Pushes completion to every subscriber.
    pub fn completed(&mut self) {
        self.subscribers.completed_all();
    }
}

impl<T: 'static> std::fmt::Debug for GroupObservable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupObservable")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::{shared, Observer, SharedObserver};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder {
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Observer<&'static str> for Recorder {
        fn next(&mut self, value: &'static str) {
            self.log.borrow_mut().push(format!("next:{value}"));
        }
        fn error(&mut self, code: ErrorCode) {
            self.log.borrow_mut().push(format!("error:{code}"));
        }
        fn completed(&mut self) {
            self.log.borrow_mut().push("completed".into());
        }
    }

    fn recorder() -> (SharedObserver<&'static str>, Rc<RefCell<Vec<String>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        (shared(Recorder { log: Rc::clone(&log) }), log)
    }

    #[test]
    fn test_broadcast() {
        let pool = Pool::new();
        let mut group = GroupObservable::new(&pool);
        let (a, log_a) = recorder();
        let (b, log_b) = recorder();
        group.subscribe(&a);
        group.subscribe(&b);

        group.dispatch("tick");
        group.dispatch_error(4);
        group.completed();

        let expected = vec![
            "next:tick".to_string(),
            "error:4".into(),
            "completed".into(),
        ];
        assert_eq!(*log_a.borrow(), expected);
        assert_eq!(*log_b.borrow(), expected);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let pool = Pool::new();
        let mut group = GroupObservable::new(&pool);
        let (a, log_a) = recorder();
        group.subscribe(&a);
        group.dispatch("one");
        group.unsubscribe(&a);
        group.dispatch("two");
        assert_eq!(*log_a.borrow(), vec!["next:one".to_string()]);
    }

    #[test]
    fn test_group_is_movable() {
        let pool = Pool::new();
        let mut group = GroupObservable::new(&pool);
        let (a, log_a) = recorder();
        group.subscribe(&a);

        // Moving the group keeps its subscriptions intact.
        let mut moved = group;
        moved.dispatch("after-move");
        assert_eq!(*log_a.borrow(), vec!["next:after-move".to_string()]);
    }

    #[test]
    fn test_dispatch_to_empty_group() {
        let pool = Pool::new();
        let mut group: GroupObservable<&'static str> = GroupObservable::new(&pool);
        assert!(group.is_empty());
        group.dispatch("nobody");
        group.completed();
    }
}
