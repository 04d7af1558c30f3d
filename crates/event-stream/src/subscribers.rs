// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subscriber bookkeeping shared by the multi-subscriber sources.
//!
//! A [`SubscriberList`] keeps weak back-references to shared observers in
//! a pool-backed array. Dispatch walks the list in insertion order;
//! subscribers whose observer has been dropped are skipped. Removal is a
//! pointer-identity linear scan, and removing a handle that was never
//! subscribed is a silent no-op.
//!
//! Dispatch runs observer callbacks inline. A callback that mutates the
//! list it is being dispatched from stays memory-safe, but which
//! observers see the in-flight signal is unspecified.

use crate::observer::{ErrorCode, Observer, SharedObserver};
use chunk_pool::{Pool, PoolVec};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Insertion-ordered weak subscriber collection.
pub struct SubscriberList<T: 'static> {
    observers: PoolVec<Weak<RefCell<dyn Observer<T>>>>,
}

impl<T: 'static> SubscriberList<T> {
    pub fn new(pool: &Pool) -> Self {
        Self {
            observers: PoolVec::new(pool),
        }
    }

    /// Number of registrations, including dead ones not yet removed.
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Appends a subscriber; dispatch order is insertion order.
    pub fn add(&mut self, observer: &SharedObserver<T>) {
        self.observers.push(Rc::downgrade(observer));
    }

    /// Removes a subscriber by handle identity. No-op when absent.
    pub fn remove(&mut self, observer: &SharedObserver<T>) {
        let target = Rc::downgrade(observer);
        if let Some(index) = self
            .observers
            .iter()
            .position(|entry| Weak::ptr_eq(entry, &target))
        {
            self.observers.remove_at(index);
        }
    }

    /// Pushes `value` to every live subscriber in insertion order.
    pub fn next_all(&mut self, value: T)
    where
        T: Clone,
    {
        let mut index = 0;
        while index < self.observers.len() {
            if let Some(observer) = self.observers.as_slice()[index].upgrade() {
                observer.borrow_mut().next(value.clone());
            }
            index += 1;
        }
    }

    /// Pushes an error code to every live subscriber in insertion order.
    pub fn error_all(&mut self, code: ErrorCode) {
        let mut index = 0;
        while index < self.observers.len() {
            if let Some(observer) = self.observers.as_slice()[index].upgrade() {
                observer.borrow_mut().error(code);
            }
            index += 1;
        }
    }

    /// Pushes completion to every live subscriber in insertion order.
    pub fn completed_all(&mut self) {
        let mut index = 0;
        while index < self.observers.len() {
            if let Some(observer) = self.observers.as_slice()[index].upgrade() {
                observer.borrow_mut().completed();
            }
            index += 1;
        }
    }
}

impl<T: 'static> std::fmt::Debug for SubscriberList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriberList")
            .field("len", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::shared;

    struct Nop;

    impl Observer<i32> for Nop {
        fn next(&mut self, _: i32) {}
        fn error(&mut self, _: ErrorCode) {}
        fn completed(&mut self) {}
    }

    fn nop() -> SharedObserver<i32> {
        shared(Nop)
    }

    #[test]
    fn test_dispatch_in_insertion_order() {
        let pool = Pool::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        struct Tagged {
            tag: &'static str,
            order: Rc<RefCell<Vec<&'static str>>>,
        }
        impl Observer<i32> for Tagged {
            fn next(&mut self, _: i32) {
                self.order.borrow_mut().push(self.tag);
            }
            fn error(&mut self, _: ErrorCode) {}
            fn completed(&mut self) {}
        }

        let mut list = SubscriberList::new(&pool);
        let a = shared(Tagged { tag: "a", order: Rc::clone(&order) });
        let b = shared(Tagged { tag: "b", order: Rc::clone(&order) });
        list.add(&a);
        list.add(&b);
        list.next_all(1);
        assert_eq!(*order.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn test_remove_is_identity_based() {
        let pool = Pool::new();
        let mut list = SubscriberList::new(&pool);
        let a = nop();
        let b = nop();
        list.add(&a);
        list.add(&b);
        assert_eq!(list.len(), 2);
        list.remove(&a);
        assert_eq!(list.len(), 1);
        // Removing again, or removing a stranger, changes nothing.
        list.remove(&a);
        let stranger = nop();
        list.remove(&stranger);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_dead_subscribers_skipped() {
        let pool = Pool::new();
        let mut list = SubscriberList::new(&pool);
        let a = nop();
        list.add(&a);
        drop(a);
        // No live observer; dispatch must not panic.
        list.next_all(5);
        list.error_all(-2);
        list.completed_all();
        assert_eq!(list.len(), 1);
    }
}
