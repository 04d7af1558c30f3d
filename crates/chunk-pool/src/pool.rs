// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The shared pool handle.
//!
//! Every component that allocates reactive objects — callables,
//! observables, subscriber lists — captures a [`Pool`]. Cloning the handle
//! is a reference-count bump; all clones reach the same
//! [`ChunkAllocator`], and the allocator's pages are released when the
//! last clone drops.
//!
//! There is deliberately no ambient global instance: the owning
//! application constructs one `Pool` and threads it to whatever needs it.
//!
//! # Thread Safety
//!
//! `Pool` is `!Send` and `!Sync` (`Rc`/`RefCell`); the whole stack is
//! single-threaded by contract.

use crate::allocator::{ChunkAllocator, DEFAULT_PAGE_SIZE};
use crate::config::PoolConfig;
use crate::error::PoolError;
use crate::provider::{BulkMemory, HeapMemory};
use crate::stats::PoolStats;
use std::cell::RefCell;
use std::ptr::NonNull;
use std::rc::Rc;

/// Cheap-to-clone handle to a shared [`ChunkAllocator`].
///
/// # Example
/// ```
/// use chunk_pool::Pool;
///
/// let pool = Pool::new();
/// let ptr = pool.allocate(48);
/// // SAFETY: `ptr` came from this pool and is freed exactly once.
/// unsafe { pool.deallocate(ptr) };
/// assert_eq!(pool.stats().total_deallocations, 1);
/// ```
#[derive(Clone)]
pub struct Pool {
    inner: Rc<RefCell<ChunkAllocator>>,
}

impl Pool {
    /// Creates a pool over the process heap with the default 4 KiB pages.
    pub fn new() -> Self {
        Self::from_allocator(ChunkAllocator::new(Box::new(HeapMemory), DEFAULT_PAGE_SIZE))
    }

    /// Creates a pool over a custom bulk memory provider.
    pub fn with_provider(provider: Box<dyn BulkMemory>) -> Self {
        Self::from_allocator(ChunkAllocator::new(provider, DEFAULT_PAGE_SIZE))
    }

    /// Creates a pool from a validated [`PoolConfig`].
    pub fn with_config(config: &PoolConfig) -> Result<Self, PoolError> {
        Self::with_provider_and_config(Box::new(HeapMemory), config)
    }

    /// Creates a pool over a custom provider from a validated config.
    pub fn with_provider_and_config(
        provider: Box<dyn BulkMemory>,
        config: &PoolConfig,
    ) -> Result<Self, PoolError> {
        let page_size = config.resolve_page_size()?;
        let mut allocator = ChunkAllocator::new(provider, page_size);
        allocator.preallocate(config.initial_pages);
        Ok(Self::from_allocator(allocator))
    }

    fn from_allocator(allocator: ChunkAllocator) -> Self {
        Self {
            inner: Rc::new(RefCell::new(allocator)),
        }
    }

    /// Allocates a block of at least `size` bytes, 8-byte aligned.
    pub fn allocate(&self, size: usize) -> NonNull<u8> {
        self.inner.borrow_mut().allocate(size)
    }

    /// Returns a block to the pool.
    ///
    /// # Safety
    ///
    /// `ptr` must have come from [`allocate`](Pool::allocate) on this pool
    /// (any clone of it) and must not have been deallocated since.
    pub unsafe fn deallocate(&self, ptr: NonNull<u8>) {
        // SAFETY: forwarded contract.
        unsafe { self.inner.borrow_mut().deallocate(ptr) };
    }

    /// Returns the configured page size in bytes.
    pub fn page_size(&self) -> usize {
        self.inner.borrow().page_size()
    }

    /// Returns a snapshot of the pool's statistics.
    pub fn stats(&self) -> PoolStats {
        self.inner.borrow().stats()
    }

    /// Whether `other` is a handle to the same underlying allocator.
    pub fn same_pool(&self, other: &Pool) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pool")
            .field("handles", &Rc::strong_count(&self.inner))
            .field("allocator", &*self.inner.borrow())
            .finish()
    }
}
