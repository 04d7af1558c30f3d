// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # chunk-pool
//!
//! A size-class pooling allocator for small, short-lived objects —
//! observer registrations, bound closures, event sources — where
//! general-purpose heap churn would dominate the cost of the work itself.
//!
//! # Key Components
//!
//! - [`ChunkAllocator`] — the allocator: eight fixed size classes (32 to
//!   256 bytes), intrusive free lists threaded through freed blocks, bump
//!   pages for cold starts, and a straight passthrough for oversize
//!   requests.
//! - [`Pool`] — the cheap-to-clone handle every dependent component
//!   captures. Replaces an ambient singleton with an explicit context.
//! - [`PoolBox`] / [`PoolVec`] — exclusive-ownership handles that route
//!   construction and destruction through the pool.
//! - [`BulkMemory`] — the coarse allocate/free boundary underneath
//!   everything; [`HeapMemory`] is the `std::alloc` default.
//! - [`PoolStats`] / [`PoolConfig`] — reuse metrics and TOML-loadable
//!   tuning.
//!
//! # Ownership Model
//!
//! ```text
//! Pool (Rc handle) ──► ChunkAllocator ──► BulkMemory provider
//!   ▲                        │
//!   │ clone                  │ pages + oversize blocks
//!   │                        ▼
//! PoolBox<T> / PoolVec<T>  carve blocks, return them on drop
//! ```
//!
//! Pages belong to the allocator for its whole lifetime and go back to
//! the provider in bulk when the last [`Pool`] handle drops.
//!
//! # Thread Safety
//!
//! None, by contract: the stack is single-threaded and `Pool` is `!Send`.
//! Cross-thread access is a design error, not a runtime condition.
//!
//! # Example
//! ```
//! use chunk_pool::{Pool, PoolBox};
//!
//! let pool = Pool::new();
//! let a = PoolBox::new(&pool, 1u32);
//! let b = PoolBox::new(&pool, 2u32);
//! assert_eq!(*a + *b, 3);
//! drop(a);
//! drop(b);
//! assert!(pool.stats().reuse_ratio() >= 0.0);
//! ```

mod allocator;
mod boxed;
mod config;
mod error;
mod pool;
mod provider;
mod stats;
mod vec;

pub use allocator::{
    round_up32, ChunkAllocator, CHUNK_ALIGN, DEFAULT_PAGE_SIZE, HEADER_SIZE, MAX_CHUNK_SIZE,
    MIN_CHUNK_SIZE, TABLE_SIZE,
};
pub use boxed::PoolBox;
pub use config::{parse_size, PoolConfig, MIN_PAGE_SIZE};
pub use error::PoolError;
pub use pool::Pool;
pub use provider::{BulkMemory, HeapMemory, BULK_ALIGN};
pub use stats::PoolStats;
pub use vec::{PoolVec, EXPAND};
