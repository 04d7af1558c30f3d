// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The bulk memory boundary underneath the pool.
//!
//! The allocator never calls the system allocator directly; every page and
//! every oversize block is obtained through a [`BulkMemory`] provider. The
//! default [`HeapMemory`] provider sits on `std::alloc`, but tests swap in
//! instrumented providers and embedders can route the pool onto a custom
//! heap.

use std::alloc::{self, Layout};
use std::ptr::NonNull;

/// Alignment of every block handed out by a bulk provider.
///
/// Pages and oversize blocks are carved in 32-byte units, so the backing
/// memory must be at least 32-byte aligned.
pub const BULK_ALIGN: usize = 32;

/// Coarse-grained allocate/free primitive the pool is built on.
///
/// Exhaustion policy is provider-defined; the pool has no retry path, so a
/// provider that cannot satisfy a request must abort rather than return.
pub trait BulkMemory {
    /// Allocates `size` bytes aligned to [`BULK_ALIGN`].
    ///
    /// `size` is always a multiple of 32 and never zero.
    fn raw_allocate(&self, size: usize) -> NonNull<u8>;

    /// Releases a block previously returned by [`raw_allocate`].
    ///
    /// # Safety
    ///
    /// `ptr` must have come from `raw_allocate` on this provider with the
    /// same `size`, and must not have been freed already.
    ///
    /// [`raw_allocate`]: BulkMemory::raw_allocate
    unsafe fn raw_free(&self, ptr: NonNull<u8>, size: usize);
}

/// The default provider: the process heap via `std::alloc`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeapMemory;

impl BulkMemory for HeapMemory {
    fn raw_allocate(&self, size: usize) -> NonNull<u8> {
        let layout = bulk_layout(size);
        // SAFETY: `size` is non-zero by contract, so the layout is non-zero.
        let ptr = unsafe { alloc::alloc(layout) };
        match NonNull::new(ptr) {
            Some(ptr) => ptr,
            None => alloc::handle_alloc_error(layout),
        }
    }

    unsafe fn raw_free(&self, ptr: NonNull<u8>, size: usize) {
        // SAFETY: caller guarantees `ptr`/`size` match a prior raw_allocate.
        unsafe { alloc::dealloc(ptr.as_ptr(), bulk_layout(size)) };
    }
}

fn bulk_layout(size: usize) -> Layout {
    debug_assert!(size > 0, "bulk allocations are never zero-sized");
    debug_assert_eq!(size % BULK_ALIGN, 0, "bulk sizes are 32-byte multiples");
    Layout::from_size_align(size, BULK_ALIGN).expect("bulk allocation size overflows Layout")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heap_roundtrip() {
        let heap = HeapMemory;
        let ptr = heap.raw_allocate(64);
        assert_eq!(ptr.as_ptr() as usize % BULK_ALIGN, 0);
        // SAFETY: same provider, same size, freed once.
        unsafe { heap.raw_free(ptr, 64) };
    }

    #[test]
    fn test_page_sized_block() {
        let heap = HeapMemory;
        let ptr = heap.raw_allocate(4096);
        // The block must be writable end to end.
        unsafe {
            std::ptr::write_bytes(ptr.as_ptr(), 0xAB, 4096);
            heap.raw_free(ptr, 4096);
        }
    }
}
