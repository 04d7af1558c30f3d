// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Allocation statistics for profiling and diagnostics.
//!
//! [`PoolStats`] tracks cumulative metrics about how the chunk pool is
//! being used: free-list reuse rate, page consumption, and how many
//! requests bypassed the pool entirely. These numbers are the first thing
//! to look at when tuning the page size.

/// Cumulative statistics about chunk pool usage.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct PoolStats {
    /// Total number of allocation requests.
    pub total_allocations: u64,
    /// Allocations served by popping a size-class free list.
    pub free_list_hits: u64,
    /// Allocations served by carving fresh space off a page.
    pub bump_allocations: u64,
    /// Allocations larger than the biggest size class, passed straight
    /// through to the bulk provider.
    pub oversize_allocations: u64,
    /// Total number of deallocations.
    pub total_deallocations: u64,
    /// Number of pages requested from the bulk provider.
    pub pages_allocated: u64,
    /// Blocks currently live (allocated and not yet freed).
    pub live_blocks: u64,
    /// High-water mark of live blocks.
    pub peak_live_blocks: u64,
}

impl PoolStats {
    /// Returns the fraction of pooled allocations served by a free list,
    /// in `[0.0, 1.0]`. Returns `0.0` before any pooled allocation.
    pub fn reuse_ratio(&self) -> f64 {
        let pooled = self.free_list_hits + self.bump_allocations;
        if pooled == 0 {
            return 0.0;
        }
        self.free_list_hits as f64 / pooled as f64
    }

    /// Records an allocation served from a size-class free list.
    pub(crate) fn record_free_list_hit(&mut self) {
        self.total_allocations += 1;
        self.free_list_hits += 1;
        self.record_live();
    }

    /// Records an allocation bump-carved from a page.
    pub(crate) fn record_bump(&mut self) {
        self.total_allocations += 1;
        self.bump_allocations += 1;
        self.record_live();
    }

    /// Records an allocation that bypassed the pool.
    pub(crate) fn record_oversize(&mut self) {
        self.total_allocations += 1;
        self.oversize_allocations += 1;
        self.record_live();
    }

    /// Records a deallocation (pooled or oversize).
    pub(crate) fn record_deallocation(&mut self) {
        self.total_deallocations += 1;
        self.live_blocks = self.live_blocks.saturating_sub(1);
    }

    /// Records a fresh page request.
    pub(crate) fn record_page(&mut self) {
        self.pages_allocated += 1;
    }

    fn record_live(&mut self) {
        self.live_blocks += 1;
        if self.live_blocks > self.peak_live_blocks {
            self.peak_live_blocks = self.live_blocks;
        }
    }

    /// Returns a human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "Allocations: {} total ({} free-list, {} bump, {} oversize, {:.0}% reuse), \
             {} deallocations, {} pages, {} live (peak {})",
            self.total_allocations,
            self.free_list_hits,
            self.bump_allocations,
            self.oversize_allocations,
            self.reuse_ratio() * 100.0,
            self.total_deallocations,
            self.pages_allocated,
            self.live_blocks,
            self.peak_live_blocks,
        )
    }
}
