// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `stream-demo churn` command: allocation workload + statistics report.
//!
//! Cycles boxes through every size class plus an oversize block, then
//! prints the pool's statistics either as the summary line or as JSON.

use chunk_pool::{Pool, PoolBox};

pub fn execute(pool: &Pool, iterations: u32, json: bool) -> anyhow::Result<()> {
    tracing::info!("churn: {iterations} iterations");

    for _ in 0..iterations {
        // One block per size class; dropped at the end of the iteration,
        // so the next round comes straight off the free lists.
        let tiny = PoolBox::new(pool, [0u8; 16]);
        let small = PoolBox::new(pool, [0u8; 48]);
        let medium = PoolBox::new(pool, [0u8; 120]);
        let large = PoolBox::new(pool, [0u8; 240]);
        // Past the largest class: routed around the pool.
        let oversize = PoolBox::new(pool, [0u8; 400]);
        std::hint::black_box((&tiny, &small, &medium, &large, &oversize));
    }

    let stats = pool.stats();
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{}", stats.summary());
    }
    Ok(())
}
