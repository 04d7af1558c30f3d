// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommand implementations and shared CLI plumbing.

pub mod churn;
pub mod emit;

use chunk_pool::{Pool, PoolConfig};
use std::path::Path;

/// Initialises the tracing subscriber from the `-v` count.
pub fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Builds the pool, from a TOML config file when one was given.
pub fn build_pool(config: Option<&Path>) -> anyhow::Result<Pool> {
    match config {
        Some(path) => {
            let config = PoolConfig::from_file(path)
                .map_err(|e| anyhow::anyhow!("cannot load pool config: {e}"))?;
            tracing::info!(
                "pool config: page_size={} initial_pages={}",
                config.page_size,
                config.initial_pages
            );
            Pool::with_config(&config).map_err(|e| anyhow::anyhow!("invalid pool config: {e}"))
        }
        None => Ok(Pool::new()),
    }
}
