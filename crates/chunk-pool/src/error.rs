// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for pool configuration.
//!
//! Runtime contract violations inside the allocator (double frees, foreign
//! pointers, unbound invocations) are programmer errors and abort via
//! assertions; [`PoolError`] covers only the genuinely fallible surface:
//! parsing and validating configuration.

/// Errors that can occur while configuring a pool.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    /// A human-readable size string could not be parsed.
    #[error("invalid size string '{0}': expected a number with an optional K/M suffix")]
    InvalidSize(String),

    /// The configured page size violates the allocator's layout rules.
    #[error("invalid page size {page_size}: {reason}")]
    InvalidPageSize {
        page_size: usize,
        reason: &'static str,
    },

    /// A configuration file could not be read or parsed.
    #[error("configuration error: {0}")]
    ConfigError(String),
}
