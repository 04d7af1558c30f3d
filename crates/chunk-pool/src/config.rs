// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Pool configuration loaded from TOML files or constructed
//! programmatically.
//!
//! # TOML Format
//! ```toml
//! page_size = "4K"
//! initial_pages = 2
//! ```

use crate::allocator::{MAX_CHUNK_SIZE, MIN_CHUNK_SIZE};
use crate::error::PoolError;
use std::path::Path;

/// Smallest accepted page size in bytes.
pub const MIN_PAGE_SIZE: usize = 2 * MAX_CHUNK_SIZE;

/// Configuration for a [`Pool`](crate::Pool).
///
/// The page size accepts human-readable strings: `"4K"`, `"64KB"`,
/// `"1M"`, or a plain byte count like `"8192"`. Case-insensitive.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PoolConfig {
    /// Page size (human-readable, e.g. `"4K"`).
    pub page_size: String,
    /// Number of pages to request up front.
    #[serde(default)]
    pub initial_pages: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            page_size: "4K".to_string(),
            initial_pages: 0,
        }
    }
}

impl PoolConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, PoolError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PoolError::ConfigError(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, PoolError> {
        toml::from_str(toml_str)
            .map_err(|e| PoolError::ConfigError(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, PoolError> {
        toml::to_string_pretty(self)
            .map_err(|e| PoolError::ConfigError(format!("TOML serialise error: {e}")))
    }

    /// Parses and validates the page size.
    ///
    /// Pages must hold the page header plus at least one chunk of every
    /// class, and must keep the 32-byte carving granularity.
    pub fn resolve_page_size(&self) -> Result<usize, PoolError> {
        let page_size = parse_size(&self.page_size)?;
        if page_size < MIN_PAGE_SIZE {
            return Err(PoolError::InvalidPageSize {
                page_size,
                reason: "pages must be at least twice the largest chunk size",
            });
        }
        if page_size % MIN_CHUNK_SIZE != 0 {
            return Err(PoolError::InvalidPageSize {
                page_size,
                reason: "pages must be a multiple of the 32-byte chunk granularity",
            });
        }
        Ok(page_size)
    }
}

/// Parses a human-readable byte size: `"4K"`, `"64KB"`, `"1M"`, `"8192"`.
pub fn parse_size(s: &str) -> Result<usize, PoolError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(PoolError::InvalidSize(s.to_string()));
    }

    let upper = trimmed.to_uppercase();
    let (num_str, multiplier) = if upper.ends_with("MB") {
        (&trimmed[..trimmed.len() - 2], 1024 * 1024)
    } else if upper.ends_with('M') {
        (&trimmed[..trimmed.len() - 1], 1024 * 1024)
    } else if upper.ends_with("KB") {
        (&trimmed[..trimmed.len() - 2], 1024)
    } else if upper.ends_with('K') {
        (&trimmed[..trimmed.len() - 1], 1024)
    } else if upper.ends_with('B') {
        (&trimmed[..trimmed.len() - 1], 1)
    } else {
        (trimmed, 1)
    };

    let value: usize = num_str
        .trim()
        .parse()
        .map_err(|_| PoolError::InvalidSize(s.to_string()))?;

    value
        .checked_mul(multiplier)
        .ok_or_else(|| PoolError::InvalidSize(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let c = PoolConfig::default();
        assert_eq!(c.resolve_page_size().unwrap(), 4096);
        assert_eq!(c.initial_pages, 0);
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("4K").unwrap(), 4096);
        assert_eq!(parse_size("4k").unwrap(), 4096);
        assert_eq!(parse_size("64KB").unwrap(), 65536);
        assert_eq!(parse_size("1M").unwrap(), 1024 * 1024);
        assert_eq!(parse_size("8192").unwrap(), 8192);
        assert_eq!(parse_size("  512B  ").unwrap(), 512);
    }

    #[test]
    fn test_parse_size_invalid() {
        assert!(parse_size("").is_err());
        assert!(parse_size("abc").is_err());
        assert!(parse_size("K").is_err());
    }

    #[test]
    fn test_page_too_small() {
        let c = PoolConfig {
            page_size: "256".into(),
            initial_pages: 0,
        };
        assert!(matches!(
            c.resolve_page_size(),
            Err(PoolError::InvalidPageSize { .. })
        ));
    }

    #[test]
    fn test_page_misaligned() {
        let c = PoolConfig {
            page_size: "4100".into(),
            initial_pages: 0,
        };
        assert!(matches!(
            c.resolve_page_size(),
            Err(PoolError::InvalidPageSize { .. })
        ));
    }

    #[test]
    fn test_from_toml() {
        let c = PoolConfig::from_toml("page_size = \"8K\"\ninitial_pages = 3\n").unwrap();
        assert_eq!(c.resolve_page_size().unwrap(), 8192);
        assert_eq!(c.initial_pages, 3);
    }

    #[test]
    fn test_initial_pages_defaults_to_zero() {
        let c = PoolConfig::from_toml("page_size = \"4K\"\n").unwrap();
        assert_eq!(c.initial_pages, 0);
    }

    #[test]
    fn test_toml_roundtrip() {
        let c = PoolConfig {
            page_size: "16K".into(),
            initial_pages: 1,
        };
        let toml = c.to_toml().unwrap();
        let back = PoolConfig::from_toml(&toml).unwrap();
        assert_eq!(back.page_size, c.page_size);
        assert_eq!(back.initial_pages, c.initial_pages);
    }
}
