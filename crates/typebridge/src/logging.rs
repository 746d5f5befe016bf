// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Logging initialization.
//!
//! The crate logs through the `log` facade. Hosts that do not install their
//! own logger can use these helpers to route records to `env_logger`. Only
//! the first successful initialization in a process takes effect.

use crate::error::{CoerceError, Result};

/// Console logging at `level`.
pub fn init_logging(level: log::LevelFilter) -> Result<()> {
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp_millis()
        .try_init()
        .map_err(|e| CoerceError::Config(format!("logger already initialized: {}", e)))
}

/// Console logging driven by `RUST_LOG`, falling back to `default_level`.
pub fn init_logging_env(default_level: log::LevelFilter) -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_level.to_string()),
    )
    .format_timestamp_millis()
    .try_init()
    .map_err(|e| CoerceError::Config(format!("logger already initialized: {}", e)))
}

/// Console logging with a filter directive such as `typebridge=debug`.
pub fn init_logging_with_filter(filter: &str) -> Result<()> {
    env_logger::Builder::new()
        .parse_filters(filter)
        .format_timestamp_millis()
        .try_init()
        .map_err(|e| CoerceError::Config(format!("logger already initialized: {}", e)))
}
