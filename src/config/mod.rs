//! Run configuration
//!
//! Settings resolve in precedence order: CLI flags, then `PARAPI_*`
//! environment variables, then an optional TOML file, then defaults.
//! Validation happens here, before any partitioning: a zero worker count
//! is a fatal configuration error.

use crate::error::{Error, Result};
use crate::report::FormatType;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::Path;
use std::thread;

/// Default total interval count
pub const DEFAULT_INTERVALS: u64 = 1_000_000;

/// Settings read from a TOML configuration file; every field optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    pub intervals: Option<u64>,
    pub workers: Option<usize>,
    pub format: Option<FormatType>,
}

impl FileConfig {
    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}

/// Fully-resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Total number of integration intervals N
    pub intervals: u64,
    /// Number of worker threads P
    pub workers: usize,
    /// Output format for the coordinator's report
    pub format: FormatType,
}

impl RunConfig {
    /// Resolve the final configuration from CLI values, the environment,
    /// and an optional file layer.
    pub fn resolve(
        cli_intervals: Option<u64>,
        cli_workers: Option<usize>,
        cli_format: Option<FormatType>,
        file: Option<FileConfig>,
    ) -> Result<Self> {
        let file = file.unwrap_or_default();

        let intervals = cli_intervals
            .or(env_var("PARAPI_INTERVALS")?)
            .or(file.intervals)
            .unwrap_or(DEFAULT_INTERVALS);

        let workers = cli_workers
            .or(env_var("PARAPI_WORKERS")?)
            .or(file.workers)
            .unwrap_or_else(default_workers);

        if workers == 0 {
            return Err(Error::Config(
                "worker count must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            intervals,
            workers,
            format: cli_format.or(file.format).unwrap_or(FormatType::Text),
        })
    }
}

fn default_workers() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

fn env_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| Error::Config(format!("invalid value for {name}: {raw}"))),
        Err(_) => Ok(None),
    }
}
