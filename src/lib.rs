//! # parapi
//!
//! Parallel midpoint-rule estimation of π. The integral of 4/(1+x²) over
//! [0,1] is split into N intervals, distributed as contiguous blocks across
//! P worker threads, and recombined with barrier/gather/reduce collectives
//! on a coordinator rank.
//!
//! ## Usage
//!
//! ```bash
//! parapi [-n intervals] [-w workers] [--format text|json|json-pretty|csv]
//! ```
//!
//! ## Modules
//!
//! - `partition` - Deterministic contiguous-block interval partitioning
//! - `integrate` - Midpoint-rule partial sums for one interval block
//! - `comm` - Channel-based barrier/gather/reduce collectives
//! - `worker` - Per-worker run loop and the thread runner
//! - `aggregate` - Coordinator-side result assembly and timing metrics
//! - `report` - Console output formatting (text, JSON, CSV)
//! - `config` - Run configuration with CLI/env/file layering
pub mod aggregate;
pub mod comm;
pub mod config;
pub mod error;
pub mod integrate;
pub mod partition;
pub mod report;
pub mod worker;
