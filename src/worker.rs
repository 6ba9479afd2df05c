//! Per-worker run loop and the thread runner
//!
//! Every rank runs the same body: partition its block, synchronize on the
//! barrier so startup skew stays out of the timed region, integrate, then
//! enter the collectives. Only the coordinator assembles a
//! [`GlobalResult`]; the other ranks return `None` and exit.

use crate::aggregate::{aggregate, GlobalResult};
use crate::comm::{CommWorld, Communicator};
use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::integrate::{interval_width, midpoint_sum};
use crate::partition::partition;
use std::thread;
use std::time::Instant;
use tracing::{debug, info};

/// Body executed by every rank.
///
/// Collective order is fixed: barrier, reduce of the local sum, then
/// gathers of local sum, elapsed time, and interval count. The total
/// elapsed span is the coordinator's clock from the post-barrier
/// timestamp to completion of the reduce.
pub fn run_worker(mut comm: Communicator, n: u64) -> Result<Option<GlobalResult>> {
    let range = partition(n, comm.size(), comm.rank());
    debug!(
        rank = comm.rank(),
        start = range.start,
        end = range.end,
        "assigned interval block"
    );
    let h = interval_width(n);

    comm.barrier();
    let started = Instant::now();
    let local_sum = midpoint_sum(range, h);
    let elapsed_secs = started.elapsed().as_secs_f64();

    let global_sum = comm.reduce_sum(local_sum)?;
    let total_elapsed_secs = started.elapsed().as_secs_f64();

    let sums = comm.gather_f64(local_sum)?;
    let times = comm.gather_f64(elapsed_secs)?;
    let counts = comm.gather_u64(range.len())?;

    match (global_sum, sums, times, counts) {
        (Some(global_sum), Some(sums), Some(times), Some(counts)) => Ok(Some(aggregate(
            n,
            global_sum,
            &sums,
            &times,
            &counts,
            total_elapsed_secs,
        ))),
        _ => Ok(None),
    }
}

/// Spawn one thread per worker, run the full pipeline, and return the
/// coordinator's result.
pub fn run(config: &RunConfig) -> Result<GlobalResult> {
    let n = config.intervals;
    info!(intervals = n, workers = config.workers, "starting integration run");

    let handles = CommWorld::new(config.workers)?
        .into_iter()
        .map(|comm| {
            let name = format!("worker-{}", comm.rank());
            thread::Builder::new()
                .name(name)
                .spawn(move || run_worker(comm, n))
                .map_err(Error::Io)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut outcome = None;
    for handle in handles {
        let joined = handle
            .join()
            .map_err(|_| Error::Worker("worker thread panicked".to_string()))?;
        if let Some(result) = joined? {
            outcome = Some(result);
        }
    }

    outcome.ok_or_else(|| Error::Worker("coordinator produced no result".to_string()))
}
