//! Channel-based collective operations
//!
//! A small rendezvous layer giving each worker an explicit [`Communicator`]
//! handle instead of any global communicator state. Three collectives are
//! provided: [`Communicator::barrier`], rank-ordered gathers, and a sum
//! reduction. Only the coordinator (rank 0) materializes gathered or
//! reduced values; the other ranks get `None` back and proceed to
//! shutdown.
//!
//! All ranks must call the same collectives in the same order. A collective
//! blocks its caller until every participant has arrived; there is no
//! timeout, so a rank that never arrives hangs the world. A rank that
//! drops its handle mid-collective (e.g. a panicked worker thread)
//! surfaces as a [`Error::Comm`] on the surviving side of the channel.

use crate::error::{Error, Result};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Barrier};
use tracing::trace;

/// Rank of the coordinator that materializes collective results
pub const COORDINATOR: usize = 0;

/// Scalar payload carried by one collective contribution.
///
/// Collectives are typed; a rank contributing an `F64` to a `U64` gather
/// indicates mismatched collective call sequences and is reported as a
/// communication error.
#[derive(Debug, Clone, Copy)]
enum Scalar {
    F64(f64),
    U64(u64),
}

/// One rank's contribution to a collective.
///
/// `seq` identifies which collective the contribution belongs to. Channel
/// delivery is FIFO per sender but interleaved across senders, so a fast
/// rank's contribution to collective k+1 can arrive before a slow rank's
/// contribution to collective k; the coordinator stashes early arrivals
/// until their collective starts.
#[derive(Debug)]
struct Envelope {
    seq: u64,
    rank: usize,
    payload: Scalar,
}

/// Coordinator-side receive state: the shared channel plus contributions
/// that arrived ahead of their collective.
struct Inbox {
    rx: Receiver<Envelope>,
    stash: Vec<Envelope>,
}

/// Per-rank handle to the collective world.
///
/// Created in bulk by [`CommWorld::new`], then moved into its worker
/// thread. Each handle is owned by exactly one rank for the whole run.
pub struct Communicator {
    rank: usize,
    size: usize,
    barrier: Arc<Barrier>,
    to_root: Sender<Envelope>,
    inbox: Option<Inbox>,
    seq: u64,
}

/// Factory for a set of communicator handles sharing one rendezvous.
pub struct CommWorld;

impl CommWorld {
    /// Create one [`Communicator`] per rank, ordered by rank.
    ///
    /// Fails if `size == 0`; a world needs at least the coordinator.
    pub fn new(size: usize) -> Result<Vec<Communicator>> {
        if size == 0 {
            return Err(Error::Comm(
                "communicator world needs at least one rank".to_string(),
            ));
        }

        let barrier = Arc::new(Barrier::new(size));
        let (tx, rx) = channel();
        let mut inbox = Some(Inbox {
            rx,
            stash: Vec::new(),
        });

        Ok((0..size)
            .map(|rank| Communicator {
                rank,
                size,
                barrier: Arc::clone(&barrier),
                to_root: tx.clone(),
                inbox: if rank == COORDINATOR {
                    inbox.take()
                } else {
                    None
                },
                seq: 0,
            })
            .collect())
    }
}

impl Communicator {
    /// This handle's rank in `[0, size)`
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Total number of ranks in the world
    pub fn size(&self) -> usize {
        self.size
    }

    /// True for the rank that materializes collective results
    pub fn is_coordinator(&self) -> bool {
        self.rank == COORDINATOR
    }

    /// Block until every rank in the world has reached this call.
    pub fn barrier(&self) {
        trace!(rank = self.rank, "entering barrier");
        self.barrier.wait();
    }

    /// Gather one `f64` per rank to the coordinator.
    ///
    /// Returns `Some(values)` ordered by rank on the coordinator, `None`
    /// on every other rank.
    pub fn gather_f64(&mut self, value: f64) -> Result<Option<Vec<f64>>> {
        let gathered = self.gather_scalar(Scalar::F64(value))?;
        gathered
            .map(|scalars| {
                scalars
                    .into_iter()
                    .map(|s| match s {
                        Scalar::F64(v) => Ok(v),
                        Scalar::U64(_) => Err(Self::type_mismatch()),
                    })
                    .collect()
            })
            .transpose()
    }

    /// Gather one `u64` per rank to the coordinator.
    pub fn gather_u64(&mut self, value: u64) -> Result<Option<Vec<u64>>> {
        let gathered = self.gather_scalar(Scalar::U64(value))?;
        gathered
            .map(|scalars| {
                scalars
                    .into_iter()
                    .map(|s| match s {
                        Scalar::U64(v) => Ok(v),
                        Scalar::F64(_) => Err(Self::type_mismatch()),
                    })
                    .collect()
            })
            .transpose()
    }

    /// Reduce every rank's value to a single sum on the coordinator.
    ///
    /// Gather-then-fold; the fold order is rank order, but callers must
    /// treat the result as order-unspecified within floating-point
    /// associativity tolerance.
    pub fn reduce_sum(&mut self, value: f64) -> Result<Option<f64>> {
        Ok(self.gather_f64(value)?.map(|values| values.iter().sum()))
    }

    fn type_mismatch() -> Error {
        Error::Comm("datatype mismatch between ranks in a collective".to_string())
    }

    /// Shared gather plumbing: non-coordinator ranks send one envelope,
    /// the coordinator collects `size` contributions for the current
    /// sequence number.
    fn gather_scalar(&mut self, payload: Scalar) -> Result<Option<Vec<Scalar>>> {
        let seq = self.seq;
        self.seq += 1;
        trace!(rank = self.rank, seq, "entering gather");

        let Some(inbox) = self.inbox.as_mut() else {
            self.to_root
                .send(Envelope {
                    seq,
                    rank: self.rank,
                    payload,
                })
                .map_err(|_| Error::Comm("coordinator is gone".to_string()))?;
            return Ok(None);
        };

        let mut slots: Vec<Option<Scalar>> = vec![None; self.size];
        slots[self.rank] = Some(payload);
        let mut pending = self.size - 1;

        // Early arrivals stashed by a previous collective come first.
        let mut stashed = Vec::new();
        for env in inbox.stash.drain(..) {
            if env.seq == seq {
                Self::place(&mut slots, env)?;
                pending -= 1;
            } else {
                stashed.push(env);
            }
        }
        inbox.stash = stashed;

        while pending > 0 {
            let env = inbox
                .rx
                .recv()
                .map_err(|_| Error::Comm("a rank disconnected mid-collective".to_string()))?;
            if env.seq == seq {
                Self::place(&mut slots, env)?;
                pending -= 1;
            } else {
                inbox.stash.push(env);
            }
        }

        slots
            .into_iter()
            .map(|slot| {
                slot.ok_or_else(|| Error::Comm("missing contribution in gather".to_string()))
            })
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }

    fn place(slots: &mut [Option<Scalar>], env: Envelope) -> Result<()> {
        if slots[env.rank].replace(env.payload).is_some() {
            return Err(Error::Comm(format!(
                "duplicate contribution from rank {} in a collective",
                env.rank
            )));
        }
        Ok(())
    }
}
