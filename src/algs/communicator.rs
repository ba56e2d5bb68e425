//! Thin façade over the execution contexts a reduction can run in.
//!
//! The collective surface is deliberately minimal: a participant count and
//! a blocking sum reduction, which is all [`crate::la::Scalar`] needs.
//! Three backends implement it:
//!
//! - [`NoComm`]: compile-time no-op for serial runs and unit tests;
//! - [`ThreadComm`]: intra-process ranks backed by threads, for multi-rank
//!   tests without an MPI launcher;
//! - `MpiComm` (feature `mpi-support`): MPI world communicator.

use std::sync::{Arc, Barrier};

use parking_lot::Mutex;

/// Blocking collective-communication interface (minimal by design).
///
/// Every participant of a communicator group must call each collective;
/// [`Communicator::all_reduce_sum`] returns only once all participants
/// have contributed.
pub trait Communicator: Send + Sync + 'static {
    /// Rank of the calling participant, in `0..size()`.
    fn rank(&self) -> usize;

    /// Number of participants.
    fn size(&self) -> usize;

    /// Collective sum of each participant's `value`; every participant
    /// receives the full sum.
    fn all_reduce_sum(&self, value: f64) -> f64;
}

/// Compile-time no-op comm for pure serial runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoComm;

impl Communicator for NoComm {
    fn rank(&self) -> usize {
        0
    }

    fn size(&self) -> usize {
        1
    }

    fn all_reduce_sum(&self, value: f64) -> f64 {
        value
    }
}

// --- ThreadComm: intra-process / multi-thread ---

#[derive(Debug)]
struct GroupState {
    slots: Mutex<Vec<f64>>,
    barrier: Barrier,
}

/// Intra-process communicator: `n` ranks sharing slot storage and a
/// reusable barrier.
///
/// Obtain the handles with [`ThreadComm::group`] and move one onto each
/// participating thread. Collectives may be issued repeatedly; the second
/// barrier inside `all_reduce_sum` keeps a fast rank from overwriting the
/// slots of an in-flight reduction.
#[derive(Clone, Debug)]
pub struct ThreadComm {
    rank: usize,
    state: Arc<GroupState>,
}

impl ThreadComm {
    /// Creates a group of `n` communicator handles, one per rank.
    ///
    /// # Panics
    ///
    /// Panics if `n == 0`.
    pub fn group(n: usize) -> Vec<ThreadComm> {
        assert!(n > 0, "communicator group must have at least one rank");
        let state = Arc::new(GroupState {
            slots: Mutex::new(vec![0.0; n]),
            barrier: Barrier::new(n),
        });
        (0..n)
            .map(|rank| ThreadComm {
                rank,
                state: Arc::clone(&state),
            })
            .collect()
    }
}

impl Communicator for ThreadComm {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.state.slots.lock().len()
    }

    fn all_reduce_sum(&self, value: f64) -> f64 {
        self.state.slots.lock()[self.rank] = value;
        self.state.barrier.wait();
        let sum = self.state.slots.lock().iter().sum();
        self.state.barrier.wait();
        sum
    }
}

// --- MPI backend (feature = "mpi-support") ---
#[cfg(feature = "mpi-support")]
mod mpi_backend {
    use super::Communicator;
    use crate::mesh_error::MultiMeshError;
    use mpi::collective::SystemOperation;
    use mpi::environment::Universe;
    use mpi::topology::SimpleCommunicator;
    use mpi::traits::{Communicator as _, CommunicatorCollectives};

    /// MPI world communicator.
    pub struct MpiComm {
        world: SimpleCommunicator,
        _universe: Option<Universe>,
    }

    impl MpiComm {
        /// Initializes MPI and wraps the world communicator.
        pub fn new() -> Result<Self, MultiMeshError> {
            match mpi::initialize() {
                Some(universe) => {
                    let world = universe.world();
                    Ok(Self {
                        world,
                        _universe: Some(universe),
                    })
                }
                None => Err(MultiMeshError::CommInit(
                    "MPI is already initialized".into(),
                )),
            }
        }
    }

    impl Communicator for MpiComm {
        fn rank(&self) -> usize {
            self.world.rank() as usize
        }

        fn size(&self) -> usize {
            self.world.size() as usize
        }

        fn all_reduce_sum(&self, value: f64) -> f64 {
            let mut sum = 0.0;
            self.world
                .all_reduce_into(&value, &mut sum, SystemOperation::sum());
            sum
        }
    }
}

#[cfg(feature = "mpi-support")]
pub use mpi_backend::MpiComm;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_comm_is_identity() {
        let comm = NoComm;
        assert_eq!(comm.rank(), 0);
        assert_eq!(comm.size(), 1);
        assert_eq!(comm.all_reduce_sum(3.5), 3.5);
    }

    #[test]
    fn thread_comm_sums_across_ranks() {
        let comms = ThreadComm::group(4);
        let handles: Vec<_> = comms
            .into_iter()
            .map(|comm| {
                std::thread::spawn(move || {
                    let local = (comm.rank() + 1) as f64;
                    comm.all_reduce_sum(local)
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 10.0);
        }
    }

    #[test]
    fn thread_comm_is_reusable() {
        let comms = ThreadComm::group(2);
        let handles: Vec<_> = comms
            .into_iter()
            .map(|comm| {
                std::thread::spawn(move || {
                    let first = comm.all_reduce_sum(1.0);
                    let second = comm.all_reduce_sum(comm.rank() as f64);
                    (first, second)
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), (2.0, 1.0));
        }
    }

    #[test]
    #[should_panic(expected = "at least one rank")]
    fn empty_group_panics() {
        let _ = ThreadComm::group(0);
    }
}
