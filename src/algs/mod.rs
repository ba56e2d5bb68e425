//! Algorithms and parallel plumbing.

pub mod communicator;

pub use communicator::{Communicator, NoComm, ThreadComm};
#[cfg(feature = "mpi-support")]
pub use communicator::MpiComm;
