//! `Scalar`: a distributed floating-point value with collective sum.
//!
//! Each participant holds a local component; `apply("add")` reduces the
//! local components of the whole communicator group into the globally
//! visible value. The participant count is an accessor on the
//! communicator handle passed in at construction, never a hidden global.

use crate::algs::communicator::{Communicator, NoComm};
use crate::mesh_error::MultiMeshError;

/// A scalar value distributed over the participants of a communicator.
#[derive(Clone, Debug)]
pub struct Scalar<C: Communicator = NoComm> {
    comm: C,
    local: f64,
    value: f64,
}

impl Scalar<NoComm> {
    /// A serial scalar (single participant).
    pub fn serial() -> Self {
        Self::new(NoComm)
    }
}

impl Default for Scalar<NoComm> {
    fn default() -> Self {
        Self::serial()
    }
}

impl<C: Communicator> Scalar<C> {
    /// Creates a zero-valued scalar over `comm`.
    pub fn new(comm: C) -> Self {
        Self {
            comm,
            local: 0.0,
            value: 0.0,
        }
    }

    /// Sets the local component (pure local mutation, no communication).
    pub fn assign(&mut self, value: f64) {
        self.local = value;
        self.value = value;
    }

    /// Accumulates into the local component (no communication).
    pub fn add_local_value(&mut self, value: f64) {
        self.local += value;
        self.value = self.local;
    }

    /// Finalizes the scalar collectively.
    ///
    /// The only recognized operation is `"add"`, which sums the local
    /// components of all participants; every participant must call it
    /// (barrier-like collective semantics). Any other operand is an
    /// [`MultiMeshError::UnknownApplyOperation`] and performs no
    /// communication.
    pub fn apply(&mut self, operation: &str) -> Result<(), MultiMeshError> {
        match operation {
            "add" => {
                self.value = self.comm.all_reduce_sum(self.local);
                Ok(())
            }
            other => Err(MultiMeshError::UnknownApplyOperation(other.to_owned())),
        }
    }

    /// The currently visible value: the local component before `apply`,
    /// the reduced sum after.
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The communicator this scalar reduces over.
    #[inline]
    pub fn comm(&self) -> &C {
        &self.comm
    }
}
