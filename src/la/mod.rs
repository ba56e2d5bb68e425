//! Linear-algebra-adjacent value types.

pub mod scalar;

pub use scalar::Scalar;
