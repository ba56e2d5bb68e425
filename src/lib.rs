//! # multimesh
//!
//! multimesh is a Rust library for overlapping-mesh ("multimesh") composition, the
//! mesh-management layer of fictitious-domain / CutFEM finite element methods. It
//! provides structured 2D triangle-mesh factories, a multimesh container that
//! classifies cells against the parts stacked above them and builds cut-cell
//! quadrature rules, and a distributed scalar value reduced over pluggable
//! communication backends (serial, threaded, MPI).
//!
//! ## Features
//! - Structured unit-square and rectangle triangle meshes with validated connectivity
//! - Bounding-box trees plus exact convex clipping for part-against-part collision
//! - Cell classification (uncut / cut / covered) and inclusion-exclusion cut-cell
//!   quadrature, so integrating over all parts measures the union of the domains
//! - `Scalar` with collective `apply("add")` sum over a `Communicator` handle
//! - Pluggable communication backends: serial no-op, intra-process thread groups,
//!   and MPI behind the `mpi-support` feature
//!
//! ## Usage
//! Add `multimesh` as a dependency in your `Cargo.toml` and enable features as
//! needed:
//!
//! ```toml
//! [dependencies]
//! multimesh = "0.1"
//! # Optional features:
//! # features = ["mpi-support", "rayon"]
//! ```
//!
//! ## Example
//! ```
//! use multimesh::prelude::*;
//!
//! let mut mm = MultiMesh::new();
//! mm.add(unit_square_mesh(1, 1)?);
//! mm.add(rectangle_mesh(Point::new(0.0, 0.0), Point::new(2.0, 0.5), 1, 1)?);
//! mm.build(2)?;
//! assert!((mm.compute_volume()? - 1.5).abs() < 1e-10);
//! # Ok::<(), multimesh::mesh_error::MultiMeshError>(())
//! ```

// Re-export our major subsystems:
pub mod algs;
pub mod geometry;
pub mod la;
pub mod mesh;
pub mod mesh_error;
pub mod multimesh;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::communicator::Communicator;
    #[cfg(feature = "mpi-support")]
    pub use crate::algs::communicator::MpiComm;
    pub use crate::algs::communicator::{NoComm, ThreadComm};
    pub use crate::geometry::{BoundingBox, BoundingBoxTree, Point};
    pub use crate::la::Scalar;
    pub use crate::mesh::boundary::boundary_facets;
    pub use crate::mesh::{CellType, Mesh, rectangle_mesh, unit_square_mesh};
    pub use crate::mesh_error::MultiMeshError;
    pub use crate::multimesh::quadrature::QuadratureRule;
    pub use crate::multimesh::{CellMark, MultiMesh};
}
