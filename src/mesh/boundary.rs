//! Boundary facet extraction.
//!
//! A facet of a triangle mesh is an edge of one of its cells; a boundary
//! facet is incident to exactly one cell. `BTreeMap` keeps the result
//! deterministic across runs.

use std::collections::BTreeMap;

use crate::mesh::Mesh;

/// Boundary facets of `mesh` as vertex-index pairs `(min, max)`, in
/// ascending order.
pub fn boundary_facets(mesh: &Mesh) -> Vec<[usize; 2]> {
    let mut counts: BTreeMap<[usize; 2], usize> = BTreeMap::new();
    for cell in mesh.cells() {
        for k in 0..3 {
            let a = cell[k];
            let b = cell[(k + 1) % 3];
            let key = [a.min(b), a.max(b)];
            *counts.entry(key).or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .filter_map(|(edge, n)| (n == 1).then_some(edge))
        .collect()
}
