//! Structured triangle-mesh factories.
//!
//! Both factories triangulate an `nx`-by-`ny` structured grid by splitting
//! every grid quad into two triangles along its lower-left/upper-right
//! diagonal, giving `2 * nx * ny` cells over `(nx + 1) * (ny + 1)`
//! vertices.

use crate::geometry::{GEO_TOL, Point};
use crate::mesh::Mesh;
use crate::mesh_error::MultiMeshError;

fn invalid_geometry(message: impl Into<String>) -> MultiMeshError {
    MultiMeshError::InvalidGeometry(message.into())
}

/// Mesh of the unit square `[0, 1] x [0, 1]` with `nx`-by-`ny` grid cells.
pub fn unit_square_mesh(nx: usize, ny: usize) -> Result<Mesh, MultiMeshError> {
    rectangle_mesh(Point::origin(), Point::new(1.0, 1.0), nx, ny)
}

/// Mesh of the axis-aligned rectangle spanned by the corner points `p0`
/// and `p1` with `nx`-by-`ny` grid cells.
///
/// Any pair of opposite corners is accepted; the rectangle must have
/// nonzero width and height.
pub fn rectangle_mesh(p0: Point, p1: Point, nx: usize, ny: usize) -> Result<Mesh, MultiMeshError> {
    if nx == 0 || ny == 0 {
        return Err(invalid_geometry("nx and ny must be positive"));
    }
    let x0 = p0.x.min(p1.x);
    let x1 = p0.x.max(p1.x);
    let y0 = p0.y.min(p1.y);
    let y1 = p0.y.max(p1.y);
    if x1 - x0 < GEO_TOL || y1 - y0 < GEO_TOL {
        return Err(invalid_geometry(format!(
            "rectangle spanned by {p0} and {p1} has zero width or height"
        )));
    }

    let dx = (x1 - x0) / nx as f64;
    let dy = (y1 - y0) / ny as f64;
    let mut vertices = Vec::with_capacity((nx + 1) * (ny + 1));
    for j in 0..=ny {
        let y = y0 + dy * j as f64;
        for i in 0..=nx {
            let x = x0 + dx * i as f64;
            vertices.push(Point::new(x, y));
        }
    }

    let mut cells = Vec::with_capacity(2 * nx * ny);
    let row_stride = nx + 1;
    for j in 0..ny {
        for i in 0..nx {
            let v0 = j * row_stride + i;
            let v1 = v0 + 1;
            let v2 = v0 + row_stride;
            let v3 = v2 + 1;
            // Diagonal from v0 to v3.
            cells.push([v0, v1, v3]);
            cells.push([v0, v3, v2]);
        }
    }

    Mesh::new(vertices, cells)
}
