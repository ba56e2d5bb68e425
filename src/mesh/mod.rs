//! Simplicial 2D meshes.
//!
//! A [`Mesh`] is immutable after construction: vertex coordinates plus
//! triangle cells referencing them by index. Construction validates the
//! connectivity and rejects degenerate cells, so every downstream consumer
//! (the multimesh build pass in particular) can rely on positive cell
//! areas without re-checking.

pub mod boundary;
pub mod factory;

use crate::geometry::{BoundingBox, Point, triangle_area};
use crate::mesh_error::MultiMeshError;

pub use factory::{rectangle_mesh, unit_square_mesh};

/// Cell types a mesh can carry.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum CellType {
    /// 0D vertex.
    Vertex,
    /// 1D segment/edge (boundary facets).
    Segment,
    /// 2D simplex (triangle).
    #[default]
    Triangle,
}

impl CellType {
    /// Topological dimension of the cell.
    pub fn dimension(self) -> usize {
        match self {
            CellType::Vertex => 0,
            CellType::Segment => 1,
            CellType::Triangle => 2,
        }
    }
}

/// An immutable triangle mesh in the plane.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Mesh {
    vertices: Vec<Point>,
    cells: Vec<[usize; 3]>,
}

impl Mesh {
    /// Builds a mesh from raw vertices and cells.
    ///
    /// Fails with [`MultiMeshError::InvalidGeometry`] when a cell references
    /// a missing vertex or spans (near-)zero area.
    pub fn new(vertices: Vec<Point>, cells: Vec<[usize; 3]>) -> Result<Self, MultiMeshError> {
        for (c, cell) in cells.iter().enumerate() {
            for &v in cell {
                if v >= vertices.len() {
                    return Err(MultiMeshError::InvalidGeometry(format!(
                        "cell {c} references missing vertex {v}"
                    )));
                }
            }
            let [a, b, c2] = cell.map(|v| vertices[v]);
            if triangle_area(a, b, c2) < 1e-14 {
                return Err(MultiMeshError::InvalidGeometry(format!(
                    "cell {c} is degenerate (zero area)"
                )));
            }
        }
        Ok(Self { vertices, cells })
    }

    /// Number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of cells.
    #[inline]
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// Topological dimension of the cells.
    #[inline]
    pub fn topological_dimension(&self) -> usize {
        CellType::Triangle.dimension()
    }

    /// Dimension of the embedding space.
    #[inline]
    pub fn geometric_dimension(&self) -> usize {
        2
    }

    /// Cell type carried by this mesh.
    #[inline]
    pub fn cell_type(&self) -> CellType {
        CellType::Triangle
    }

    /// All vertex coordinates, indexed by vertex number.
    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// All cells as vertex-index triples.
    #[inline]
    pub fn cells(&self) -> &[[usize; 3]] {
        &self.cells
    }

    /// Vertex indices of cell `c`.
    pub fn cell(&self, c: usize) -> Result<[usize; 3], MultiMeshError> {
        self.cells
            .get(c)
            .copied()
            .ok_or(MultiMeshError::CellOutOfBounds {
                part: 0,
                cell: c,
                num_cells: self.cells.len(),
            })
    }

    /// Coordinates of the three vertices of cell `c`.
    pub fn cell_vertices(&self, c: usize) -> Result<[Point; 3], MultiMeshError> {
        Ok(self.cell(c)?.map(|v| self.vertices[v]))
    }

    /// Area of cell `c`.
    pub fn cell_volume(&self, c: usize) -> Result<f64, MultiMeshError> {
        let [a, b, c2] = self.cell_vertices(c)?;
        Ok(triangle_area(a, b, c2))
    }

    /// Bounding box of cell `c`.
    pub fn cell_bounding_box(&self, c: usize) -> Result<BoundingBox, MultiMeshError> {
        let verts = self.cell_vertices(c)?;
        Ok(BoundingBox::from_points(verts).expect("cells have three vertices"))
    }

    /// Bounding box of the whole mesh; `None` for an empty mesh.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.vertices.iter().copied())
    }

    /// Sum of all cell areas.
    pub fn total_volume(&self) -> f64 {
        self.cells
            .iter()
            .map(|cell| {
                let [a, b, c] = cell.map(|v| self.vertices[v]);
                triangle_area(a, b, c)
            })
            .sum()
    }
}
