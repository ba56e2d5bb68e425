//! Overlapping-mesh composition ("multimesh").
//!
//! A [`MultiMesh`] aggregates independently constructed triangle meshes in
//! insertion order: part 0 is the background mesh, later parts lie on top
//! of earlier ones. [`MultiMesh::build`] computes the geometric
//! relationships between the parts:
//!
//! 1. bounding-box trees per part (cells and boundary facets);
//! 2. collision maps: for each cell, the cells of *later* parts that
//!    overlap it with positive area ("cutting cells");
//! 3. a classification of every cell as uncut, cut (the boundary of a
//!    later part passes through its interior) or covered (overlapped by a
//!    later part, but away from that part's boundary);
//! 4. quadrature rules for cut cells, assembled by inclusion-exclusion:
//!    the full-cell rule plus alternating-sign rules over the cell's
//!    intersections with its cutting cells.
//!
//! Covered cells carry no quadrature at all, so integrating the uncut
//! cells plus the cut-cell rules over all parts yields exactly the measure
//! of the union of the parts; [`MultiMesh::compute_volume`] does that sum.

pub mod quadrature;

use std::collections::BTreeMap;

use crate::geometry::{
    BoundingBox, BoundingBoxTree, Point, ccw, clip_polygon_triangle, segment_intersects_interior,
    triangle_triangle_intersection, triangles_collide,
};
use crate::mesh::Mesh;
use crate::mesh::boundary::boundary_facets;
use crate::mesh_error::MultiMeshError;
use quadrature::{QuadratureRule, polygon_rule, triangle_rule};

/// Classification of a cell after [`MultiMesh::build`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum CellMark {
    /// Not overlapped by any later part.
    Uncut,
    /// The boundary of a later part passes through the cell interior.
    Cut,
    /// Overlapped by a later part, but not by its boundary.
    Covered,
}

/// A cutting cell: `(part, cell)` of a later part overlapping a given cell.
pub type CuttingCell = (usize, usize);

#[derive(Debug, Default)]
struct BuildData {
    /// Per part, per cell: the classification.
    marks: Vec<Vec<CellMark>>,
    /// Per part: cell index to its cutting cells, ascending.
    cutting: Vec<BTreeMap<usize, Vec<CuttingCell>>>,
    /// Per part: cut cell index to its quadrature rule.
    cut_rules: Vec<BTreeMap<usize, QuadratureRule>>,
}

/// Composite of overlapping triangle meshes.
#[derive(Debug)]
pub struct MultiMesh {
    parts: Vec<Mesh>,
    quadrature_degree: usize,
    built: Option<BuildData>,
}

impl Default for MultiMesh {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiMesh {
    /// Creates an empty multimesh with quadrature degree 2.
    pub fn new() -> Self {
        Self {
            parts: Vec::new(),
            quadrature_degree: 2,
            built: None,
        }
    }

    /// Appends `mesh` as the topmost part.
    ///
    /// Invalidates any previous build.
    pub fn add(&mut self, mesh: Mesh) {
        self.parts.push(mesh);
        self.built = None;
    }

    /// Sets the polynomial degree of the cut-cell quadrature rules.
    ///
    /// Invalidates any previous build.
    pub fn set_quadrature_degree(&mut self, degree: usize) {
        self.quadrature_degree = degree;
        self.built = None;
    }

    /// Current quadrature degree.
    #[inline]
    pub fn quadrature_degree(&self) -> usize {
        self.quadrature_degree
    }

    /// Number of parts added so far.
    #[inline]
    pub fn num_parts(&self) -> usize {
        self.parts.len()
    }

    /// Whether `build` has completed since the last mutation.
    #[inline]
    pub fn is_built(&self) -> bool {
        self.built.is_some()
    }

    /// The mesh of part `i`.
    pub fn part(&self, i: usize) -> Result<&Mesh, MultiMeshError> {
        self.parts.get(i).ok_or(MultiMeshError::PartOutOfBounds {
            part: i,
            num_parts: self.parts.len(),
        })
    }

    /// Computes the geometric relationships between the parts.
    ///
    /// `dim` is the topological dimension of the parts; only 2 is
    /// supported. Building an empty multimesh is a no-op that succeeds.
    pub fn build(&mut self, dim: usize) -> Result<(), MultiMeshError> {
        if dim != 2 {
            return Err(MultiMeshError::DimensionMismatch {
                expected: 2,
                found: dim,
            });
        }
        self.built = None;

        let num_parts = self.parts.len();
        let cell_trees: Vec<BoundingBoxTree> = self
            .parts
            .iter()
            .map(|mesh| -> Result<BoundingBoxTree, MultiMeshError> {
                let boxes: Vec<BoundingBox> = (0..mesh.num_cells())
                    .map(|c| mesh.cell_bounding_box(c))
                    .collect::<Result<_, _>>()?;
                Ok(BoundingBoxTree::build(&boxes))
            })
            .collect::<Result<_, _>>()?;

        // Boundary facets per part, as segments, plus trees over them.
        let boundary_segments: Vec<Vec<(Point, Point)>> = self
            .parts
            .iter()
            .map(|mesh| {
                boundary_facets(mesh)
                    .into_iter()
                    .map(|[a, b]| (mesh.vertices()[a], mesh.vertices()[b]))
                    .collect()
            })
            .collect();
        let boundary_trees: Vec<BoundingBoxTree> = boundary_segments
            .iter()
            .map(|segments| {
                let boxes: Vec<BoundingBox> = segments
                    .iter()
                    .map(|&(a, b)| BoundingBox::from_points([a, b]).expect("two points"))
                    .collect();
                BoundingBoxTree::build(&boxes)
            })
            .collect();

        let mut data = BuildData::default();
        for i in 0..num_parts {
            let mesh = &self.parts[i];
            let classify = |c: usize| -> Result<(CellMark, Vec<CuttingCell>), MultiMeshError> {
                let tri = mesh.cell_vertices(c)?;
                let bbox = mesh.cell_bounding_box(c)?;
                let mut cutting = Vec::new();
                let mut cut = false;
                for j in (i + 1)..num_parts {
                    let other = &self.parts[j];
                    for cj in cell_trees[j].compute_collisions_box(&bbox) {
                        let other_tri = other.cell_vertices(cj)?;
                        if triangles_collide(tri, other_tri) {
                            cutting.push((j, cj));
                        }
                    }
                    for f in boundary_trees[j].compute_collisions_box(&bbox) {
                        let (a, b) = boundary_segments[j][f];
                        if segment_intersects_interior(a, b, tri) {
                            cut = true;
                        }
                    }
                }
                let mark = if cut {
                    CellMark::Cut
                } else if cutting.is_empty() {
                    CellMark::Uncut
                } else {
                    CellMark::Covered
                };
                Ok((mark, cutting))
            };

            #[cfg(feature = "rayon")]
            let classified: Vec<(CellMark, Vec<CuttingCell>)> = {
                use rayon::prelude::*;
                (0..mesh.num_cells())
                    .into_par_iter()
                    .map(classify)
                    .collect::<Result<_, _>>()?
            };
            #[cfg(not(feature = "rayon"))]
            let classified: Vec<(CellMark, Vec<CuttingCell>)> = (0..mesh.num_cells())
                .map(classify)
                .collect::<Result<_, _>>()?;

            let mut marks = Vec::with_capacity(classified.len());
            let mut cutting_map = BTreeMap::new();
            let mut rules = BTreeMap::new();
            for (c, (mark, cutting)) in classified.into_iter().enumerate() {
                if mark == CellMark::Cut {
                    let tri = mesh.cell_vertices(c)?;
                    let cutters: Vec<[Point; 3]> = cutting
                        .iter()
                        .map(|&(j, cj)| self.parts[j].cell_vertices(cj))
                        .collect::<Result<_, _>>()?;
                    rules.insert(c, cut_cell_rule(tri, &cutters, self.quadrature_degree)?);
                }
                marks.push(mark);
                if !cutting.is_empty() {
                    cutting_map.insert(c, cutting);
                }
            }
            data.marks.push(marks);
            data.cutting.push(cutting_map);
            data.cut_rules.push(rules);
        }

        for (i, marks) in data.marks.iter().enumerate() {
            let cut = marks.iter().filter(|&&m| m == CellMark::Cut).count();
            let covered = marks.iter().filter(|&&m| m == CellMark::Covered).count();
            log::debug!(
                "multimesh part {i}: {} cells ({cut} cut, {covered} covered)",
                marks.len()
            );
        }
        log::info!("built multimesh with {num_parts} parts");
        self.built = Some(data);
        Ok(())
    }

    fn build_data(&self) -> Result<&BuildData, MultiMeshError> {
        self.built.as_ref().ok_or(MultiMeshError::NotBuilt)
    }

    fn part_marks(&self, i: usize) -> Result<&[CellMark], MultiMeshError> {
        let data = self.build_data()?;
        data.marks
            .get(i)
            .map(Vec::as_slice)
            .ok_or(MultiMeshError::PartOutOfBounds {
                part: i,
                num_parts: self.parts.len(),
            })
    }

    /// Classification of cell `c` of part `i`.
    pub fn cell_mark(&self, i: usize, c: usize) -> Result<CellMark, MultiMeshError> {
        let marks = self.part_marks(i)?;
        marks.get(c).copied().ok_or(MultiMeshError::CellOutOfBounds {
            part: i,
            cell: c,
            num_cells: marks.len(),
        })
    }

    fn cells_with_mark(&self, i: usize, mark: CellMark) -> Result<Vec<usize>, MultiMeshError> {
        Ok(self
            .part_marks(i)?
            .iter()
            .enumerate()
            .filter_map(|(c, &m)| (m == mark).then_some(c))
            .collect())
    }

    /// Cut cells of part `i`, ascending.
    pub fn cut_cells(&self, i: usize) -> Result<Vec<usize>, MultiMeshError> {
        self.cells_with_mark(i, CellMark::Cut)
    }

    /// Uncut cells of part `i`, ascending.
    pub fn uncut_cells(&self, i: usize) -> Result<Vec<usize>, MultiMeshError> {
        self.cells_with_mark(i, CellMark::Uncut)
    }

    /// Covered cells of part `i`, ascending.
    pub fn covered_cells(&self, i: usize) -> Result<Vec<usize>, MultiMeshError> {
        self.cells_with_mark(i, CellMark::Covered)
    }

    /// Cutting cells of cell `c` of part `i` (cells of later parts that
    /// overlap it with positive area), ascending.
    pub fn cutting_cells(&self, i: usize, c: usize) -> Result<&[CuttingCell], MultiMeshError> {
        self.cell_mark(i, c)?;
        let data = self.build_data()?;
        Ok(data.cutting[i].get(&c).map(Vec::as_slice).unwrap_or(&[]))
    }

    /// Quadrature rule for cut cell `c` of part `i`; `None` when the cell
    /// is not cut.
    ///
    /// The rule integrates over the part of the cell *not* overlapped by
    /// later parts; some of its weights are negative.
    pub fn quadrature_rule_cut_cell(
        &self,
        i: usize,
        c: usize,
    ) -> Result<Option<&QuadratureRule>, MultiMeshError> {
        self.cell_mark(i, c)?;
        let data = self.build_data()?;
        Ok(data.cut_rules[i].get(&c))
    }

    /// Measure of the union of all parts: uncut cell areas plus cut-cell
    /// quadrature weights, over all parts.
    pub fn compute_volume(&self) -> Result<f64, MultiMeshError> {
        let data = self.build_data()?;
        let mut volume = 0.0;
        for (i, mesh) in self.parts.iter().enumerate() {
            for (c, &mark) in data.marks[i].iter().enumerate() {
                match mark {
                    CellMark::Uncut => volume += mesh.cell_volume(c)?,
                    CellMark::Cut => {
                        let rule = data.cut_rules[i].get(&c).ok_or(MultiMeshError::NotBuilt)?;
                        volume += rule.total_weight();
                    }
                    CellMark::Covered => {}
                }
            }
        }
        Ok(volume)
    }
}

/// Inclusion-exclusion quadrature rule for a cut cell.
///
/// Starts from the full-cell rule and subtracts the overlapped region:
/// stage `s` holds the intersections of the cell with `s + 1` cutting
/// cells, contributing with alternating sign. Cutting cells of the same
/// part are interior-disjoint, so their joint intersections fall below the
/// area cutoff and the stages terminate quickly.
fn cut_cell_rule(
    cell: [Point; 3],
    cutting: &[[Point; 3]],
    degree: usize,
) -> Result<QuadratureRule, MultiMeshError> {
    let cell = ccw(cell);
    let mut rule = triangle_rule(cell, degree, 1.0)?;

    let mut stage: Vec<(Vec<Point>, usize)> = Vec::new();
    for (k, tri) in cutting.iter().enumerate() {
        let poly = triangle_triangle_intersection(cell, *tri);
        if !poly.is_empty() {
            stage.push((poly, k));
        }
    }
    let mut sign = -1.0;
    while !stage.is_empty() {
        let mut next = Vec::new();
        for (poly, k) in &stage {
            rule.extend(&polygon_rule(poly, degree, sign)?);
            for l in (k + 1)..cutting.len() {
                let deeper = clip_polygon_triangle(poly, cutting[l]);
                if !deeper.is_empty() {
                    next.push((deeper, l));
                }
            }
        }
        stage = next;
        sign = -sign;
    }
    Ok(rule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::factory::{rectangle_mesh, unit_square_mesh};

    #[test]
    fn cut_cell_rule_subtracts_overlap() {
        // Unit-square lower triangle, cut by the two cells of the
        // (0,0)-(2,0.5) rectangle mesh; uncovered area is 0.5 - 0.375.
        let cell = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
        ];
        let cutting = [
            [
                Point::new(0.0, 0.0),
                Point::new(2.0, 0.0),
                Point::new(2.0, 0.5),
            ],
            [
                Point::new(0.0, 0.0),
                Point::new(2.0, 0.5),
                Point::new(0.0, 0.5),
            ],
        ];
        let rule = cut_cell_rule(cell, &cutting, 2).unwrap();
        assert!((rule.total_weight() - 0.125).abs() < 1e-12);
    }

    #[test]
    fn cut_cell_rule_without_cutters_is_full_cell() {
        let cell = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
        ];
        let rule = cut_cell_rule(cell, &[], 2).unwrap();
        assert!((rule.total_weight() - 0.5).abs() < 1e-14);
    }

    #[test]
    fn accessors_before_build_fail() {
        let mut mm = MultiMesh::new();
        mm.add(unit_square_mesh(1, 1).unwrap());
        assert!(!mm.is_built());
        assert!(matches!(mm.compute_volume(), Err(MultiMeshError::NotBuilt)));
        assert!(matches!(mm.cut_cells(0), Err(MultiMeshError::NotBuilt)));
        // Parts are reachable without a build.
        assert_eq!(mm.part(0).unwrap().num_cells(), 2);
    }

    #[test]
    fn add_invalidates_build() {
        let mut mm = MultiMesh::new();
        mm.add(unit_square_mesh(1, 1).unwrap());
        mm.build(2).unwrap();
        assert!(mm.is_built());
        mm.add(rectangle_mesh(Point::new(0.0, 0.0), Point::new(2.0, 0.5), 1, 1).unwrap());
        assert!(!mm.is_built());
    }

    #[test]
    fn unsupported_dimension() {
        let mut mm = MultiMesh::new();
        mm.add(unit_square_mesh(1, 1).unwrap());
        assert!(matches!(
            mm.build(3),
            Err(MultiMeshError::DimensionMismatch {
                expected: 2,
                found: 3
            })
        ));
    }

    #[test]
    fn empty_multimesh_builds() {
        let mut mm = MultiMesh::new();
        mm.build(2).unwrap();
        assert!(mm.is_built());
        assert_eq!(mm.num_parts(), 0);
        assert_eq!(mm.compute_volume().unwrap(), 0.0);
    }
}
