use multimesh::geometry::Point;
use multimesh::mesh::factory::{rectangle_mesh, unit_square_mesh};
use multimesh::mesh_error::MultiMeshError;
use multimesh::multimesh::{CellMark, MultiMesh};

/// Two-part composite: a unit square under a wide, flat rectangle.
fn square_under_rectangle() -> MultiMesh {
    let mut mm = MultiMesh::new();
    mm.add(unit_square_mesh(1, 1).unwrap());
    mm.add(rectangle_mesh(Point::new(0.0, 0.0), Point::new(2.0, 0.5), 1, 1).unwrap());
    mm
}

#[test]
fn build_two_overlapping_parts() {
    let mut mm = square_under_rectangle();
    assert_eq!(mm.num_parts(), 2);
    mm.build(2).unwrap();
    assert!(mm.is_built());
}

#[test]
fn classification_two_parts() {
    let mut mm = square_under_rectangle();
    mm.build(2).unwrap();

    // The rectangle's top edge (y = 0.5) passes through both cells of the
    // unit square, so both are cut.
    assert_eq!(mm.cut_cells(0).unwrap(), vec![0, 1]);
    assert!(mm.uncut_cells(0).unwrap().is_empty());
    assert!(mm.covered_cells(0).unwrap().is_empty());

    // The topmost part is never cut or covered.
    assert_eq!(mm.uncut_cells(1).unwrap(), vec![0, 1]);
    assert_eq!(mm.cell_mark(1, 0).unwrap(), CellMark::Uncut);

    // The lower-right square cell overlaps both rectangle cells; the
    // upper-left one only meets the rectangle's upper cell (the lower one
    // lies entirely below the diagonal y = x/4).
    assert_eq!(mm.cutting_cells(0, 0).unwrap(), &[(1, 0), (1, 1)]);
    assert_eq!(mm.cutting_cells(0, 1).unwrap(), &[(1, 1)]);
    assert!(mm.cutting_cells(1, 0).unwrap().is_empty());
}

#[test]
fn union_volume_two_parts() {
    // Union of [0,1]^2 and [0,2]x[0,0.5] has area 1 + 1 - 0.5 = 1.5.
    let mut mm = square_under_rectangle();
    mm.build(2).unwrap();
    assert!((mm.compute_volume().unwrap() - 1.5).abs() < 1e-10);
}

#[test]
fn cut_cell_rules_cover_uncovered_area() {
    let mut mm = square_under_rectangle();
    mm.build(2).unwrap();

    // Lower-right triangle keeps area 0.125, upper-left keeps 0.375.
    let r0 = mm.quadrature_rule_cut_cell(0, 0).unwrap().unwrap();
    let r1 = mm.quadrature_rule_cut_cell(0, 1).unwrap().unwrap();
    assert!((r0.total_weight() - 0.125).abs() < 1e-10);
    assert!((r1.total_weight() - 0.375).abs() < 1e-10);

    // Uncut cells carry no cut-cell rule.
    assert!(mm.quadrature_rule_cut_cell(1, 0).unwrap().is_none());
}

#[test]
fn coincident_parts_are_covered() {
    let mut mm = MultiMesh::new();
    mm.add(unit_square_mesh(1, 1).unwrap());
    mm.add(unit_square_mesh(1, 1).unwrap());
    mm.build(2).unwrap();

    // The second square's boundary lies exactly on the first square's cell
    // edges, never through an interior, so the first part is covered.
    assert_eq!(mm.covered_cells(0).unwrap(), vec![0, 1]);
    assert!(mm.cut_cells(0).unwrap().is_empty());
    assert!((mm.compute_volume().unwrap() - 1.0).abs() < 1e-10);
}

#[test]
fn union_volume_three_parts() {
    // A: [0,1]^2, B: [0.5,1.5]x[0,1], C: [0,1.5]x[0,0.5].
    // The union is [0,1.5]x[0,1], area 1.5, with genuine three-way
    // overlap in [0.5,1]x[0,0.5] exercising the inclusion-exclusion
    // stages across parts.
    let mut mm = MultiMesh::new();
    mm.add(unit_square_mesh(2, 2).unwrap());
    mm.add(rectangle_mesh(Point::new(0.5, 0.0), Point::new(1.5, 1.0), 1, 1).unwrap());
    mm.add(rectangle_mesh(Point::new(0.0, 0.0), Point::new(1.5, 0.5), 2, 1).unwrap());
    mm.build(2).unwrap();
    assert!((mm.compute_volume().unwrap() - 1.5).abs() < 1e-10);
}

#[test]
fn disjoint_parts_are_all_uncut() {
    let mut mm = MultiMesh::new();
    mm.add(unit_square_mesh(2, 2).unwrap());
    mm.add(rectangle_mesh(Point::new(3.0, 3.0), Point::new(4.0, 4.0), 1, 1).unwrap());
    mm.build(2).unwrap();
    assert_eq!(mm.uncut_cells(0).unwrap().len(), 8);
    assert_eq!(mm.uncut_cells(1).unwrap().len(), 2);
    assert!((mm.compute_volume().unwrap() - 2.0).abs() < 1e-10);
}

#[test]
fn refinement_does_not_change_union_volume() {
    for (nx0, nx1) in [(1, 1), (2, 3), (4, 2)] {
        let mut mm = MultiMesh::new();
        mm.add(unit_square_mesh(nx0, nx0).unwrap());
        mm.add(rectangle_mesh(Point::new(0.0, 0.0), Point::new(2.0, 0.5), nx1, nx1).unwrap());
        mm.build(2).unwrap();
        assert!(
            (mm.compute_volume().unwrap() - 1.5).abs() < 1e-10,
            "resolutions {nx0}, {nx1}"
        );
    }
}

#[test]
fn part_index_out_of_bounds() {
    let mut mm = square_under_rectangle();
    mm.build(2).unwrap();
    assert!(matches!(
        mm.cut_cells(2),
        Err(MultiMeshError::PartOutOfBounds {
            part: 2,
            num_parts: 2
        })
    ));
    assert!(matches!(
        mm.part(5),
        Err(MultiMeshError::PartOutOfBounds { part: 5, .. })
    ));
}
