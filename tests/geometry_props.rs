use multimesh::geometry::{
    BoundingBox, BoundingBoxTree, Point, polygon_area, triangle_area,
    triangle_triangle_intersection,
};
use proptest::prelude::*;

fn arb_point() -> impl Strategy<Value = Point> {
    (-10.0f64..10.0, -10.0f64..10.0).prop_map(|(x, y)| Point::new(x, y))
}

fn arb_triangle() -> impl Strategy<Value = [Point; 3]> {
    [arb_point(), arb_point(), arb_point()]
        .prop_filter("non-degenerate", |t| triangle_area(t[0], t[1], t[2]) > 0.1)
}

proptest! {
    #[test]
    fn intersection_area_bounded_by_inputs(t0 in arb_triangle(), t1 in arb_triangle()) {
        let area = polygon_area(&triangle_triangle_intersection(t0, t1)).abs();
        let a0 = triangle_area(t0[0], t0[1], t0[2]);
        let a1 = triangle_area(t1[0], t1[1], t1[2]);
        prop_assert!(area <= a0.min(a1) + 1e-9);
    }

    #[test]
    fn intersection_area_is_symmetric(t0 in arb_triangle(), t1 in arb_triangle()) {
        let a01 = polygon_area(&triangle_triangle_intersection(t0, t1)).abs();
        let a10 = polygon_area(&triangle_triangle_intersection(t1, t0)).abs();
        prop_assert!((a01 - a10).abs() < 1e-9);
    }

    #[test]
    fn self_intersection_recovers_area(t in arb_triangle()) {
        let area = polygon_area(&triangle_triangle_intersection(t, t)).abs();
        prop_assert!((area - triangle_area(t[0], t[1], t[2])).abs() < 1e-9);
    }

    #[test]
    fn tree_collisions_contain_exact_overlaps(
        tris in prop::collection::vec(arb_triangle(), 1..20),
        query in arb_triangle(),
    ) {
        let boxes: Vec<BoundingBox> = tris
            .iter()
            .map(|t| BoundingBox::from_points(t.iter().copied()).unwrap())
            .collect();
        let tree = BoundingBoxTree::build(&boxes);
        let query_box = BoundingBox::from_points(query.iter().copied()).unwrap();
        let candidates = tree.compute_collisions_box(&query_box);
        // The broad phase may over-approximate but must never miss a
        // genuinely intersecting triangle.
        for (i, t) in tris.iter().enumerate() {
            let overlap = polygon_area(&triangle_triangle_intersection(*t, query)).abs();
            if overlap > 1e-9 {
                prop_assert!(candidates.contains(&i), "missed triangle {i}");
            }
        }
    }
}
