//! Planar orientation and incidence predicates.
//!
//! All predicates are tolerance-based; the geometric tolerance [`GEO_TOL`]
//! is absolute and assumes mesh coordinates of order unity, which matches
//! the structured factories in [`crate::mesh::factory`].

use super::point::Point;

/// Absolute tolerance for geometric degeneracy decisions.
pub const GEO_TOL: f64 = 1e-12;

/// Twice the signed area of the triangle `(a, b, c)`.
///
/// Positive when `c` lies to the left of the directed line `a -> b`
/// (counter-clockwise triangle).
#[inline]
pub fn orient(a: Point, b: Point, c: Point) -> f64 {
    (b - a).cross(c - a)
}

/// Signed area of the triangle `(a, b, c)`.
#[inline]
pub fn signed_area(a: Point, b: Point, c: Point) -> f64 {
    0.5 * orient(a, b, c)
}

/// Unsigned area of the triangle `(a, b, c)`.
#[inline]
pub fn triangle_area(a: Point, b: Point, c: Point) -> f64 {
    signed_area(a, b, c).abs()
}

/// Returns the triangle with vertices reordered counter-clockwise.
#[inline]
pub fn ccw(tri: [Point; 3]) -> [Point; 3] {
    if orient(tri[0], tri[1], tri[2]) < 0.0 {
        [tri[0], tri[2], tri[1]]
    } else {
        tri
    }
}

/// Whether `p` lies in the closed triangle `(a, b, c)`.
///
/// Accepts either vertex orientation. Points within [`GEO_TOL`] of an edge
/// count as inside.
pub fn point_in_triangle(p: Point, a: Point, b: Point, c: Point) -> bool {
    let d0 = orient(a, b, p);
    let d1 = orient(b, c, p);
    let d2 = orient(c, a, p);
    let has_neg = d0 < -GEO_TOL || d1 < -GEO_TOL || d2 < -GEO_TOL;
    let has_pos = d0 > GEO_TOL || d1 > GEO_TOL || d2 > GEO_TOL;
    !(has_neg && has_pos)
}

/// Whether the closed segments `p0`–`p1` and `q0`–`q1` intersect.
pub fn segments_intersect(p0: Point, p1: Point, q0: Point, q1: Point) -> bool {
    let d0 = orient(p0, p1, q0);
    let d1 = orient(p0, p1, q1);
    let d2 = orient(q0, q1, p0);
    let d3 = orient(q0, q1, p1);

    if ((d0 > GEO_TOL && d1 < -GEO_TOL) || (d0 < -GEO_TOL && d1 > GEO_TOL))
        && ((d2 > GEO_TOL && d3 < -GEO_TOL) || (d2 < -GEO_TOL && d3 > GEO_TOL))
    {
        return true;
    }

    // Collinear or touching configurations.
    (d0.abs() <= GEO_TOL && on_segment(p0, p1, q0))
        || (d1.abs() <= GEO_TOL && on_segment(p0, p1, q1))
        || (d2.abs() <= GEO_TOL && on_segment(q0, q1, p0))
        || (d3.abs() <= GEO_TOL && on_segment(q0, q1, p1))
}

/// Whether `p` (assumed collinear with `a`–`b`) lies within the segment's
/// bounding interval.
fn on_segment(a: Point, b: Point, p: Point) -> bool {
    p.x >= a.x.min(b.x) - GEO_TOL
        && p.x <= a.x.max(b.x) + GEO_TOL
        && p.y >= a.y.min(b.y) - GEO_TOL
        && p.y <= a.y.max(b.y) + GEO_TOL
}

/// Whether the open part of segment `p0`–`p1` passes through the interior
/// of the triangle `tri`.
///
/// A segment lying exactly on a triangle edge does not count: only segments
/// with a sub-segment of positive length strictly inside the triangle
/// interior are reported. This is the predicate cut-cell classification
/// needs, where boundary facets grazing a cell edge must not mark the cell
/// as cut.
pub fn segment_intersects_interior(p0: Point, p1: Point, tri: [Point; 3]) -> bool {
    let tri = ccw(tri);
    // Clip the parameter interval [0, 1] against the three half-planes,
    // keeping only the strictly interior part.
    let mut t_min = 0.0f64;
    let mut t_max = 1.0f64;
    for i in 0..3 {
        let a = tri[i];
        let b = tri[(i + 1) % 3];
        let f0 = orient(a, b, p0);
        let f1 = orient(a, b, p1);
        let df = f1 - f0;
        if df.abs() <= GEO_TOL {
            // Parallel to this edge line; inside iff strictly positive.
            if f0 <= GEO_TOL {
                return false;
            }
            continue;
        }
        // f(t) = f0 + t * df > 0  <=>  t on one side of the root.
        let root = -f0 / df;
        if df > 0.0 {
            t_min = t_min.max(root);
        } else {
            t_max = t_max.min(root);
        }
    }
    let len = (p1 - p0).norm();
    (t_max - t_min) * len > GEO_TOL.sqrt()
}
