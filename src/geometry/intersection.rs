//! Convex clipping and triangle-triangle intersection.
//!
//! The narrow phase of the multimesh build: candidate cell pairs from the
//! bounding-box trees are intersected exactly here. All intersections of
//! two triangles (and of the convex polygons derived from them) are convex
//! polygons, so Sutherland-Hodgman clipping against half-planes suffices.

use itertools::Itertools;

use super::point::Point;
use super::predicates::{GEO_TOL, ccw, orient};

/// Minimum area for an intersection polygon to count as a collision.
///
/// Intersections thinner than this are grazing contacts (shared edges or
/// vertices) and are discarded by the build pass.
pub const MIN_INTERSECTION_AREA: f64 = 1e-10;

/// Signed area of a simple polygon (shoelace formula).
///
/// Positive for counter-clockwise vertex order; zero for fewer than three
/// vertices.
pub fn polygon_area(poly: &[Point]) -> f64 {
    if poly.len() < 3 {
        return 0.0;
    }
    let mut twice = 0.0;
    for (&a, &b) in poly.iter().circular_tuple_windows::<(_, _)>() {
        twice += a.cross(b);
    }
    0.5 * twice
}

/// Clips a convex polygon against the half-plane to the left of the
/// directed line `a -> b`.
pub fn clip_halfplane(poly: &[Point], a: Point, b: Point) -> Vec<Point> {
    let mut out = Vec::with_capacity(poly.len() + 1);
    if poly.is_empty() {
        return out;
    }
    for (&p, &q) in poly.iter().circular_tuple_windows::<(_, _)>() {
        let dp = orient(a, b, p);
        let dq = orient(a, b, q);
        if dp >= -GEO_TOL {
            out.push(p);
        }
        // Emit the crossing point on a strict sign change.
        if (dp > GEO_TOL && dq < -GEO_TOL) || (dp < -GEO_TOL && dq > GEO_TOL) {
            let t = dp / (dp - dq);
            out.push(p + (q - p) * t);
        }
    }
    out
}

/// Clips a convex polygon against a triangle (any vertex orientation).
///
/// Returns the intersection polygon, or an empty vector when the overlap
/// area is below [`MIN_INTERSECTION_AREA`].
pub fn clip_polygon_triangle(poly: &[Point], tri: [Point; 3]) -> Vec<Point> {
    let tri = ccw(tri);
    let mut current = poly.to_vec();
    for i in 0..3 {
        current = clip_halfplane(&current, tri[i], tri[(i + 1) % 3]);
        if current.len() < 3 {
            return Vec::new();
        }
    }
    if polygon_area(&current).abs() < MIN_INTERSECTION_AREA {
        return Vec::new();
    }
    current
}

/// Intersection polygon of two triangles, empty when they do not overlap
/// with positive area.
pub fn triangle_triangle_intersection(t0: [Point; 3], t1: [Point; 3]) -> Vec<Point> {
    let t0 = ccw(t0);
    clip_polygon_triangle(&t0, t1)
}

/// Whether two triangles overlap with positive area.
#[inline]
pub fn triangles_collide(t0: [Point; 3], t1: [Point; 3]) -> bool {
    !triangle_triangle_intersection(t0, t1).is_empty()
}
