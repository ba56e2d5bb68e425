//! Planar geometry kernel: points, predicates, bounding volumes, clipping.
//!
//! Everything the multimesh build pass needs from geometry lives here, in
//! broad-phase/narrow-phase order: [`bounding_box`] prunes candidate pairs,
//! [`predicates`] and [`intersection`] decide them exactly.

pub mod bounding_box;
pub mod intersection;
pub mod point;
pub mod predicates;

pub use bounding_box::{BoundingBox, BoundingBoxTree};
pub use intersection::{
    clip_halfplane, clip_polygon_triangle, polygon_area, triangle_triangle_intersection,
    triangles_collide,
};
pub use point::Point;
pub use predicates::{
    GEO_TOL, ccw, orient, point_in_triangle, segment_intersects_interior, segments_intersect,
    signed_area, triangle_area,
};
