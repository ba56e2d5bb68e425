//! Quadrature rules on triangles and convex polygons.
//!
//! Reference rules live on the unit right triangle `(0,0), (1,0), (0,1)`
//! with weights summing to one; mapping to a physical triangle scales the
//! weights by the triangle's signed area. Negative weights are meaningful:
//! the multimesh build uses them to subtract overlapped regions from
//! cut-cell rules.

use once_cell::sync::Lazy;

use crate::geometry::{Point, signed_area};
use crate::mesh_error::MultiMeshError;

/// Points and matching weights of a quadrature rule.
///
/// The sum of the weights is the (signed) measure of the integration
/// region the rule was built for.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct QuadratureRule {
    pub points: Vec<Point>,
    pub weights: Vec<f64>,
}

impl QuadratureRule {
    /// An empty rule (zero measure).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of quadrature points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the rule has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sum of the weights.
    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Appends all points and weights of `other`.
    pub fn extend(&mut self, other: &QuadratureRule) {
        self.points.extend_from_slice(&other.points);
        self.weights.extend_from_slice(&other.weights);
    }
}

struct ReferenceRule {
    degree: usize,
    points: &'static [[f64; 2]],
    weights: &'static [f64],
}

/// Rules exact for polynomials up to the stated degree on the reference
/// triangle. Degree 2 is the classical three-midpoint rule.
static REFERENCE_TRIANGLE_RULES: Lazy<Vec<ReferenceRule>> = Lazy::new(|| {
    vec![
        ReferenceRule {
            degree: 1,
            points: &[[1.0 / 3.0, 1.0 / 3.0]],
            weights: &[1.0],
        },
        ReferenceRule {
            degree: 2,
            points: &[[0.5, 0.0], [0.5, 0.5], [0.0, 0.5]],
            weights: &[1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0],
        },
    ]
});

fn reference_rule(degree: usize) -> Result<&'static ReferenceRule, MultiMeshError> {
    REFERENCE_TRIANGLE_RULES
        .iter()
        .find(|r| r.degree >= degree)
        .ok_or(MultiMeshError::UnsupportedQuadratureDegree(degree))
}

/// Quadrature rule over the triangle `(a, b, c)`, scaled by `scale`.
///
/// The weights sum to `scale` times the triangle's signed area, so a
/// clockwise triangle or a negative `scale` yields a subtracting rule.
pub fn triangle_rule(
    tri: [Point; 3],
    degree: usize,
    scale: f64,
) -> Result<QuadratureRule, MultiMeshError> {
    let rule = reference_rule(degree)?;
    let [a, b, c] = tri;
    let area = signed_area(a, b, c);
    let mut out = QuadratureRule {
        points: Vec::with_capacity(rule.points.len()),
        weights: Vec::with_capacity(rule.weights.len()),
    };
    for (p, w) in rule.points.iter().zip(rule.weights) {
        let [r, s] = *p;
        out.points.push(a + (b - a) * r + (c - a) * s);
        out.weights.push(w * area * scale);
    }
    Ok(out)
}

/// Quadrature rule over a convex polygon via fan triangulation from its
/// first vertex, scaled by `scale`.
///
/// Polygons with fewer than three vertices yield the empty rule.
pub fn polygon_rule(
    poly: &[Point],
    degree: usize,
    scale: f64,
) -> Result<QuadratureRule, MultiMeshError> {
    let mut out = QuadratureRule::empty();
    if poly.len() < 3 {
        return Ok(out);
    }
    for i in 1..poly.len() - 1 {
        let tri = [poly[0], poly[i], poly[i + 1]];
        out.extend(&triangle_rule(tri, degree, scale)?);
    }
    Ok(out)
}
