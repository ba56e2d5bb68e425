//! Axis-aligned bounding boxes and a binary bounding-box tree.
//!
//! The tree is the broad phase of the multimesh build: it prunes the
//! candidate cell pairs before the exact intersection predicates run.
//! Leaves hold one entity index each; inner nodes split their entities at
//! the median centroid along the longest axis.

use super::point::Point;
use super::predicates::GEO_TOL;

/// A closed axis-aligned rectangle.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    /// The box spanning exactly the given corner points.
    pub fn new(min: Point, max: Point) -> Self {
        debug_assert!(min.x <= max.x && min.y <= max.y);
        Self { min, max }
    }

    /// The smallest box containing all `points`; `None` for an empty iterator.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut it = points.into_iter();
        let first = it.next()?;
        let mut bbox = Self::new(first, first);
        for p in it {
            bbox.expand(p);
        }
        Some(bbox)
    }

    /// Grows the box to contain `p`.
    pub fn expand(&mut self, p: Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// The smallest box containing both `self` and `other`.
    pub fn union(&self, other: &Self) -> Self {
        let mut out = *self;
        out.expand(other.min);
        out.expand(other.max);
        out
    }

    /// Whether the two closed boxes overlap, within [`GEO_TOL`].
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min.x <= other.max.x + GEO_TOL
            && other.min.x <= self.max.x + GEO_TOL
            && self.min.y <= other.max.y + GEO_TOL
            && other.min.y <= self.max.y + GEO_TOL
    }

    /// Whether `p` lies inside the closed box, within [`GEO_TOL`].
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x - GEO_TOL
            && p.x <= self.max.x + GEO_TOL
            && p.y >= self.min.y - GEO_TOL
            && p.y <= self.max.y + GEO_TOL
    }

    /// Center of the box.
    #[inline]
    pub fn centroid(&self) -> Point {
        self.min.midpoint(self.max)
    }

    /// 0 if the box is at least as wide as tall, 1 otherwise.
    #[inline]
    pub fn longest_axis(&self) -> usize {
        if self.max.x - self.min.x >= self.max.y - self.min.y {
            0
        } else {
            1
        }
    }
}

#[derive(Clone, Debug)]
enum NodeKind {
    /// Entity index.
    Leaf(usize),
    /// Child node indices.
    Inner(usize, usize),
}

#[derive(Clone, Debug)]
struct Node {
    bbox: BoundingBox,
    kind: NodeKind,
}

/// Binary tree over entity bounding boxes.
#[derive(Clone, Debug, Default)]
pub struct BoundingBoxTree {
    nodes: Vec<Node>,
    root: Option<usize>,
}

impl BoundingBoxTree {
    /// Builds the tree over the given per-entity boxes.
    ///
    /// Entity `i` is identified by its index into `boxes`; an empty slice
    /// yields an empty tree that reports no collisions.
    pub fn build(boxes: &[BoundingBox]) -> Self {
        let mut tree = Self::default();
        if boxes.is_empty() {
            return tree;
        }
        let mut order: Vec<usize> = (0..boxes.len()).collect();
        tree.root = Some(tree.build_recursive(boxes, &mut order));
        tree
    }

    fn build_recursive(&mut self, boxes: &[BoundingBox], entities: &mut [usize]) -> usize {
        debug_assert!(!entities.is_empty());
        if entities.len() == 1 {
            let e = entities[0];
            self.nodes.push(Node {
                bbox: boxes[e],
                kind: NodeKind::Leaf(e),
            });
            return self.nodes.len() - 1;
        }

        // Split at the median centroid along the longest axis of the
        // centroid cloud, so duplicate boxes still split evenly.
        let cloud = BoundingBox::from_points(entities.iter().map(|&e| boxes[e].centroid()))
            .expect("non-empty entity set");
        let axis = cloud.longest_axis();
        let key = |e: usize| {
            let c = boxes[e].centroid();
            if axis == 0 { c.x } else { c.y }
        };
        entities.sort_by(|&a, &b| key(a).total_cmp(&key(b)).then(a.cmp(&b)));
        let mid = entities.len() / 2;
        let (lo, hi) = entities.split_at_mut(mid);
        let left = self.build_recursive(boxes, lo);
        let right = self.build_recursive(boxes, hi);
        let bbox = self.nodes[left].bbox.union(&self.nodes[right].bbox);
        self.nodes.push(Node {
            bbox,
            kind: NodeKind::Inner(left, right),
        });
        self.nodes.len() - 1
    }

    /// Whether the tree holds no entities.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Entity indices whose boxes overlap `bbox`, in ascending order.
    pub fn compute_collisions_box(&self, bbox: &BoundingBox) -> Vec<usize> {
        let mut out = Vec::new();
        if let Some(root) = self.root {
            let mut stack = vec![root];
            while let Some(n) = stack.pop() {
                let node = &self.nodes[n];
                if !node.bbox.overlaps(bbox) {
                    continue;
                }
                match node.kind {
                    NodeKind::Leaf(e) => out.push(e),
                    NodeKind::Inner(l, r) => {
                        stack.push(l);
                        stack.push(r);
                    }
                }
            }
        }
        out.sort_unstable();
        out
    }

    /// All entity index pairs `(self_entity, other_entity)` whose boxes
    /// overlap, sorted lexicographically.
    pub fn compute_collisions(&self, other: &BoundingBoxTree) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        let (Some(a), Some(b)) = (self.root, other.root) else {
            return out;
        };
        let mut stack = vec![(a, b)];
        while let Some((na, nb)) = stack.pop() {
            let node_a = &self.nodes[na];
            let node_b = &other.nodes[nb];
            if !node_a.bbox.overlaps(&node_b.bbox) {
                continue;
            }
            match (&node_a.kind, &node_b.kind) {
                (NodeKind::Leaf(ea), NodeKind::Leaf(eb)) => out.push((*ea, *eb)),
                (NodeKind::Leaf(_), NodeKind::Inner(l, r)) => {
                    stack.push((na, *l));
                    stack.push((na, *r));
                }
                (NodeKind::Inner(l, r), _) => {
                    stack.push((*l, nb));
                    stack.push((*r, nb));
                }
            }
        }
        out.sort_unstable();
        out
    }
}
