//! The diagnostics only ever deal with the unit square, so the
//! geometric classes shrink to a 2D point and an ordered set of them.
//!
//! # Points
//!
//! A **Point2f** holds the two coordinates (u, v) of one sample. The
//! first coordinate comes from the sequence dimension chosen for the
//! horizontal axis, the second from the one chosen for the vertical
//! axis.
//!
//! # Point Sets
//!
//! A **PointSet** keeps the samples in generation order: index *i*
//! holds the *i*-th sample of the underlying sequence. Progressive
//! sequences depend on that order, so nothing in this crate ever sorts
//! or deduplicates a point set.
//!
//! ```rust
//! use viewpoints::core::geometry::{Point2f, PointSet};
//!
//!     let points = PointSet::from_axes(&[0.25, 0.75], &[0.5, 0.125]);
//!     assert_eq!(points.len(), 2);
//!     assert_eq!(points[1], Point2f { x: 0.75, y: 0.125 });
//! ```

// std
use std::ops::Index;
// viewpoints
use crate::core::viewpoints::Float;

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Point2f {
    pub x: Float,
    pub y: Float,
}

impl Point2f {
    pub fn has_nans(&self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }
    /// Both coordinates lie in the half-open unit interval [0, 1).
    pub fn inside_unit_square(&self) -> bool {
        self.x >= 0.0 as Float && self.x < 1.0 as Float && self.y >= 0.0 as Float && self.y < 1.0 as Float
    }
    /// Componentwise *self <= other*, the corner box test.
    pub fn dominated_by(&self, other: &Point2f) -> bool {
        self.x <= other.x && self.y <= other.y
    }
}

impl From<(Float, Float)> for Point2f {
    fn from(uv: (Float, Float)) -> Self {
        Point2f { x: uv.0, y: uv.1 }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct PointSet {
    pub points: Vec<Point2f>,
}

impl PointSet {
    pub fn new(points: Vec<Point2f>) -> Self {
        PointSet { points }
    }
    /// Zips two coordinate axes pairwise. Both axes are expected to have
    /// the same length, surplus values of the longer one are ignored.
    pub fn from_axes(u: &[Float], v: &[Float]) -> Self {
        debug_assert_eq!(u.len(), v.len());
        let points: Vec<Point2f> = u
            .iter()
            .zip(v.iter())
            .map(|(x, y)| Point2f { x: *x, y: *y })
            .collect();
        PointSet { points }
    }
    pub fn len(&self) -> usize {
        self.points.len()
    }
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
    pub fn iter(&self) -> std::slice::Iter<Point2f> {
        self.points.iter()
    }
    /// The samples as plain coordinate pairs, in generation order.
    pub fn to_pairs(&self) -> Vec<(Float, Float)> {
        self.points.iter().map(|p| (p.x, p.y)).collect()
    }
}

impl Index<usize> for PointSet {
    type Output = Point2f;
    fn index(&self, index: usize) -> &Point2f {
        &self.points[index]
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point2f;
    type IntoIter = std::slice::Iter<'a, Point2f>;
    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl From<Vec<(Float, Float)>> for PointSet {
    fn from(pairs: Vec<(Float, Float)>) -> Self {
        PointSet {
            points: pairs.into_iter().map(Point2f::from).collect(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn from_axes_keeps_generation_order() {
        let u = [0.5, 0.25, 0.75];
        let v = [0.1, 0.2, 0.3];
        let points = PointSet::from_axes(&u, &v);
        assert_eq!(
            points.to_pairs(),
            vec![(0.5, 0.1), (0.25, 0.2), (0.75, 0.3)]
        );
    }

    #[test]
    fn unit_square_is_half_open() {
        assert!(Point2f { x: 0.0, y: 0.0 }.inside_unit_square());
        assert!(!Point2f { x: 1.0, y: 0.5 }.inside_unit_square());
        assert!(!Point2f { x: 0.5, y: -0.01 }.inside_unit_square());
    }

    #[test]
    fn corner_box_test_is_inclusive() {
        let p = Point2f { x: 0.5, y: 0.5 };
        assert!(p.dominated_by(&p));
        assert!(Point2f { x: 0.1, y: 0.5 }.dominated_by(&p));
        assert!(!Point2f { x: 0.1, y: 0.6 }.dominated_by(&p));
    }
}
