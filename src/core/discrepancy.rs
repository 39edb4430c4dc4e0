//! Star discrepancy of a 2D point set.
//!
//! For *N* points in the unit square the estimate is
//!
//! ```text
//! D* = max_i | #{ j : p_j <= p_i } / N - u_i * v_i |
//! ```
//!
//! where `p_j <= p_i` is the componentwise comparison. Only the corner
//! boxes anchored at the sample points themselves are visited, which
//! makes this an all-pairs O(N^2) loop. That is fine for the few
//! thousand points an interactive diagnostic deals with.

// viewpoints
use crate::core::geometry::PointSet;

/// Returns 0 for an empty point set.
pub fn star_discrepancy(points: &PointSet) -> f64 {
    let n: usize = points.len();
    if n == 0 {
        return 0.0_f64;
    }
    let inv_n: f64 = 1.0_f64 / n as f64;
    let mut max_discrepancy: f64 = 0.0_f64;
    for corner in points {
        let count: usize = points.iter().filter(|p| p.dominated_by(corner)).count();
        let volume: f64 = corner.x as f64 * corner.y as f64;
        let discrepancy: f64 = (count as f64 * inv_n - volume).abs();
        if discrepancy > max_discrepancy {
            max_discrepancy = discrepancy;
        }
    }
    max_discrepancy
}
