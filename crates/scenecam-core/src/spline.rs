//! Non-uniform Catmull-Rom splines over 3D keypoints.

use glam::Vec3;

/// A Catmull-Rom spline through keypoints at explicit knot parameters.
///
/// Tangents are finite differences over the neighboring knots, so the curve
/// interpolates every keypoint and is C1 in between. Two keypoints give a
/// straight segment.
#[derive(Debug, Clone)]
pub struct CatmullRom {
    points: Vec<Vec3>,
    knots: Vec<f32>,
}

impl CatmullRom {
    /// Creates a spline through `points` at the given knot parameters.
    ///
    /// # Panics
    /// Panics if fewer than two points are given, the lengths differ, or the
    /// knots are not non-decreasing.
    #[must_use]
    pub fn new(points: Vec<Vec3>, knots: Vec<f32>) -> Self {
        assert!(points.len() >= 2, "spline needs at least 2 keypoints");
        assert_eq!(points.len(), knots.len(), "one knot per keypoint");
        assert!(
            knots.windows(2).all(|w| w[0] <= w[1]),
            "knots must be non-decreasing"
        );
        Self { points, knots }
    }

    /// Parameter of the first keypoint.
    #[must_use]
    pub fn start_parameter(&self) -> f32 {
        self.knots[0]
    }

    /// Parameter of the last keypoint.
    #[must_use]
    pub fn end_parameter(&self) -> f32 {
        self.knots[self.knots.len() - 1]
    }

    /// Number of keypoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; constructors require two keypoints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Evaluates the curve at parameter `u`, clamped to the knot range.
    #[must_use]
    pub fn position(&self, u: f32) -> Vec3 {
        let u = u.clamp(self.start_parameter(), self.end_parameter());

        // Segment index: largest i with knots[i] <= u, capped to the last segment
        let i = self
            .knots
            .partition_point(|k| *k <= u)
            .saturating_sub(1)
            .min(self.points.len() - 2);

        let t0 = self.knots[i];
        let t1 = self.knots[i + 1];
        let h = t1 - t0;
        if h <= f32::EPSILON {
            return self.points[i];
        }
        let s = (u - t0) / h;

        let p0 = self.points[i];
        let p1 = self.points[i + 1];
        let m0 = self.tangent(i);
        let m1 = self.tangent(i + 1);

        // Cubic Hermite basis
        let s2 = s * s;
        let s3 = s2 * s;
        let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
        let h10 = s3 - 2.0 * s2 + s;
        let h01 = -2.0 * s3 + 3.0 * s2;
        let h11 = s3 - s2;
        h00 * p0 + h10 * h * m0 + h01 * p1 + h11 * h * m1
    }

    /// Derivative at keypoint `i` with respect to the knot parameter.
    fn tangent(&self, i: usize) -> Vec3 {
        let last = self.points.len() - 1;
        let (lo, hi) = if i == 0 {
            (0, 1)
        } else if i == last {
            (last - 1, last)
        } else {
            (i - 1, i + 1)
        };
        let dt = self.knots[hi] - self.knots[lo];
        if dt <= f32::EPSILON {
            return Vec3::ZERO;
        }
        (self.points[hi] - self.points[lo]) / dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_are_interpolated() {
        let points = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 2.0, 0.0),
            Vec3::new(3.0, 1.0, 1.0),
        ];
        let spline = CatmullRom::new(points.clone(), vec![0.0, 1.5, 4.0]);
        assert!((spline.position(0.0) - points[0]).length() < 1e-5);
        assert!((spline.position(4.0) - points[2]).length() < 1e-5);
        // Interior keypoints too
        assert!((spline.position(1.5) - points[1]).length() < 1e-5);
    }

    #[test]
    fn test_two_points_give_linear_segment() {
        let spline = CatmullRom::new(
            vec![Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0)],
            vec![0.0, 2.0],
        );
        let mid = spline.position(1.0);
        assert!((mid - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_evaluation_clamps_outside_range() {
        let spline = CatmullRom::new(
            vec![Vec3::ZERO, Vec3::ONE],
            vec![1.0, 2.0],
        );
        assert!((spline.position(0.0) - Vec3::ZERO).length() < 1e-6);
        assert!((spline.position(5.0) - Vec3::ONE).length() < 1e-6);
    }

    #[test]
    fn test_coincident_knots_do_not_blow_up() {
        let spline = CatmullRom::new(
            vec![Vec3::ZERO, Vec3::ZERO, Vec3::ONE],
            vec![0.0, 0.0, 1.0],
        );
        let p = spline.position(0.0);
        assert!(p.is_finite());
    }
}
