//! 2D raster grids mapped onto a world-space rectangle.
//!
//! Supports the operations viewpoint masking needs: triangle rasterization,
//! thresholding, binary erosion, elementwise masking, and world lookups.

#![allow(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss
)]

use glam::Vec2;

/// A scalar grid over an axis-aligned world rectangle.
///
/// Cell `(ix, iy)` covers the world area starting at
/// `world_min + (ix, iy) * spacing`; lookups use the containing cell.
#[derive(Debug, Clone)]
pub struct Grid2 {
    xres: usize,
    yres: usize,
    world_min: Vec2,
    spacing: Vec2,
    values: Vec<f32>,
}

impl Grid2 {
    /// Creates a zero-filled grid of `xres` x `yres` cells spanning the
    /// world rectangle `[world_min, world_max]`.
    ///
    /// # Panics
    /// Panics if either resolution is zero or the rectangle is inverted.
    #[must_use]
    pub fn new(xres: usize, yres: usize, world_min: Vec2, world_max: Vec2) -> Self {
        assert!(xres > 0 && yres > 0, "grid resolution must be positive");
        let extent = world_max - world_min;
        assert!(extent.x > 0.0 && extent.y > 0.0, "world rectangle must have area");
        let spacing = Vec2::new(extent.x / xres as f32, extent.y / yres as f32);
        Self {
            xres,
            yres,
            world_min,
            spacing,
            values: vec![0.0; xres * yres],
        }
    }

    /// Grid width in cells.
    #[must_use]
    pub fn xres(&self) -> usize {
        self.xres
    }

    /// Grid height in cells.
    #[must_use]
    pub fn yres(&self) -> usize {
        self.yres
    }

    /// World-space size of one cell.
    #[must_use]
    pub fn spacing(&self) -> Vec2 {
        self.spacing
    }

    /// Value at cell `(ix, iy)`.
    #[must_use]
    pub fn value(&self, ix: usize, iy: usize) -> f32 {
        self.values[iy * self.xres + ix]
    }

    /// Sets the value at cell `(ix, iy)`.
    pub fn set_value(&mut self, ix: usize, iy: usize, value: f32) {
        self.values[iy * self.xres + ix] = value;
    }

    /// All cell values, row-major.
    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Returns the cell containing a world point, or `None` outside the grid.
    #[must_use]
    pub fn cell_at_world(&self, point: Vec2) -> Option<(usize, usize)> {
        let rel = (point - self.world_min) / self.spacing;
        if rel.x < 0.0 || rel.y < 0.0 {
            return None;
        }
        let (ix, iy) = (rel.x as usize, rel.y as usize);
        (ix < self.xres && iy < self.yres).then_some((ix, iy))
    }

    /// Value at the cell containing a world point; `None` outside the grid.
    #[must_use]
    pub fn world_value(&self, point: Vec2) -> Option<f32> {
        self.cell_at_world(point).map(|(ix, iy)| self.value(ix, iy))
    }

    /// World-space center of cell `(ix, iy)`.
    #[must_use]
    pub fn cell_center(&self, ix: usize, iy: usize) -> Vec2 {
        self.world_min
            + Vec2::new(
                (ix as f32 + 0.5) * self.spacing.x,
                (iy as f32 + 0.5) * self.spacing.y,
            )
    }

    /// Rasterizes a world-space triangle, adding `amount` to every covered
    /// cell at most once.
    ///
    /// Coverage is cell centers inside the triangle, plus every cell the
    /// three edges pass through, so geometry that projects to a sliver (a
    /// wall seen from above) still lands in the grid.
    pub fn rasterize_triangle(&mut self, p0: Vec2, p1: Vec2, p2: Vec2, amount: f32) {
        let mut touched = vec![false; self.values.len()];

        // Edge walk at sub-cell steps
        let step = 0.5 * self.spacing.x.min(self.spacing.y);
        for (a, b) in [(p0, p1), (p1, p2), (p2, p0)] {
            let length = (b - a).length();
            let nsteps = (length / step).ceil().max(1.0) as usize;
            for i in 0..=nsteps {
                let t = i as f32 / nsteps as f32;
                if let Some((ix, iy)) = self.cell_at_world(a.lerp(b, t)) {
                    touched[iy * self.xres + ix] = true;
                }
            }
        }

        // Interior fill over the cell range the triangle's bbox overlaps
        let lo = p0.min(p1).min(p2);
        let hi = p0.max(p1).max(p2);
        let lo_rel = ((lo - self.world_min) / self.spacing).max(Vec2::ZERO);
        let hi_rel = (hi - self.world_min) / self.spacing;
        if (lo_rel.x as usize) < self.xres && (lo_rel.y as usize) < self.yres && hi_rel.x >= 0.0 && hi_rel.y >= 0.0 {
            let ix0 = lo_rel.x as usize;
            let iy0 = lo_rel.y as usize;
            let ix1 = (hi_rel.x as usize).min(self.xres - 1);
            let iy1 = (hi_rel.y as usize).min(self.yres - 1);
            for iy in iy0..=iy1 {
                for ix in ix0..=ix1 {
                    if point_in_triangle(self.cell_center(ix, iy), p0, p1, p2) {
                        touched[iy * self.xres + ix] = true;
                    }
                }
            }
        }

        for (cell, hit) in self.values.iter_mut().zip(&touched) {
            if *hit {
                *cell += amount;
            }
        }
    }

    /// Replaces every value with `hi` if it exceeds `threshold`, else `lo`.
    pub fn threshold(&mut self, threshold: f32, lo: f32, hi: f32) {
        for value in &mut self.values {
            *value = if *value > threshold { hi } else { lo };
        }
    }

    /// Binary erosion: zeroes every positive cell within `radius` cells of a
    /// non-positive cell. Cells outside the grid count as empty, so positive
    /// regions also shrink away from the grid border.
    pub fn erode(&mut self, radius: f32) {
        if radius <= 0.0 {
            return;
        }
        let r = radius.ceil() as isize;
        let r2 = radius * radius;
        let source = self.values.clone();
        let occupied = |ix: isize, iy: isize| -> bool {
            if ix < 0 || iy < 0 {
                return false;
            }
            let (ux, uy) = (ix as usize, iy as usize);
            if ux >= self.xres || uy >= self.yres {
                return false;
            }
            source[uy * self.xres + ux] > 0.5
        };
        for iy in 0..self.yres {
            for ix in 0..self.xres {
                if self.values[iy * self.xres + ix] <= 0.5 {
                    continue;
                }
                let (cx, cy) = (ix as isize, iy as isize);
                'scan: for dy in -r..=r {
                    for dx in -r..=r {
                        let d2 = (dx * dx + dy * dy) as f32;
                        if d2 > r2 {
                            continue;
                        }
                        if !occupied(cx + dx, cy + dy) {
                            self.values[iy * self.xres + ix] = 0.0;
                            break 'scan;
                        }
                    }
                }
            }
        }
    }

    /// Zeroes every cell where `other` is not positive.
    ///
    /// # Panics
    /// Panics if the grids have different resolutions.
    pub fn mask(&mut self, other: &Self) {
        assert_eq!(self.xres, other.xres, "mask resolution mismatch");
        assert_eq!(self.yres, other.yres, "mask resolution mismatch");
        for (value, gate) in self.values.iter_mut().zip(&other.values) {
            if *gate <= 0.5 {
                *value = 0.0;
            }
        }
    }

    /// Number of cells with a positive value.
    #[must_use]
    pub fn positive_count(&self) -> usize {
        self.values.iter().filter(|v| **v > 0.5).count()
    }
}

/// Point-in-triangle test with a small tolerance on the edges.
fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let sign = |p1: Vec2, p2: Vec2, p3: Vec2| (p1 - p3).perp_dot(p2 - p3);
    let d1 = sign(p, a, b);
    let d2 = sign(p, b, c);
    let d3 = sign(p, c, a);
    let has_neg = d1 < -1e-9 || d2 < -1e-9 || d3 < -1e-9;
    let has_pos = d1 > 1e-9 || d2 > 1e-9 || d3 > 1e-9;
    !(has_neg && has_pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_grid() -> Grid2 {
        Grid2::new(10, 10, Vec2::ZERO, Vec2::splat(10.0))
    }

    #[test]
    fn test_world_lookup_in_and_out() {
        let mut grid = square_grid();
        grid.set_value(3, 7, 2.0);
        assert_eq!(grid.world_value(Vec2::new(3.5, 7.5)), Some(2.0));
        assert_eq!(grid.world_value(Vec2::new(0.5, 0.5)), Some(0.0));
        assert_eq!(grid.world_value(Vec2::new(-1.0, 5.0)), None);
        assert_eq!(grid.world_value(Vec2::new(5.0, 11.0)), None);
    }

    #[test]
    fn test_rasterize_fills_interior() {
        let mut grid = square_grid();
        grid.rasterize_triangle(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, 10.0),
            1.0,
        );
        // The lower-left half of the grid is covered
        assert!(grid.value(1, 1) > 0.5);
        assert!(grid.value(2, 5) > 0.5);
        // The far corner is not
        assert!(grid.value(9, 9) < 0.5);
    }

    #[test]
    fn test_rasterize_marks_sliver_edges() {
        let mut grid = square_grid();
        // A degenerate-width "wall" along y = 5
        grid.rasterize_triangle(
            Vec2::new(1.0, 5.0),
            Vec2::new(9.0, 5.0),
            Vec2::new(9.0, 5.01),
            1.0,
        );
        assert!(grid.value(4, 5) > 0.5);
        assert!(grid.value(8, 5) > 0.5);
        assert!(grid.value(4, 8) < 0.5);
    }

    #[test]
    fn test_threshold_is_binary() {
        let mut grid = square_grid();
        grid.set_value(0, 0, 3.0);
        grid.set_value(1, 0, 0.2);
        grid.threshold(0.5, 0.0, 1.0);
        assert_eq!(grid.value(0, 0), 1.0);
        assert_eq!(grid.value(1, 0), 0.0);
        assert!(grid.values().iter().all(|v| *v == 0.0 || *v == 1.0));
    }

    #[test]
    fn test_erode_shrinks_from_border_and_holes() {
        let mut grid = square_grid();
        for iy in 0..10 {
            for ix in 0..10 {
                grid.set_value(ix, iy, 1.0);
            }
        }
        grid.set_value(5, 5, 0.0);
        grid.erode(1.0);
        // Border cells erode (outside counts as empty)
        assert_eq!(grid.value(0, 0), 0.0);
        assert_eq!(grid.value(9, 4), 0.0);
        // Neighbors of the hole erode
        assert_eq!(grid.value(4, 5), 0.0);
        assert_eq!(grid.value(5, 4), 0.0);
        // Cells away from both survive
        assert_eq!(grid.value(2, 2), 1.0);
        assert_eq!(grid.value(7, 7), 1.0);
    }

    #[test]
    fn test_erode_zero_radius_is_noop() {
        let mut grid = square_grid();
        grid.set_value(0, 0, 1.0);
        grid.erode(0.0);
        assert_eq!(grid.value(0, 0), 1.0);
    }

    #[test]
    fn test_mask_intersects() {
        let mut a = square_grid();
        let mut b = square_grid();
        a.set_value(1, 1, 1.0);
        a.set_value(2, 2, 1.0);
        b.set_value(2, 2, 1.0);
        a.mask(&b);
        assert_eq!(a.value(1, 1), 0.0);
        assert_eq!(a.value(2, 2), 1.0);
        assert_eq!(a.positive_count(), 1);
    }
}
