//! Brute-force CPU renderer producing node-identifier images.

#![allow(clippy::cast_precision_loss)]

use scenecam_core::{Camera, CoverageImage, NodeId, Ray, Renderer, SceneQuery};

/// Renders a scene by casting one ray through the center of each pixel and
/// recording the identifier of the nearest node hit.
///
/// Intended for coverage scoring, not display: there is no shading, and
/// resolution is typically kept small because cost is `pixels * triangles`.
#[derive(Debug, Clone, Copy)]
pub struct RayCastRenderer {
    width: usize,
    height: usize,
}

impl RayCastRenderer {
    /// Creates a renderer with a fixed output resolution.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

impl<S: SceneQuery + ?Sized> Renderer<S> for RayCastRenderer {
    fn render(&mut self, camera: &Camera, scene: &S, root: NodeId) -> CoverageImage {
        let mut image = CoverageImage::new(self.width, self.height);
        let right = camera.right();
        let tan_x = camera.xfov.tan();
        let tan_y = camera.yfov.tan();

        for iy in 0..self.height {
            let sy = (2.0 * (iy as f32 + 0.5) / self.height as f32 - 1.0) * tan_y;
            for ix in 0..self.width {
                let sx = (2.0 * (ix as f32 + 0.5) / self.width as f32 - 1.0) * tan_x;
                let direction = camera.towards + sx * right + sy * camera.up;
                let ray = Ray::new(camera.origin, direction);
                if let Some(hit) = scene.intersect_from(root, &ray, 0.0, f32::INFINITY) {
                    image.set_pixel(ix, iy, Some(hit.node));
                }
            }
        }
        image
    }
}
