//! Visibility scoring for candidate cameras.
//!
//! Two modes: object coverage (fraction of sampled surface points visible
//! from the camera) and scene coverage (statistics over a rendered
//! node-identifier image). Both return 0 to reject a candidate.

#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use std::collections::HashMap;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use scenecam_core::{
    is_object, world_transform, CamGenConfig, Camera, NodeId, Ray, Renderer, SceneQuery,
    SceneScoringMethod,
};

/// Target number of surface samples per object.
const TARGET_SAMPLES: usize = 512;
/// Hard cap on surface samples per object.
const MAX_SAMPLES: usize = 1024;
/// Distance tolerance for deciding a ray reached the sampled point.
const HIT_TOLERANCE: f32 = 0.01;

/// Scores candidate cameras against single objects or whole rooms.
///
/// Surface sample sets are memoized per node id, so calls for different
/// targets may be freely interleaved; the map only grows with the number of
/// distinct objects scored.
pub struct VisibilityScorer<'a, S, R> {
    scene: &'a S,
    renderer: R,
    config: &'a CamGenConfig,
    rng: StdRng,
    surface_samples: HashMap<NodeId, Vec<Vec3>>,
}

impl<'a, S: SceneQuery, R: Renderer<S>> VisibilityScorer<'a, S, R> {
    /// Creates a scorer over a scene and a rendering backend.
    pub fn new(scene: &'a S, renderer: R, config: &'a CamGenConfig) -> Self {
        Self {
            scene,
            renderer,
            config,
            rng: StdRng::seed_from_u64(config.seed ^ 0x5c0_4e4), // decorrelate from generator jitter
            surface_samples: HashMap::new(),
        }
    }

    /// Fraction of the target object's surface visible from the camera,
    /// in `[0, 1]`. Zero for degenerate (area-less) targets.
    pub fn object_coverage(&mut self, camera: &Camera, node: NodeId) -> f32 {
        if !self.surface_samples.contains_key(&node) {
            let samples = self.sample_surface(node);
            self.surface_samples.insert(node, samples);
        }
        let points = &self.surface_samples[&node];
        if points.is_empty() {
            return 0.0;
        }

        let mut nvisible = 0usize;
        for point in points {
            let ray = Ray::between(camera.origin, *point);
            let max_t = camera.origin.distance(*point) + HIT_TOLERANCE;
            if let Some(hit) = self.scene.intersect(&ray, 0.0, max_t) {
                if hit.node == node && (hit.t - max_t).abs() <= HIT_TOLERANCE {
                    nvisible += 1;
                }
            }
        }
        nvisible as f32 / points.len() as f32
    }

    /// Scene-coverage score for the subtree under `root`, in `[0, inf)`.
    ///
    /// Renders a node-id image, counts per-node pixel footprints, and
    /// aggregates over qualifying objects with the configured method. Zero
    /// unless strictly more than `min_visible_objects` objects qualify.
    pub fn scene_coverage(&mut self, camera: &Camera, root: NodeId) -> f32 {
        let max_pixels = self.config.width * self.config.height;
        if max_pixels == 0 {
            return 0.0;
        }
        let min_pixels = (self.config.min_visible_fraction * max_pixels as f32) as usize;
        if min_pixels == 0 {
            return 0.0;
        }

        let image = self.renderer.render(camera, self.scene, root);
        let counts = image.node_pixel_counts(self.scene.node_count());

        let mut object_count = 0usize;
        let mut pixel_total = 0usize;
        let mut log_sum = 0.0f32;
        for (index, count) in counts.iter().enumerate() {
            if *count <= min_pixels || !is_object(self.scene, NodeId(index)) {
                continue;
            }
            object_count += 1;
            pixel_total += count;
            log_sum += (*count as f32 / min_pixels as f32).ln();
        }

        if object_count <= self.config.min_visible_objects {
            return 0.0;
        }
        match self.config.scene_scoring_method {
            SceneScoringMethod::Count => {
                object_count as f32 * pixel_total as f32 / max_pixels as f32
            }
            SceneScoringMethod::LogSum => log_sum,
        }
    }

    /// Generates area-weighted surface samples for a node in world space.
    ///
    /// Expected samples per triangle are proportional to its area; the
    /// fractional remainder is resolved by one Bernoulli draw per triangle
    /// to keep the weighting unbiased. Empty for zero-area nodes.
    fn sample_surface(&mut self, node: NodeId) -> Vec<Vec3> {
        let transform = world_transform(self.scene, node);
        let triangles: Vec<_> = self
            .scene
            .triangles(node)
            .iter()
            .map(|t| t.transformed(&transform))
            .collect();

        let total_area: f32 = triangles.iter().map(scenecam_core::Triangle::area).sum();
        if total_area <= f32::EPSILON {
            log::debug!("node {node} has zero surface area, no samples");
            return Vec::new();
        }

        let mut points = Vec::new();
        'triangles: for triangle in &triangles {
            let expected = TARGET_SAMPLES as f32 * triangle.area() / total_area;
            let mut nsamples = expected as usize;
            if self.rng.gen::<f32>() < expected - nsamples as f32 {
                nsamples += 1;
            }
            for _ in 0..nsamples {
                if points.len() >= MAX_SAMPLES {
                    break 'triangles;
                }
                points
                    .push(triangle.point_from_barycentric_samples(self.rng.gen(), self.rng.gen()));
            }
        }
        points
    }
}
