//! Candidate camera generation.
//!
//! Three sampling strategies enumerate camera poses and reduce them through
//! the visibility scorer: object-centric (orbit each scoreable object),
//! wall-centric (sweep along wall segments), and room-centric (scan a room's
//! admissible floor area per azimuth bucket). Each strategy keeps the single
//! best-scoring candidate per reduction unit, with a strictly-greater
//! comparison so the first candidate to reach a score wins ties.

#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use scenecam_core::{
    ancestor_transform, is_object, room_structure, CamGenConfig, Camera, NodeId, NodeKind, Ray,
    Renderer, SceneQuery, WORLD_UP,
};

use crate::mask::ViewpointMask;
use crate::scorer::VisibilityScorer;

/// A wall as a 2D segment with thickness, in world XY coordinates.
#[derive(Debug, Clone, Copy)]
pub struct WallSegment {
    /// One endpoint of the wall's center line.
    pub start: Vec2,
    /// The other endpoint.
    pub end: Vec2,
    /// Wall thickness; viewpoints are offset past it toward the interior.
    pub thickness: f32,
}

/// A room's wall layout for the wall-centric strategy.
#[derive(Debug, Clone)]
pub struct RoomPlan {
    /// The room's scene node.
    pub node: NodeId,
    /// The room's walls.
    pub walls: Vec<WallSegment>,
}

/// One building level: its height and the rooms on it.
///
/// Camera heights accumulate across floors: the first floor's cameras sit at
/// `eye_height`, the next at `eye_height + height`, and so on.
#[derive(Debug, Clone)]
pub struct FloorPlan {
    /// Floor-to-floor height of this level.
    pub height: f32,
    /// Rooms on this level.
    pub rooms: Vec<RoomPlan>,
}

/// Enumerates and scores candidate cameras for a scene.
pub struct CandidateGenerator<'a, S, R> {
    scene: &'a S,
    config: &'a CamGenConfig,
    scorer: VisibilityScorer<'a, S, R>,
    rng: StdRng,
    near: f32,
    far: f32,
}

impl<'a, S: SceneQuery, R: Renderer<S>> CandidateGenerator<'a, S, R> {
    /// Creates a generator over a scene and a rendering backend.
    pub fn new(scene: &'a S, renderer: R, config: &'a CamGenConfig) -> Self {
        let radius = scene.scene_bounds().diagonal_radius();
        Self {
            scene,
            config,
            scorer: VisibilityScorer::new(scene, renderer, config),
            rng: StdRng::seed_from_u64(config.seed),
            near: 0.01 * radius,
            far: 100.0 * radius,
        }
    }

    /// Object-centric strategy: at most one camera per scoreable object,
    /// orbiting its centroid over jittered azimuth buckets.
    pub fn object_cameras(&mut self, out: &mut Vec<Camera>) {
        let xfov = self.config.xfov;
        let yfov = self.config.yfov();
        let clearance = self.config.min_distance_from_obstacle;
        let (nangles, angle_spacing) = azimuth_buckets(self.config.angle_sampling);

        for index in 0..self.scene.node_count() {
            let node = NodeId(index);
            if !is_object(self.scene, node) {
                continue;
            }

            let world = scenecam_core::world_bounds(self.scene, node);
            let centroid = world.centroid();
            let radius = world.diagonal_radius();

            let mut best: Option<Camera> = None;
            for bucket in 0..nangles {
                let angle = (bucket as f32 + self.rng.gen::<f32>()) * angle_spacing;
                let direction2 = rotate2(Vec2::NEG_X, angle);
                let direction = Vec3::new(direction2.x, direction2.y, 0.0);

                let min_distance = radius.max(clearance);
                let max_distance = (1.5 * radius / xfov.tan()).max(clearance);
                let mut viewpoint = centroid - max_distance * direction;

                // Clamp to the eye-height plane above the containing room/floor
                if let Some(floor_z) = self.parent_floor_height(node) {
                    viewpoint.z = floor_z
                        + self.config.eye_height
                        + self.jitter(self.config.eye_height_radius);
                }

                // Pull the viewpoint in front of any occluder on the way out
                let back = (viewpoint - centroid).normalize();
                let ray = Ray::new(centroid, back);
                if let Some(hit) = self.scene.intersect(&ray, min_distance, max_distance) {
                    viewpoint = centroid + (hit.t - clearance) * back;
                }

                let camera = Camera::look_at(
                    viewpoint, centroid, WORLD_UP, xfov, yfov, self.near, self.far,
                );
                let score = self.scorer.object_coverage(&camera, node);
                if score <= 0.0 || score < self.config.min_score {
                    continue;
                }
                if best.as_ref().map_or(true, |b| score > b.value) {
                    best = Some(camera.with_value(score));
                }
            }

            if let Some(mut camera) = best {
                if let Some(name) = self.scene.name(node) {
                    log::debug!("object camera {name}: score {}", camera.value);
                    camera = camera.with_label(name);
                } else {
                    log::debug!("object camera {node}: score {}", camera.value);
                }
                out.push(camera);
            }
        }
    }

    /// Wall-centric strategy: at most one camera per wall segment, swept
    /// along the wall and across interior-facing view angles.
    pub fn wall_cameras(&mut self, floors: &[FloorPlan], out: &mut Vec<Camera>) {
        let xfov = self.config.xfov;
        let yfov = self.config.yfov();
        let clearance = self.config.min_distance_from_obstacle;

        let mut floor_z = self.config.eye_height;
        for floor in floors {
            let camera_z = floor_z;
            floor_z += floor.height;

            for room in &floor.rooms {
                if let Err(error) = room_structure(self.scene, room.node) {
                    log::debug!("skipping wall sweep: {error}");
                    continue;
                }
                let Some((room_min, room_max)) = wall_extent(&room.walls) else {
                    continue;
                };
                let room_center = 0.5 * (room_min + room_max);

                for (wall_index, wall) in room.walls.iter().enumerate() {
                    let span = wall.end - wall.start;
                    let length = span.length();
                    if length <= f32::EPSILON {
                        continue;
                    }
                    let tangent = span / length;
                    let base_normal = Vec2::new(-tangent.y, tangent.x);

                    let npositions = (length / self.config.position_sampling).round() as usize;
                    let position_spacing = if npositions > 1 {
                        length / npositions as f32
                    } else {
                        length
                    };

                    let mut best: Option<Camera> = None;
                    let mut t = 0.5 * position_spacing;
                    while t < length {
                        let on_wall = wall.start + t * tangent;
                        let mut normal = base_normal;
                        if (room_center - on_wall).dot(normal) < 0.0 {
                            normal = -normal;
                        }
                        let position = on_wall + (wall.thickness + clearance) * normal;
                        t += position_spacing;
                        if position.x < room_min.x
                            || position.y < room_min.y
                            || position.x > room_max.x
                            || position.y > room_max.y
                        {
                            continue;
                        }

                        // Sweep the interior-facing half circle, keeping the
                        // frustum edge off the wall
                        let angle_range = PI - 2.0 * xfov;
                        let nangles = (angle_range / self.config.angle_sampling).round() as usize;
                        let angle_spacing = if nangles > 1 {
                            angle_range / nangles as f32
                        } else {
                            angle_range
                        };
                        let mut a = xfov + 0.5 * angle_spacing;
                        while a < PI - xfov {
                            let jittered = (a + self.jitter(0.5 * angle_spacing))
                                .clamp(xfov, PI - xfov);
                            let direction = rotate2(normal, jittered - FRAC_PI_2);
                            a += angle_spacing;

                            let z = camera_z + self.jitter(self.config.eye_height_radius);
                            let viewpoint = Vec3::new(position.x, position.y, z);
                            let towards = Vec3::new(
                                direction.x,
                                direction.y,
                                -self.config.downward_pitch,
                            );
                            let camera = Camera::new(
                                viewpoint, towards, WORLD_UP, xfov, yfov, self.near, self.far,
                            );
                            let score = self.scorer.scene_coverage(&camera, room.node);
                            if score <= 0.0 || score < self.config.min_score {
                                continue;
                            }
                            if best.as_ref().map_or(true, |b| score > b.value) {
                                best = Some(camera.with_value(score));
                            }
                        }
                    }

                    if let Some(camera) = best {
                        let label = match self.scene.name(room.node) {
                            Some(name) => format!("{name}_{wall_index}"),
                            None => format!("{}_{wall_index}", room.node),
                        };
                        log::debug!("wall camera {label}: score {}", camera.value);
                        out.push(camera.with_label(label));
                    }
                }
            }
        }
    }

    /// Room-centric strategy: at most one camera per (room, azimuth bucket),
    /// scanning the room's admissible floor area.
    pub fn room_cameras(&mut self, out: &mut Vec<Camera>) {
        let xfov = self.config.xfov;
        let yfov = self.config.yfov();
        let (nangles, angle_spacing) = azimuth_buckets(self.config.angle_sampling);
        let step = self.config.position_sampling;

        for index in 0..self.scene.node_count() {
            let room = NodeId(index);
            if NodeKind::classify(self.scene.name(room)) != NodeKind::Room {
                continue;
            }

            let bounds = scenecam_core::world_bounds(self.scene, room);
            let z = bounds.min.z
                + self.config.eye_height
                + self.jitter(self.config.eye_height_radius);
            if z > bounds.max.z {
                log::debug!("skipping room {room}: eye plane above ceiling");
                continue;
            }

            let mask = match ViewpointMask::build(
                self.scene,
                room,
                self.config.min_distance_from_obstacle,
            ) {
                Ok(mask) => mask,
                Err(error) => {
                    log::debug!("skipping room {room}: {error}");
                    continue;
                }
            };

            for bucket in 0..nangles {
                let mut best: Option<Camera> = None;

                let mut y = bounds.min.y;
                while y <= bounds.max.y {
                    let mut x = bounds.min.x;
                    while x <= bounds.max.x {
                        let position = Vec2::new(
                            x + step * self.rng.gen::<f32>(),
                            y + step * self.rng.gen::<f32>(),
                        );
                        x += step;
                        if !mask.allows(position) {
                            continue;
                        }

                        let angle = (bucket as f32 + self.rng.gen::<f32>()) * angle_spacing;
                        let direction = rotate2(Vec2::X, angle);
                        let viewpoint = Vec3::new(position.x, position.y, z);
                        let towards = Vec3::new(
                            direction.x,
                            direction.y,
                            -self.config.downward_pitch,
                        );
                        let camera = Camera::new(
                            viewpoint, towards, WORLD_UP, xfov, yfov, self.near, self.far,
                        );
                        let score = self.scorer.scene_coverage(&camera, room);
                        if score <= 0.0 || score < self.config.min_score {
                            continue;
                        }
                        if best.as_ref().map_or(true, |b| score > b.value) {
                            best = Some(camera.with_value(score));
                        }
                    }
                    y += step;
                }

                if let Some(camera) = best {
                    let label = match self.scene.name(room) {
                        Some(name) => format!("{name}_{bucket}"),
                        None => format!("{room}_{bucket}"),
                    };
                    log::debug!("room camera {label}: score {}", camera.value);
                    out.push(camera.with_label(label));
                }
            }
        }
    }

    /// Floor height (world z) under a node whose parent is a room or floor
    /// context, per the indoor naming convention.
    fn parent_floor_height(&self, node: NodeId) -> Option<f32> {
        let parent = self.scene.parent(node)?;
        let name = self.scene.name(parent)?;
        if !name.contains("Room") && !name.contains("Floor") {
            return None;
        }
        let bounds = self.scene.bounds(parent);
        let mut floor_point = bounds.centroid();
        floor_point.z = bounds.min.z;
        let to_world = ancestor_transform(self.scene, parent);
        Some(to_world.transform_point3(floor_point).z)
    }

    /// Uniform jitter in `[-radius, radius]`.
    fn jitter(&mut self, radius: f32) -> f32 {
        (2.0 * self.rng.gen::<f32>() - 1.0) * radius
    }
}

/// Partitions the azimuth circle at the given angular spacing.
///
/// Returns the bucket count and the spacing between buckets; the count
/// rounds to zero (no candidates at all) once the requested spacing exceeds
/// twice the circle.
fn azimuth_buckets(angle_sampling: f32) -> (usize, f32) {
    let nangles = (TAU / angle_sampling).round() as usize;
    let spacing = if nangles > 1 { TAU / nangles as f32 } else { TAU };
    (nangles, spacing)
}

/// Rotates a 2D vector counter-clockwise.
fn rotate2(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(cos * v.x - sin * v.y, sin * v.x + cos * v.y)
}

/// XY extent of a room's wall endpoints; `None` without walls.
fn wall_extent(walls: &[WallSegment]) -> Option<(Vec2, Vec2)> {
    let mut min = Vec2::splat(f32::INFINITY);
    let mut max = Vec2::splat(f32::NEG_INFINITY);
    for wall in walls {
        min = min.min(wall.start).min(wall.end);
        max = max.max(wall.start).max(wall.end);
    }
    (min.x <= max.x).then_some((min, max))
}
