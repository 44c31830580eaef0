//! Configuration for camera generation, scoring, and trajectory smoothing.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use crate::camera::yfov_for;

/// All knobs of the camera-generation pipeline.
///
/// A config is an immutable value passed into the generator, scorer, and
/// mask builder; nothing reads process-wide state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CamGenConfig {
    /// Rendered image width in pixels.
    pub width: usize,
    /// Rendered image height in pixels.
    pub height: usize,

    /// Half horizontal field of view, radians.
    pub xfov: f32,
    /// Camera height above the floor.
    pub eye_height: f32,
    /// Uniform jitter radius applied to the eye height.
    pub eye_height_radius: f32,

    /// Linear spacing between sampled viewpoint positions.
    pub position_sampling: f32,
    /// Angular spacing between sampled view directions, radians.
    pub angle_sampling: f32,
    /// Curve-parameter step for trajectory resampling.
    pub trajectory_step: f32,

    /// A viewpoint qualifies only if strictly more than this many distinct
    /// objects are visible.
    pub min_visible_objects: usize,
    /// An object qualifies only if it covers more than this fraction of the
    /// image.
    pub min_visible_fraction: f32,
    /// Minimum clearance between a viewpoint and any obstacle.
    pub min_distance_from_obstacle: f32,
    /// Candidates scoring below this are discarded.
    pub min_score: f32,
    /// How scene-coverage scores are aggregated.
    pub scene_scoring_method: SceneScoringMethod,

    /// Enable the object-centric strategy.
    pub create_object_cameras: bool,
    /// Enable the wall-centric strategy.
    pub create_wall_cameras: bool,
    /// Enable the room-centric strategy.
    pub create_room_cameras: bool,
    /// Resample the selected cameras into a smooth trajectory instead of
    /// sorting them.
    pub interpolate_trajectory: bool,
    /// Ordering applied when trajectory interpolation is off.
    pub ordering: CameraOrdering,

    /// Fixed downward component mixed into wall/room view directions before
    /// normalization. Heuristic, tunable.
    pub downward_pitch: f32,
    /// Seed for all sampling jitter; fixed seed gives reproducible output.
    pub seed: u64,
}

impl Default for CamGenConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            xfov: 0.5,
            eye_height: 1.55,
            eye_height_radius: 0.05,
            position_sampling: 0.25,
            angle_sampling: PI / 3.0,
            trajectory_step: 0.1,
            min_visible_objects: 3,
            min_visible_fraction: 0.01,
            min_distance_from_obstacle: 0.1,
            min_score: 0.0,
            scene_scoring_method: SceneScoringMethod::default(),
            create_object_cameras: false,
            create_wall_cameras: false,
            create_room_cameras: true,
            interpolate_trajectory: false,
            ordering: CameraOrdering::default(),
            downward_pitch: 0.2,
            seed: 0,
        }
    }
}

impl CamGenConfig {
    /// Config tuned for object-centric generation (denser angle sweep).
    #[must_use]
    pub fn for_object_cameras() -> Self {
        Self {
            create_object_cameras: true,
            create_room_cameras: false,
            angle_sampling: PI / 6.0,
            ..Self::default()
        }
    }

    /// Config tuned for wall-centric generation.
    #[must_use]
    pub fn for_wall_cameras() -> Self {
        Self {
            create_wall_cameras: true,
            create_room_cameras: false,
            angle_sampling: PI / 3.0,
            ..Self::default()
        }
    }

    /// Config tuned for room-centric generation (four azimuth buckets).
    #[must_use]
    pub fn for_room_cameras() -> Self {
        Self {
            create_room_cameras: true,
            angle_sampling: PI / 2.0,
            ..Self::default()
        }
    }

    /// Image aspect ratio (height / width).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn aspect(&self) -> f32 {
        self.height as f32 / self.width as f32
    }

    /// Half vertical field of view derived from `xfov` and the aspect ratio.
    #[must_use]
    pub fn yfov(&self) -> f32 {
        yfov_for(self.xfov, self.aspect())
    }
}

/// Aggregation method for the scene-coverage score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SceneScoringMethod {
    /// Qualifying-object count times their total pixel footprint, normalized
    /// by the image size.
    #[default]
    Count,
    /// Sum of log pixel footprints relative to the qualification threshold.
    LogSum,
}

/// Total order applied to the final camera list when no trajectory is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CameraOrdering {
    /// Best score first; ties broken by label, then insertion order.
    #[default]
    ScoreDescending,
    /// Lexicographic by label; unlabeled cameras last.
    LabelAscending,
    /// Keep generation order.
    Unsorted,
}
