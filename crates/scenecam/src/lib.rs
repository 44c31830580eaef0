//! Camera viewpoint synthesis for indoor scenes.
//!
//! Given a scene graph exposed through [`SceneQuery`], the pipeline proposes
//! candidate viewpoints around objects, along walls, and inside rooms, scores
//! each candidate by what it can actually see, keeps the best candidate per
//! angular bucket, and finally either sorts the survivors or resamples them
//! into a smooth trajectory.
//!
//! The usual entry point is [`generate_cameras`]; the individual stages
//! ([`CandidateGenerator`], [`VisibilityScorer`], [`ViewpointMask`],
//! [`interpolate_trajectory`]) are public for callers that want to run or
//! tune a single strategy.

#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod generate;
pub mod mask;
pub mod ordering;
pub mod raycast;
pub mod scorer;
pub mod trajectory;

pub use generate::{CandidateGenerator, FloorPlan, RoomPlan, WallSegment};
pub use mask::ViewpointMask;
pub use ordering::sort_cameras;
pub use raycast::RayCastRenderer;
pub use scorer::VisibilityScorer;
pub use trajectory::interpolate_trajectory;

pub use scenecam_core::{
    yfov_for, CamGenConfig, Camera, CameraOrdering, NodeId, NodeKind, Renderer, Result,
    SceneQuery, SceneScoringMethod, ScenecamError, WORLD_UP,
};

/// Runs every strategy enabled in the configuration and post-processes the
/// combined camera list.
///
/// Wall candidates need precomputed floor plans; pass an empty slice when
/// wall cameras are disabled or no plans are available. With
/// `interpolate_trajectory` set, the combined list is resampled into a
/// smooth path in generation order; otherwise it is sorted with the
/// configured ordering.
///
/// # Errors
/// Propagates `InsufficientKeypoints` when trajectory interpolation is
/// requested but fewer than two cameras survive scoring.
pub fn generate_cameras<S: SceneQuery, R: Renderer<S>>(
    scene: &S,
    renderer: R,
    floors: &[FloorPlan],
    config: &CamGenConfig,
) -> Result<Vec<Camera>> {
    let mut generator = CandidateGenerator::new(scene, renderer, config);
    let mut cameras = Vec::new();

    if config.create_object_cameras {
        generator.object_cameras(&mut cameras);
    }
    if config.create_wall_cameras {
        generator.wall_cameras(floors, &mut cameras);
    }
    if config.create_room_cameras {
        generator.room_cameras(&mut cameras);
    }
    log::info!("generated {} candidate cameras", cameras.len());

    if config.interpolate_trajectory {
        interpolate_trajectory(&cameras, config.trajectory_step)
    } else {
        sort_cameras(&mut cameras, config.ordering);
        Ok(cameras)
    }
}
