//! Camera poses with an orthonormal viewing frame.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// World up direction for indoor scenes (Z-up convention).
pub const WORLD_UP: Vec3 = Vec3::Z;

/// A camera pose with intrinsics and a quality score.
///
/// `towards`, `up`, and `right()` always form a right-handed orthonormal
/// basis; the constructors re-orthonormalize whatever they are given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Viewpoint position in world space.
    pub origin: Vec3,
    /// Unit view direction.
    pub towards: Vec3,
    /// Unit up direction, orthogonal to `towards`.
    pub up: Vec3,
    /// Half horizontal field of view, radians.
    pub xfov: f32,
    /// Half vertical field of view, radians.
    pub yfov: f32,
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
    /// Quality score assigned by a scorer (0 = unscored or rejected).
    pub value: f32,
    /// Optional label identifying the candidate's origin (node name, bucket).
    pub label: Option<String>,
}

impl Camera {
    /// Creates a camera, orthonormalizing the viewing frame.
    ///
    /// `towards` is normalized; `up` is replaced by the component orthogonal
    /// to `towards` via the right vector, so the frame is right-handed even
    /// for skewed input.
    #[must_use]
    pub fn new(
        origin: Vec3,
        towards: Vec3,
        up: Vec3,
        xfov: f32,
        yfov: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let towards = towards.normalize();
        let right = towards.cross(up).normalize();
        let up = right.cross(towards).normalize();
        Self {
            origin,
            towards,
            up,
            xfov,
            yfov,
            near,
            far,
            value: 0.0,
            label: None,
        }
    }

    /// Creates a camera looking from `origin` at `target`, with up derived
    /// from `world_up` via cross products.
    #[must_use]
    pub fn look_at(
        origin: Vec3,
        target: Vec3,
        world_up: Vec3,
        xfov: f32,
        yfov: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let towards = (target - origin).normalize();
        let right = towards.cross(world_up).normalize();
        let up = right.cross(towards).normalize();
        Self::new(origin, towards, up, xfov, yfov, near, far)
    }

    /// Returns the right direction (`towards` x `up`).
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.towards.cross(self.up)
    }

    /// Sets the quality score, returning self for chaining.
    #[must_use]
    pub fn with_value(mut self, value: f32) -> Self {
        self.value = value;
        self
    }

    /// Sets the label, returning self for chaining.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Derives the half vertical FOV from the half horizontal FOV and the
/// image aspect ratio (height / width).
#[must_use]
pub fn yfov_for(xfov: f32, aspect: f32) -> f32 {
    (aspect * xfov.tan()).atan()
}
