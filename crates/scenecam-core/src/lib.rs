//! Core types for scenecam.
//!
//! This crate provides the foundation the camera-synthesis engine builds on:
//! - [`Camera`] poses with an orthonormal-frame invariant
//! - [`CamGenConfig`] immutable pipeline configuration
//! - [`SceneQuery`] / [`Renderer`] trait seams to the external scene graph
//!   and rendering backends
//! - [`Grid2`] world-mapped raster grids and [`CatmullRom`] splines

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// The config struct legitimately has many boolean toggles
#![allow(clippy::struct_excessive_bools)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod camera;
pub mod config;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod scene;
pub mod spline;

pub use camera::{yfov_for, Camera, WORLD_UP};
pub use config::{CamGenConfig, CameraOrdering, SceneScoringMethod};
pub use error::{Result, ScenecamError};
pub use geometry::{Aabb, Ray, Triangle};
pub use grid::Grid2;
pub use scene::{
    ancestor_transform, is_object, room_structure, world_bounds, world_transform, CoverageImage,
    NodeId, NodeKind, RayHit, Renderer, RoomStructure, SceneQuery,
};
pub use spline::CatmullRom;

// Re-export glam types for convenience
pub use glam::{Affine3A, Vec2, Vec3};
