//! Scene-query and renderer seams.
//!
//! The scene graph itself (loading, ownership, acceleration structures) is
//! external; this module defines the narrow interface the camera-synthesis
//! engine consumes, the naming-convention node classification, and pure
//! tree-walk helpers for accumulated transforms.

use glam::Affine3A;

use crate::camera::Camera;
use crate::error::{Result, ScenecamError};
use crate::geometry::{Aabb, Ray, Triangle};

/// Identifier of a scene node.
///
/// Implementations must use dense indices: every id in
/// `0..SceneQuery::node_count()` is a valid node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Structural category of a node, inferred from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A room (`Room#...`).
    Room,
    /// A room's wall group (`Walls#...`).
    WallGroup,
    /// A room's floor group (`Floors#...`).
    FloorGroup,
    /// A room's ceiling group (`Ceilings#...`).
    CeilingGroup,
    /// Anything else, including unnamed nodes.
    Object,
}

impl NodeKind {
    /// Classifies a node name by the indoor-scene naming convention.
    #[must_use]
    pub fn classify(name: Option<&str>) -> Self {
        let Some(name) = name else {
            return Self::Object;
        };
        if name.starts_with("Room#") {
            Self::Room
        } else if name.starts_with("Walls#") {
            Self::WallGroup
        } else if name.starts_with("Floors#") {
            Self::FloorGroup
        } else if name.starts_with("Ceilings#") {
            Self::CeilingGroup
        } else {
            Self::Object
        }
    }
}

/// A ray-scene intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// The leaf node first hit by the ray.
    pub node: NodeId,
    /// Ray parameter of the hit.
    pub t: f32,
}

/// Read-only query interface to an externally owned scene graph.
///
/// Coordinate conventions: `triangles` are in the node's own frame (the
/// node's `local_transform` has not been applied); `bounds` are in the
/// parent's frame (the node's transform and all descendants included);
/// `intersect_from` takes and returns world-space quantities.
pub trait SceneQuery {
    /// Root node of the scene tree.
    fn root(&self) -> NodeId;

    /// Total number of nodes; ids are dense in `0..node_count()`.
    fn node_count(&self) -> usize;

    /// Parent of a node, `None` for the root.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Children of a node, in structural order.
    fn children(&self, node: NodeId) -> &[NodeId];

    /// Node name, if any.
    fn name(&self, node: NodeId) -> Option<&str>;

    /// The node's local affine transform (relative to its parent).
    fn local_transform(&self, node: NodeId) -> Affine3A;

    /// Bounding box of the node and its subtree, in the parent's frame.
    fn bounds(&self, node: NodeId) -> Aabb;

    /// Leaf triangle geometry in the node's own frame; empty for interior
    /// nodes.
    fn triangles(&self, node: NodeId) -> &[Triangle];

    /// First intersection of a world-space ray with the subtree under
    /// `root`, with the hit parameter restricted to `(min_t, max_t)`.
    fn intersect_from(&self, root: NodeId, ray: &Ray, min_t: f32, max_t: f32) -> Option<RayHit>;

    /// First intersection with the whole scene.
    fn intersect(&self, ray: &Ray, min_t: f32, max_t: f32) -> Option<RayHit>
    where
        Self: Sized,
    {
        self.intersect_from(self.root(), ray, min_t, max_t)
    }

    /// World-space bounds of the whole scene.
    fn scene_bounds(&self) -> Aabb
    where
        Self: Sized,
    {
        world_bounds(self, self.root())
    }
}

/// Composed transform of a node's strict ancestors (root first).
///
/// Maps the parent's frame into world space; pure parent-pointer walk over
/// the externally owned tree.
pub fn ancestor_transform<S: SceneQuery + ?Sized>(scene: &S, node: NodeId) -> Affine3A {
    let mut transform = Affine3A::IDENTITY;
    let mut current = scene.parent(node);
    while let Some(ancestor) = current {
        transform = scene.local_transform(ancestor) * transform;
        current = scene.parent(ancestor);
    }
    transform
}

/// Composed transform from the node's own frame into world space.
pub fn world_transform<S: SceneQuery + ?Sized>(scene: &S, node: NodeId) -> Affine3A {
    ancestor_transform(scene, node) * scene.local_transform(node)
}

/// World-space bounding box of a node's subtree.
pub fn world_bounds<S: SceneQuery + ?Sized>(scene: &S, node: NodeId) -> Aabb {
    scene
        .bounds(node)
        .transformed(&ancestor_transform(scene, node))
}

/// Returns true for scoreable objects: leaf nodes that are not part of the
/// wall/floor/ceiling structure and are not doors or windows.
pub fn is_object<S: SceneQuery + ?Sized>(scene: &S, node: NodeId) -> bool {
    if !scene.children(node).is_empty() {
        return false;
    }
    match scene.name(node) {
        None => true,
        Some(name) => {
            !matches!(
                NodeKind::classify(Some(name)),
                NodeKind::WallGroup | NodeKind::FloorGroup | NodeKind::CeilingGroup
            ) && !name.contains("Door")
                && !name.contains("Window")
        }
    }
}

/// The canonical structural triple of a room node.
#[derive(Debug, Clone, Copy)]
pub struct RoomStructure {
    /// The wall group (first child).
    pub walls: NodeId,
    /// The floor group (second child).
    pub floor: NodeId,
    /// The ceiling group (third child).
    pub ceiling: NodeId,
}

/// Resolves a room's wall/floor/ceiling triple.
///
/// # Errors
/// `MalformedRoom` if the node is not a named room or its first three
/// children are not the wall, floor, and ceiling groups in that order.
pub fn room_structure<S: SceneQuery + ?Sized>(scene: &S, room: NodeId) -> Result<RoomStructure> {
    if NodeKind::classify(scene.name(room)) != NodeKind::Room {
        return Err(ScenecamError::MalformedRoom(room.0));
    }
    let children = scene.children(room);
    if children.len() < 3 {
        return Err(ScenecamError::MalformedRoom(room.0));
    }
    let walls = children[0];
    let floor = children[1];
    let ceiling = children[2];
    if NodeKind::classify(scene.name(walls)) != NodeKind::WallGroup
        || NodeKind::classify(scene.name(floor)) != NodeKind::FloorGroup
        || NodeKind::classify(scene.name(ceiling)) != NodeKind::CeilingGroup
    {
        return Err(ScenecamError::MalformedRoom(room.0));
    }
    Ok(RoomStructure { walls, floor, ceiling })
}

/// A per-pixel node-identifier image produced by a [`Renderer`].
///
/// `None` pixels are background or unresolved ("unknown").
#[derive(Debug, Clone)]
pub struct CoverageImage {
    width: usize,
    height: usize,
    pixels: Vec<Option<NodeId>>,
}

impl CoverageImage {
    /// Creates an image filled with unknown pixels.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![None; width * height],
        }
    }

    /// Image width in pixels.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of pixels.
    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Node id at pixel `(ix, iy)`.
    #[must_use]
    pub fn pixel(&self, ix: usize, iy: usize) -> Option<NodeId> {
        self.pixels[iy * self.width + ix]
    }

    /// Sets the node id at pixel `(ix, iy)`.
    pub fn set_pixel(&mut self, ix: usize, iy: usize, node: Option<NodeId>) {
        self.pixels[iy * self.width + ix] = node;
    }

    /// Per-node visible-pixel totals, indexed by node id.
    #[must_use]
    pub fn node_pixel_counts(&self, node_count: usize) -> Vec<usize> {
        let mut counts = vec![0; node_count];
        for pixel in self.pixels.iter().flatten() {
            if pixel.0 < node_count {
                counts[pixel.0] += 1;
            }
        }
        counts
    }
}

/// A rendering backend producing node-identifier images.
///
/// Backends (GPU rasterization, CPU ray casting) must be observably
/// equivalent for scoring purposes: background and unresolved pixels map to
/// unknown. A backend is a shared, exclusively held resource; rendering is
/// synchronous.
pub trait Renderer<S: SceneQuery + ?Sized> {
    /// Renders the subtree under `root` as seen by `camera`.
    fn render(&mut self, camera: &Camera, scene: &S, root: NodeId) -> CoverageImage;
}
