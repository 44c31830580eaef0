//! Viewpoint masks: where in a room a camera may stand.
//!
//! A mask is a binary raster over a room's XY extent. A cell is admissible
//! iff it lies on the room's floor and keeps the configured clearance from
//! every obstacle between floor and ceiling height.

#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use glam::{Affine3A, Vec2};

use scenecam_core::{
    ancestor_transform, room_structure, world_bounds, world_transform, Aabb, Grid2, NodeId,
    Result, SceneQuery, ScenecamError,
};

/// Finest grid spacing used for mask rasterization.
const MAX_SPACING: f32 = 0.1;

/// A boolean raster of admissible ground-level viewpoint locations.
///
/// Built once per room, read-only afterwards. Cell values are exactly 0 or 1.
#[derive(Debug, Clone)]
pub struct ViewpointMask {
    grid: Grid2,
}

impl ViewpointMask {
    /// Builds the mask for a room node.
    ///
    /// # Errors
    /// `MalformedRoom` if the room lacks the canonical walls/floor/ceiling
    /// triple; `MaskResolutionTooSmall` if the room is too small for the
    /// grid spacing. Both are non-fatal: callers skip the room.
    pub fn build<S: SceneQuery>(scene: &S, room: NodeId, clearance: f32) -> Result<Self> {
        let structure = room_structure(scene, room)?;

        let room_to_world = world_transform(scene, room);
        let room_bounds = world_bounds(scene, room);
        let floor_bounds = scene.bounds(structure.floor).transformed(&room_to_world);
        let ceiling_bounds = scene.bounds(structure.ceiling).transformed(&room_to_world);

        let spacing = if clearance == 0.0 {
            MAX_SPACING
        } else {
            (clearance / 2.0).min(MAX_SPACING)
        };
        let xres = ((room_bounds.max.x - room_bounds.min.x) / spacing) as usize;
        let yres = ((room_bounds.max.y - room_bounds.min.y) / spacing) as usize;
        if xres < 3 || yres < 3 {
            return Err(ScenecamError::MaskResolutionTooSmall { xres, yres });
        }
        let grid_min = Vec2::new(room_bounds.min.x, room_bounds.min.y);
        let grid_max = Vec2::new(room_bounds.max.x, room_bounds.max.y);

        // Margin that keeps viewpoints `clearance` away from mask boundaries
        let erosion_cells = clearance / spacing;

        // Floor presence, inset from the floor boundary
        let mut floor_mask = Grid2::new(xres, yres, grid_min, grid_max);
        rasterize_subtree(
            &mut floor_mask,
            scene,
            structure.floor,
            &room_to_world,
            &floor_bounds,
        );
        floor_mask.threshold(0.5, 0.0, 1.0);
        floor_mask.erode(erosion_cells);

        // Obstacles between floor top and ceiling bottom
        let mut obstacle_clip = room_bounds;
        obstacle_clip.min.z = floor_bounds.max.z + f32::EPSILON;
        obstacle_clip.max.z = ceiling_bounds.min.z - f32::EPSILON;
        let mut object_mask = Grid2::new(xres, yres, grid_min, grid_max);

        // The room's own contents (walls included, floor and ceiling not)
        for child in scene.children(room) {
            if *child == structure.floor || *child == structure.ceiling {
                continue;
            }
            rasterize_subtree(&mut object_mask, scene, *child, &room_to_world, &obstacle_clip);
        }

        // Scene-level leaf objects not owned by any room
        if let Some(parent) = scene.parent(room) {
            for sibling in scene.children(parent) {
                if !scene.children(*sibling).is_empty() {
                    continue;
                }
                let sibling_to_world = ancestor_transform(scene, *sibling);
                rasterize_subtree(&mut object_mask, scene, *sibling, &sibling_to_world, &obstacle_clip);
            }
        }

        // Occupied -> 0, free -> 1, then shrink free space by the clearance
        object_mask.threshold(0.5, 1.0, 0.0);
        object_mask.erode(erosion_cells);

        let mut grid = floor_mask;
        grid.mask(&object_mask);
        Ok(Self { grid })
    }

    /// The underlying binary grid.
    #[must_use]
    pub fn grid(&self) -> &Grid2 {
        &self.grid
    }

    /// Returns true if a world XY position is an admissible viewpoint.
    /// Positions outside the grid are inadmissible.
    #[must_use]
    pub fn allows(&self, position: Vec2) -> bool {
        self.grid.world_value(position).is_some_and(|v| v >= 0.5)
    }
}

/// Rasterizes the XY projection of a node's subtree into a grid, restricted
/// to geometry whose bounds intersect the world-space `clip` box.
///
/// `parent_to_world` maps the node's parent frame into world space; the walk
/// prunes subtrees whose bounds miss the clip box.
fn rasterize_subtree<S: SceneQuery>(
    grid: &mut Grid2,
    scene: &S,
    node: NodeId,
    parent_to_world: &Affine3A,
    clip: &Aabb,
) {
    let node_bounds = scene.bounds(node).transformed(parent_to_world);
    if !clip.intersects(&node_bounds) {
        return;
    }

    let transform = *parent_to_world * scene.local_transform(node);
    for triangle in scene.triangles(node) {
        let world = triangle.transformed(&transform);
        if !clip.intersects(&world.bounds()) {
            continue;
        }
        grid.rasterize_triangle(
            Vec2::new(world.a.x, world.a.y),
            Vec2::new(world.b.x, world.b.y),
            Vec2::new(world.c.x, world.c.y),
            1.0,
        );
    }

    for child in scene.children(node) {
        rasterize_subtree(grid, scene, *child, &transform, clip);
    }
}
