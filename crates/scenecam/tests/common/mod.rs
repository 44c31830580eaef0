//! Shared test fixtures: an in-memory scene graph and a canonical room.

#![allow(dead_code)]

use glam::{Affine3A, Vec3};
use scenecam_core::{ancestor_transform, Aabb, NodeId, Ray, RayHit, SceneQuery, Triangle};

/// Initializes test logging; safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

struct Node {
    name: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    transform: Affine3A,
    triangles: Vec<Triangle>,
}

/// A minimal arena-backed scene graph with brute-force ray queries.
pub struct TestScene {
    nodes: Vec<Node>,
}

impl TestScene {
    /// Creates a scene with a single root node.
    pub fn new(root_name: &str) -> Self {
        Self {
            nodes: vec![Node {
                name: Some(root_name.to_owned()),
                parent: None,
                children: Vec::new(),
                transform: Affine3A::IDENTITY,
                triangles: Vec::new(),
            }],
        }
    }

    /// Appends a node under `parent` and returns its id.
    pub fn add_node(
        &mut self,
        parent: NodeId,
        name: Option<&str>,
        transform: Affine3A,
        triangles: Vec<Triangle>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name: name.map(str::to_owned),
            parent: Some(parent),
            children: Vec::new(),
            transform,
            triangles,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    fn intersect_node(
        &self,
        node: NodeId,
        parent_to_world: &Affine3A,
        ray: &Ray,
        min_t: f32,
        max_t: f32,
        best: &mut Option<RayHit>,
    ) {
        let transform = *parent_to_world * self.nodes[node.0].transform;
        for triangle in &self.nodes[node.0].triangles {
            if let Some(t) = triangle.transformed(&transform).intersect(ray) {
                if t >= min_t && t <= max_t && best.map_or(true, |b| t < b.t) {
                    *best = Some(RayHit { node, t });
                }
            }
        }
        for child in &self.nodes[node.0].children {
            self.intersect_node(*child, &transform, ray, min_t, max_t, best);
        }
    }
}

impl SceneQuery for TestScene {
    fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    fn name(&self, node: NodeId) -> Option<&str> {
        self.nodes[node.0].name.as_deref()
    }

    fn local_transform(&self, node: NodeId) -> Affine3A {
        self.nodes[node.0].transform
    }

    fn bounds(&self, node: NodeId) -> Aabb {
        let mut bounds = Aabb::EMPTY;
        for triangle in &self.nodes[node.0].triangles {
            bounds = bounds.union(&triangle.bounds());
        }
        for child in &self.nodes[node.0].children {
            bounds = bounds.union(&self.bounds(*child));
        }
        bounds.transformed(&self.nodes[node.0].transform)
    }

    fn triangles(&self, node: NodeId) -> &[Triangle] {
        &self.nodes[node.0].triangles
    }

    fn intersect_from(&self, root: NodeId, ray: &Ray, min_t: f32, max_t: f32) -> Option<RayHit> {
        let to_world = ancestor_transform(self, root);
        let mut best = None;
        self.intersect_node(root, &to_world, ray, min_t, max_t, &mut best);
        best
    }
}

/// Triangulates an axis-aligned box (two triangles per face).
pub fn box_triangles(min: Vec3, max: Vec3) -> Vec<Triangle> {
    let p = [
        Vec3::new(min.x, min.y, min.z),
        Vec3::new(max.x, min.y, min.z),
        Vec3::new(max.x, max.y, min.z),
        Vec3::new(min.x, max.y, min.z),
        Vec3::new(min.x, min.y, max.z),
        Vec3::new(max.x, min.y, max.z),
        Vec3::new(max.x, max.y, max.z),
        Vec3::new(min.x, max.y, max.z),
    ];
    const FACES: [[usize; 4]; 6] = [
        [0, 3, 2, 1],
        [4, 5, 6, 7],
        [0, 1, 5, 4],
        [2, 3, 7, 6],
        [0, 4, 7, 3],
        [1, 2, 6, 5],
    ];
    let mut triangles = Vec::with_capacity(12);
    for face in FACES {
        triangles.push(Triangle::new(p[face[0]], p[face[1]], p[face[2]]));
        triangles.push(Triangle::new(p[face[0]], p[face[2]], p[face[3]]));
    }
    triangles
}

/// Interior XY size of the canonical room.
pub const ROOM_SIZE: f32 = 10.0;
/// Interior height of the canonical room.
pub const ROOM_HEIGHT: f32 = 3.0;

/// A canonical single-room fixture and its interesting node ids.
pub struct RoomFixture {
    pub scene: TestScene,
    pub room: NodeId,
    pub walls: NodeId,
    pub object: NodeId,
}

/// Builds a 10 x 10 x 3 room with the conventional walls/floor/ceiling
/// triple and one 1 x 1 x 1 sofa in the middle of the floor.
pub fn single_room_scene() -> RoomFixture {
    let s = ROOM_SIZE;
    let h = ROOM_HEIGHT;
    let mut scene = TestScene::new("Project#0");
    let root = scene.root();
    let room = scene.add_node(root, Some("Room#0"), Affine3A::IDENTITY, Vec::new());

    let mut wall_triangles = Vec::new();
    wall_triangles.extend(box_triangles(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.1, s, h)));
    wall_triangles.extend(box_triangles(Vec3::new(s - 0.1, 0.0, 0.0), Vec3::new(s, s, h)));
    wall_triangles.extend(box_triangles(Vec3::new(0.0, 0.0, 0.0), Vec3::new(s, 0.1, h)));
    wall_triangles.extend(box_triangles(Vec3::new(0.0, s - 0.1, 0.0), Vec3::new(s, s, h)));
    let walls = scene.add_node(room, Some("Walls#0"), Affine3A::IDENTITY, wall_triangles);

    scene.add_node(
        room,
        Some("Floors#0"),
        Affine3A::IDENTITY,
        box_triangles(Vec3::new(0.0, 0.0, -0.1), Vec3::new(s, s, 0.0)),
    );
    scene.add_node(
        room,
        Some("Ceilings#0"),
        Affine3A::IDENTITY,
        box_triangles(Vec3::new(0.0, 0.0, h), Vec3::new(s, s, h + 0.1)),
    );

    let object = scene.add_node(
        room,
        Some("sofa#0"),
        Affine3A::IDENTITY,
        box_triangles(Vec3::new(4.5, 4.5, 0.0), Vec3::new(5.5, 5.5, 1.0)),
    );

    RoomFixture { scene, room, walls, object }
}
