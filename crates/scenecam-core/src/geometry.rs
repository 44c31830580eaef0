//! Geometry primitives: axis-aligned boxes, rays, and triangles.

use glam::{Affine3A, Vec3};

/// An axis-aligned bounding box in 3D.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// An empty box (inverted extents); the identity for [`Aabb::union`].
    pub const EMPTY: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Creates a box from min/max corners.
    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Returns true if the box contains no volume (never grown past EMPTY).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grows the box to contain a point.
    pub fn grow(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Returns the union of two boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Returns the center of the box.
    #[must_use]
    pub fn centroid(&self) -> Vec3 {
        0.5 * (self.min + self.max)
    }

    /// Returns half the length of the box diagonal.
    #[must_use]
    pub fn diagonal_radius(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        0.5 * (self.max - self.min).length()
    }

    /// Returns true if the two boxes overlap (boundaries touching counts).
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
            && self.min.z <= other.max.z
            && other.min.z <= self.max.z
    }

    /// Returns the box containing all eight transformed corners.
    #[must_use]
    pub fn transformed(&self, transform: &Affine3A) -> Self {
        if self.is_empty() {
            return *self;
        }
        let mut out = Self::EMPTY;
        for i in 0..8 {
            let corner = Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            );
            out.grow(transform.transform_point3(corner));
        }
        out
    }
}

/// A ray with a normalized direction.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Creates a ray, normalizing the direction.
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Creates a ray from one point toward another.
    #[must_use]
    pub fn between(from: Vec3, to: Vec3) -> Self {
        Self::new(from, to - from)
    }

    /// Returns the point at parameter `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + t * self.direction
    }
}

/// A triangle with vertices in counter-clockwise order.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    /// First vertex.
    pub a: Vec3,
    /// Second vertex.
    pub b: Vec3,
    /// Third vertex.
    pub c: Vec3,
}

impl Triangle {
    /// Creates a triangle from three vertices.
    #[must_use]
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self { a, b, c }
    }

    /// Returns the triangle transformed by an affine map.
    #[must_use]
    pub fn transformed(&self, transform: &Affine3A) -> Self {
        Self {
            a: transform.transform_point3(self.a),
            b: transform.transform_point3(self.b),
            c: transform.transform_point3(self.c),
        }
    }

    /// Returns the surface area.
    #[must_use]
    pub fn area(&self) -> f32 {
        0.5 * (self.b - self.a).cross(self.c - self.a).length()
    }

    /// Returns the bounding box of the triangle.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        let mut bounds = Aabb::EMPTY;
        bounds.grow(self.a);
        bounds.grow(self.b);
        bounds.grow(self.c);
        bounds
    }

    /// Returns a uniformly distributed point on the triangle.
    ///
    /// `r0` and `r1` must be independent uniform samples in `[0, 1)`.
    #[must_use]
    pub fn point_from_barycentric_samples(&self, r0: f32, r1: f32) -> Vec3 {
        // Square-root reflection trick keeps the density uniform
        let s = r0.sqrt();
        let u = 1.0 - s;
        let v = r1 * s;
        self.a + u * (self.b - self.a) + v * (self.c - self.a)
    }

    /// Ray-triangle intersection (Moller-Trumbore).
    ///
    /// Returns the ray parameter of the hit, or `None` if the ray misses.
    #[must_use]
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        let edge1 = self.b - self.a;
        let edge2 = self.c - self.a;
        let pvec = ray.direction.cross(edge2);
        let det = edge1.dot(pvec);
        if det.abs() < 1e-12 {
            return None;
        }
        let inv_det = 1.0 / det;
        let tvec = ray.origin - self.a;
        let u = tvec.dot(pvec) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }
        let qvec = tvec.cross(edge1);
        let v = ray.direction.dot(qvec) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }
        let t = edge2.dot(qvec) * inv_det;
        (t > 1e-6).then_some(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_union_and_centroid() {
        let mut a = Aabb::EMPTY;
        assert!(a.is_empty());
        a.grow(Vec3::ZERO);
        a.grow(Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(a.centroid(), Vec3::new(1.0, 2.0, 3.0));

        let b = Aabb::new(Vec3::splat(-1.0), Vec3::ZERO);
        let u = a.union(&b);
        assert_eq!(u.min, Vec3::splat(-1.0));
        assert_eq!(u.max, Vec3::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_aabb_intersects() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::new(Vec3::splat(0.5), Vec3::splat(2.0));
        let c = Aabb::new(Vec3::splat(1.5), Vec3::splat(2.0));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(!a.intersects(&Aabb::EMPTY));
    }

    #[test]
    fn test_aabb_transformed() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let t = Affine3A::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let moved = a.transformed(&t);
        assert_eq!(moved.min, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(moved.max, Vec3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn test_triangle_area() {
        let tri = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y);
        assert!((tri.area() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_triangle_intersect_hit_and_miss() {
        let tri = Triangle::new(
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        );
        let hit = Ray::new(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z);
        let t = tri.intersect(&hit).expect("should hit");
        assert!((t - 5.0).abs() < 1e-4);

        let miss = Ray::new(Vec3::new(5.0, 5.0, 5.0), -Vec3::Z);
        assert!(tri.intersect(&miss).is_none());
    }

    #[test]
    fn test_barycentric_point_inside() {
        let tri = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y);
        let p = tri.point_from_barycentric_samples(0.3, 0.7);
        assert!(p.x >= 0.0 && p.y >= 0.0 && p.x + p.y <= 1.0 + 1e-6);
    }
}
