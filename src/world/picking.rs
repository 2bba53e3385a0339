//! # Ray Picking
//!
//! Geometry used by the line trace: a world-space [`Ray`] and an axis-aligned
//! bounding box ([`AABB`]) that reports both the hit distance and the face
//! normal of the surface that was struck.
//!
//! ## How it works
//!
//! 1. **Local bounds**: every mesh carries its bounds in object space
//! 2. **World bounds**: the bounds are pushed through the object's transform
//! 3. **Slab test**: the ray is clipped against the three slab pairs; the slab
//!    that clips last is the face that was hit
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::Vector3;
//! use kitchen::world::picking::{Ray, AABB};
//!
//! let bounds = AABB::new(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0));
//! let ray = Ray::new(Vector3::new(-5.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
//!
//! let hit = bounds.intersect_ray_with_normal(&ray).unwrap();
//! assert_eq!(hit.distance, 4.0);
//! assert_eq!(hit.normal, Vector3::new(-1.0, 0.0, 0.0));
//! ```

use cgmath::{ElementWise, InnerSpace, Matrix4, Vector3, Vector4, Zero};

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Create a new ray
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }
}

/// Distance and surface normal of a ray/box intersection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    pub distance: f32,
    /// Outward normal of the face that was hit
    pub normal: Vector3<f32>,
}

/// Axis-aligned bounding box for intersection testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner of the bounding box
    pub min: Vector3<f32>,
    /// Maximum corner of the bounding box
    pub max: Vector3<f32>,
}

impl AABB {
    /// Create a new AABB
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Box centred on the origin with the given half extents
    pub fn from_half_extents(half: Vector3<f32>) -> Self {
        Self::new(-half, half)
    }

    /// Create AABB from a set of vertices
    pub fn from_vertices(vertices: &[[f32; 3]]) -> Self {
        if vertices.is_empty() {
            return Self::new(Vector3::zero(), Vector3::zero());
        }

        let mut min = Vector3::new(vertices[0][0], vertices[0][1], vertices[0][2]);
        let mut max = min;

        for vertex in vertices.iter().skip(1) {
            let v = Vector3::new(vertex[0], vertex[1], vertex[2]);
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            min.z = min.z.min(v.z);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
            max.z = max.z.max(v.z);
        }

        Self::new(min, max)
    }

    pub fn center(&self) -> Vector3<f32> {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vector3<f32> {
        (self.max - self.min) * 0.5
    }

    /// Test ray-AABB intersection
    /// Returns the distance to intersection point, or None if no intersection
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        self.intersect_ray_with_normal(ray).map(|hit| hit.distance)
    }

    /// Slab test that also reports which face the ray entered through.
    ///
    /// When the origin lies inside the box the exit face is reported instead,
    /// with its normal still pointing out of the box.
    pub fn intersect_ray_with_normal(&self, ray: &Ray) -> Option<SurfaceHit> {
        let inv_dir = Vector3::new(
            1.0 / ray.direction.x,
            1.0 / ray.direction.y,
            1.0 / ray.direction.z,
        );

        let t_min = (self.min - ray.origin).mul_element_wise(inv_dir);
        let t_max = (self.max - ray.origin).mul_element_wise(inv_dir);

        let t1 = Vector3::new(
            t_min.x.min(t_max.x),
            t_min.y.min(t_max.y),
            t_min.z.min(t_max.z),
        );
        let t2 = Vector3::new(
            t_min.x.max(t_max.x),
            t_min.y.max(t_max.y),
            t_min.z.max(t_max.z),
        );

        let (near_axis, t_near) = arg_max(t1);
        let (far_axis, t_far) = arg_min(t2);

        if t_near > t_far || t_far < 0.0 {
            return None;
        }

        if t_near >= 0.0 {
            Some(SurfaceHit {
                distance: t_near,
                normal: axis_normal(near_axis, -ray.direction[near_axis].signum()),
            })
        } else {
            Some(SurfaceHit {
                distance: t_far,
                normal: axis_normal(far_axis, ray.direction[far_axis].signum()),
            })
        }
    }

    /// Apply a transformation matrix to the AABB
    pub fn transform(&self, matrix: &Matrix4<f32>) -> Self {
        // Transform all 8 corners of the AABB and compute new bounds
        let corners = [
            Vector3::new(self.min.x, self.min.y, self.min.z),
            Vector3::new(self.max.x, self.min.y, self.min.z),
            Vector3::new(self.min.x, self.max.y, self.min.z),
            Vector3::new(self.min.x, self.min.y, self.max.z),
            Vector3::new(self.max.x, self.max.y, self.min.z),
            Vector3::new(self.max.x, self.min.y, self.max.z),
            Vector3::new(self.min.x, self.max.y, self.max.z),
            Vector3::new(self.max.x, self.max.y, self.max.z),
        ];

        let mut transformed_corners = Vec::with_capacity(8);
        for corner in &corners {
            let homogeneous = Vector4::new(corner.x, corner.y, corner.z, 1.0);
            let transformed = matrix * homogeneous;
            transformed_corners.push([
                transformed.x / transformed.w,
                transformed.y / transformed.w,
                transformed.z / transformed.w,
            ]);
        }

        Self::from_vertices(&transformed_corners)
    }
}

fn arg_max(v: Vector3<f32>) -> (usize, f32) {
    let mut best = (0, v.x);
    for axis in 1..3 {
        if v[axis] > best.1 {
            best = (axis, v[axis]);
        }
    }
    best
}

fn arg_min(v: Vector3<f32>) -> (usize, f32) {
    let mut best = (0, v.x);
    for axis in 1..3 {
        if v[axis] < best.1 {
            best = (axis, v[axis]);
        }
    }
    best
}

fn axis_normal(axis: usize, sign: f32) -> Vector3<f32> {
    let mut normal = Vector3::zero();
    normal[axis] = sign;
    normal
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Matrix4;

    fn unit_box() -> AABB {
        AABB::new(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_aabb_creation() {
        let vertices = vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [-1.0, -1.0, -1.0]];
        let aabb = AABB::from_vertices(&vertices);

        assert_eq!(aabb.min, Vector3::new(-1.0, -1.0, -1.0));
        assert_eq!(aabb.max, Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_ray_aabb_intersection() {
        let aabb = unit_box();

        // Ray hitting the box
        let ray = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(aabb.intersect_ray(&ray), Some(4.0));

        // Ray missing the box
        let ray_miss = Ray::new(Vector3::new(5.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(aabb.intersect_ray(&ray_miss).is_none());

        // Box entirely behind the ray
        let ray_behind = Ray::new(Vector3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(aabb.intersect_ray(&ray_behind).is_none());
    }

    #[test]
    fn test_hit_normal_faces_the_ray() {
        let aabb = unit_box();

        let from_above = Ray::new(Vector3::new(0.2, 0.3, 10.0), Vector3::new(0.0, 0.0, -1.0));
        let hit = aabb.intersect_ray_with_normal(&from_above).unwrap();
        assert_eq!(hit.distance, 9.0);
        assert_eq!(hit.normal, Vector3::new(0.0, 0.0, 1.0));

        let from_side = Ray::new(Vector3::new(0.0, -4.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
        let hit = aabb.intersect_ray_with_normal(&from_side).unwrap();
        assert_eq!(hit.normal, Vector3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn test_origin_inside_reports_exit_face() {
        let aabb = unit_box();
        let ray = Ray::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        let hit = aabb.intersect_ray_with_normal(&ray).unwrap();
        assert_eq!(hit.distance, 1.0);
        assert_eq!(hit.normal, Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_transform_translates_bounds() {
        let moved = unit_box().transform(&Matrix4::from_translation(Vector3::new(10.0, 0.0, 0.0)));
        assert_eq!(moved.min, Vector3::new(9.0, -1.0, -1.0));
        assert_eq!(moved.max, Vector3::new(11.0, 1.0, 1.0));
        assert_eq!(moved.center(), Vector3::new(10.0, 0.0, 0.0));
        assert_eq!(moved.half_extents(), Vector3::new(1.0, 1.0, 1.0));
    }
}
