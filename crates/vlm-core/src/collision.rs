//! Raycastable collision index used for shadow tests.
//!
//! Colliders are world-space triangle soups. Queries are read-only, so a
//! shared `&CollisionWorld` can serve any number of shadow rays.

use crate::mesh::Mesh;
use crate::options::BakeOptions;
use crate::scene::ObjectId;
use crate::transform::Transform;
use glam::Vec3;
use std::collections::BTreeMap;

/// Hits closer than this to the ray origin are ignored, so a ray leaving a
/// vertex does not strike the faces that share it.
pub const RAY_EPSILON: f32 = 1e-4;

/// One collider struck by a ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceHit {
    pub object: ObjectId,
    /// Distance from the ray origin to the nearest struck triangle.
    pub distance: f32,
    /// Bake options of the struck object, if it has any.
    pub options: Option<BakeOptions>,
}

/// Geometry index able to answer "what does this ray pass through".
pub trait OcclusionQuery {
    /// All colliders hit by the ray within `max_distance`, at most one hit per
    /// collider, in no particular order. `direction` must be unit length.
    fn raycast_all(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Vec<SurfaceHit>;
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_points(points: &[Vec3]) -> Self {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for &p in points {
            min = min.min(p);
            max = max.max(p);
        }
        Self { min, max }
    }

    /// Slab test. Returns true if the ray segment `[0, max_distance]` touches the box.
    pub fn intersects_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> bool {
        let mut t_min = 0.0f32;
        let mut t_max = max_distance;
        for axis in 0..3 {
            let o = origin[axis];
            let d = direction[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);
            if d.abs() < 1e-12 {
                if o < lo || o > hi {
                    return false;
                }
                continue;
            }
            let inv = 1.0 / d;
            let mut t0 = (lo - o) * inv;
            let mut t1 = (hi - o) * inv;
            if t0 > t1 {
                core::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return false;
            }
        }
        true
    }
}

/// World-space triangle collider for one scene object.
#[derive(Clone, Debug)]
pub struct MeshCollider {
    pub owner: ObjectId,
    pub options: Option<BakeOptions>,
    triangles: Vec<[Vec3; 3]>,
    bounds: Aabb,
}

impl MeshCollider {
    /// Bake `mesh` into world space with `transform`.
    pub fn from_mesh(
        owner: ObjectId,
        mesh: &Mesh,
        transform: &Transform,
        options: Option<BakeOptions>,
    ) -> Self {
        let world: Vec<Vec3> = mesh
            .positions
            .iter()
            .map(|&p| transform.transform_point(p))
            .collect();
        let triangles = mesh
            .triangles()
            .map(|[a, b, c]| [world[a], world[b], world[c]])
            .collect();
        Self {
            owner,
            options,
            triangles,
            bounds: Aabb::from_points(&world),
        }
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Nearest front-facing triangle hit within `(RAY_EPSILON, max_distance]`.
    pub fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<f32> {
        if self.triangles.is_empty() || !self.bounds.intersects_ray(origin, direction, max_distance)
        {
            return None;
        }
        self.triangles
            .iter()
            .filter_map(|tri| intersect_triangle(origin, direction, tri))
            .filter(|&t| t > RAY_EPSILON && t <= max_distance)
            .min_by(f32::total_cmp)
    }
}

/// Möller-Trumbore ray/triangle test, culling back faces (clockwise as seen
/// from the ray origin).
fn intersect_triangle(origin: Vec3, direction: Vec3, tri: &[Vec3; 3]) -> Option<f32> {
    let e1 = tri[1] - tri[0];
    let e2 = tri[2] - tri[0];
    let p = direction.cross(e2);
    let det = e1.dot(p);
    if det < 1e-8 {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = origin - tri[0];
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(e1);
    let v = direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    Some(e2.dot(q) * inv_det)
}

/// Registry of colliders keyed by owning object.
#[derive(Clone, Debug, Default)]
pub struct CollisionWorld {
    colliders: BTreeMap<ObjectId, MeshCollider>,
}

impl CollisionWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the collider for `collider.owner`.
    pub fn insert(&mut self, collider: MeshCollider) {
        self.colliders.insert(collider.owner, collider);
    }

    pub fn remove(&mut self, owner: ObjectId) -> Option<MeshCollider> {
        self.colliders.remove(&owner)
    }

    /// Update the bake options recorded on `owner`'s collider. Returns false
    /// if it has none.
    pub fn set_options(&mut self, owner: ObjectId, options: Option<BakeOptions>) -> bool {
        match self.colliders.get_mut(&owner) {
            Some(collider) => {
                collider.options = options;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, owner: ObjectId) -> bool {
        self.colliders.contains_key(&owner)
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }
}

impl OcclusionQuery for CollisionWorld {
    fn raycast_all(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Vec<SurfaceHit> {
        self.colliders
            .values()
            .filter_map(|c| {
                c.raycast(origin, direction, max_distance)
                    .map(|distance| SurfaceHit {
                        object: c.owner,
                        distance,
                        options: c.options,
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_collider(owner: ObjectId, z: f32) -> MeshCollider {
        MeshCollider::from_mesh(
            owner,
            &Mesh::quad(2.0),
            &Transform::from_position(Vec3::new(0.0, 0.0, z)),
            None,
        )
    }

    #[test]
    fn front_face_hit_reports_distance() {
        let c = quad_collider(1, 5.0);
        let t = c.raycast(Vec3::ZERO, Vec3::NEG_Z, 100.0);
        assert_eq!(t, None, "quad faces +Z, ray from below sees its back");
        let t = c.raycast(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z, 100.0);
        assert!(t.is_some_and(|t| (t - 5.0).abs() < 1e-5), "t = {t:?}");
    }

    #[test]
    fn max_distance_limits_hits() {
        let c = quad_collider(1, 0.0);
        let origin = Vec3::new(0.1, 0.1, 3.0);
        assert!(c.raycast(origin, Vec3::NEG_Z, 2.0).is_none());
        assert!(c.raycast(origin, Vec3::NEG_Z, 3.5).is_some());
    }

    #[test]
    fn ray_starting_on_surface_ignores_it() {
        let c = quad_collider(1, 0.0);
        assert!(c.raycast(Vec3::new(1.0, 1.0, 0.0), Vec3::Z, 10.0).is_none());
    }

    #[test]
    fn world_returns_one_hit_per_collider() {
        let mut world = CollisionWorld::new();
        world.insert(quad_collider(1, 1.0));
        world.insert(quad_collider(2, 2.0));
        let hits = world.raycast_all(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, f32::INFINITY);
        assert_eq!(hits.len(), 2);
        world.remove(2);
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn collider_bounds_follow_transform() {
        let c = quad_collider(7, 3.0);
        assert_eq!(c.triangle_count(), 2);
        let b = c.bounds();
        assert_eq!(b.min, Vec3::new(-1.0, -1.0, 3.0));
        assert_eq!(b.max, Vec3::new(1.0, 1.0, 3.0));
    }

    #[test]
    fn set_options_replaces_recorded_options() {
        let mut world = CollisionWorld::new();
        world.insert(quad_collider(1, 1.0));
        let off = BakeOptions {
            cast_shadows: false,
            ..Default::default()
        };
        assert!(world.set_options(1, Some(off)));
        assert!(!world.set_options(2, Some(off)));
        let hits = world.raycast_all(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, f32::INFINITY);
        assert_eq!(hits[0].options, Some(off));
    }

    #[test]
    fn aabb_rejects_parallel_ray_outside_slab() {
        let b = Aabb::from_points(&[Vec3::ZERO, Vec3::ONE]);
        assert!(!b.intersects_ray(Vec3::new(2.0, 0.5, -1.0), Vec3::Z, 10.0));
        assert!(b.intersects_ray(Vec3::new(0.5, 0.5, -1.0), Vec3::Z, 10.0));
    }
}
