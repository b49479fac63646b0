//! Binary shadow tests against the collision index.

use crate::collision::{OcclusionQuery, SurfaceHit};
use crate::options::casts_shadows;
use glam::Vec3;

/// True if anything that casts shadows lies between `vertex` and a light at
/// `light_position`.
pub fn is_occluded<Q>(world: &Q, vertex: Vec3, light_position: Vec3) -> bool
where
    Q: OcclusionQuery + ?Sized,
{
    let to_light = light_position - vertex;
    let distance = to_light.length();
    if distance <= 0.0 {
        return false;
    }
    casts_shadow(&world.raycast_all(vertex, to_light / distance, distance))
}

/// True if anything that casts shadows lies anywhere against the direction
/// of a directional light.
pub fn is_occluded_directional<Q>(world: &Q, vertex: Vec3, light_forward: Vec3) -> bool
where
    Q: OcclusionQuery + ?Sized,
{
    let Some(towards_light) = (-light_forward).try_normalize() else {
        return false;
    };
    casts_shadow(&world.raycast_all(vertex, towards_light, f32::INFINITY))
}

/// True if any hit counts as an occluder.
///
/// Surfaces without bake options always occlude; surfaces whose options
/// disable casting are ignored.
pub fn casts_shadow(hits: &[SurfaceHit]) -> bool {
    hits.iter().any(|hit| casts_shadows(hit.options.as_ref()))
}
