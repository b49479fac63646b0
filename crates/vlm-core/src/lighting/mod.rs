//! Per-vertex lighting math: ambient, diffuse, falloff and shadowed light color.
//!
//! Everything here is a pure function of its inputs. Shadow tests query an
//! [`OcclusionQuery`] but never modify it.

pub mod shadow;
pub mod sponge;

pub use shadow::{casts_shadow, is_occluded, is_occluded_directional};
pub use sponge::{box_sponge_color, sphere_sponge_color, sponge_color};

use crate::ambient::{AmbientMode, AmbientSettings};
use crate::collision::OcclusionQuery;
use crate::color::Color;
use crate::light::Light;
use crate::options::{receives_shadows, BakeOptions};
use glam::Vec3;

/// Contribution of a light that adds nothing: opaque black.
pub const NO_LIGHT: Color = Color::BLACK;

/// Ambient color for a vertex with the given world-space normal.
pub fn ambient_color(normal: Vec3, ambient: &AmbientSettings) -> Color {
    match &ambient.mode {
        AmbientMode::Flat(color) => *color,
        AmbientMode::Trilight {
            sky,
            equator,
            ground,
        } => {
            let dot = normal.normalize_or_zero().dot(Vec3::Y);
            if dot < 0.0 {
                ground.lerp(*equator, dot + 1.0)
            } else {
                equator.lerp(*sky, dot)
            }
        }
        AmbientMode::Probe(probe) => probe.evaluate(normal) * ambient.intensity,
    }
}

/// Lambert diffuse color of a positional light, before attenuation.
///
/// Surfaces facing away from the light get [`NO_LIGHT`]. Alpha is always 1.
pub fn base_light_color(
    vertex: Vec3,
    normal: Vec3,
    light_position: Vec3,
    light_color: Color,
    light_intensity: f32,
) -> Color {
    let light_dir = (light_position - vertex).normalize_or_zero();
    let diffuse_factor = normal.dot(light_dir);
    if diffuse_factor > 0.0 {
        (light_color * light_intensity * diffuse_factor).with_alpha(1.0)
    } else {
        NO_LIGHT
    }
}

/// Range falloff: `clamp(1 - d²/r², 0, 1)²`.
///
/// 1.0 at the light, 0.0 at and beyond `range`, with zero slope at the
/// boundary. A non-positive range yields 0.0.
pub fn attenuation(distance: f32, range: f32) -> f32 {
    if range <= 0.0 {
        return 0.0;
    }
    let att = (1.0 - distance * distance / (range * range)).clamp(0.0, 1.0);
    att * att
}

/// Attenuation of a point light at `vertex`.
pub fn point_intensity(vertex: Vec3, light_position: Vec3, range: f32) -> f32 {
    attenuation(light_position.distance(vertex), range)
}

/// Attenuation of a spot light at `vertex`, including the cone cutoff.
///
/// With `spot_factor = dot(dir(light -> vertex), forward)` and
/// `cutoff = 1 - cone_angle / 180`, vertices with `spot_factor <= cutoff` get
/// 0.0; inside the cone the point falloff is scaled linearly from 0.0 at the
/// cutoff to 1.0 on the axis.
pub fn spot_intensity(
    vertex: Vec3,
    light_position: Vec3,
    light_forward: Vec3,
    range: f32,
    cone_angle: f32,
) -> f32 {
    let point_atten = point_intensity(vertex, light_position, range);

    let spot_factor = (vertex - light_position)
        .normalize_or_zero()
        .dot(light_forward.normalize_or_zero());
    let cutoff = 1.0 - cone_angle / 180.0;

    if spot_factor > cutoff {
        point_atten * (1.0 - (1.0 - spot_factor) * 1.0 / (1.0 - cutoff))
    } else {
        0.0
    }
}

/// Lambert factor of a directional light: `clamp(dot(-forward, normal), 0, 1)`.
pub fn directional_intensity(normal: Vec3, light_forward: Vec3) -> f32 {
    (-light_forward.normalize_or_zero())
        .dot(normal.normalize_or_zero())
        .clamp(0.0, 1.0)
}

/// Blend towards [`NO_LIGHT`] by `strength` when the vertex is occluded.
fn darken(color: Color, shadowed: bool, strength: f32) -> Color {
    if shadowed {
        color.lerp(NO_LIGHT, strength)
    } else {
        color
    }
}

/// Color contributed by a point light.
///
/// `None` (no light) contributes [`NO_LIGHT`]. The shadow ray is only cast
/// when the light reaches the vertex, casts shadows, and the receiving object
/// accepts shadows.
pub fn color_from_point_light<Q>(
    vertex: Vec3,
    normal: Vec3,
    light: Option<&Light>,
    options: Option<&BakeOptions>,
    world: &Q,
) -> Color
where
    Q: OcclusionQuery + ?Sized,
{
    let Some(light) = light else {
        return NO_LIGHT;
    };
    let atten = point_intensity(vertex, light.position, light.range);
    positional_color(vertex, normal, light, atten, options, world)
}

/// Color contributed by a spot light. See [`color_from_point_light`].
pub fn color_from_spot_light<Q>(
    vertex: Vec3,
    normal: Vec3,
    light: Option<&Light>,
    options: Option<&BakeOptions>,
    world: &Q,
) -> Color
where
    Q: OcclusionQuery + ?Sized,
{
    let Some(light) = light else {
        return NO_LIGHT;
    };
    let atten = spot_intensity(
        vertex,
        light.position,
        light.forward,
        light.range,
        light.spot_angle,
    );
    positional_color(vertex, normal, light, atten, options, world)
}

fn positional_color<Q>(
    vertex: Vec3,
    normal: Vec3,
    light: &Light,
    atten: f32,
    options: Option<&BakeOptions>,
    world: &Q,
) -> Color
where
    Q: OcclusionQuery + ?Sized,
{
    let shadowed = atten > 0.0
        && light.shadows
        && receives_shadows(options)
        && is_occluded(world, vertex, light.position);

    let color =
        base_light_color(vertex, normal, light.position, light.color, light.intensity) * atten;
    darken(color, shadowed, light.shadow_strength)
}

/// Color contributed by a directional light.
///
/// The shadow ray is unbounded and points against `forward`.
pub fn color_from_directional_light<Q>(
    vertex: Vec3,
    normal: Vec3,
    light: Option<&Light>,
    options: Option<&BakeOptions>,
    world: &Q,
) -> Color
where
    Q: OcclusionQuery + ?Sized,
{
    let Some(light) = light else {
        return NO_LIGHT;
    };
    let shadowed = light.shadows
        && receives_shadows(options)
        && is_occluded_directional(world, vertex, light.forward);

    let color = (light.color * light.intensity * directional_intensity(normal, light.forward))
        .with_alpha(1.0);
    darken(color, shadowed, light.shadow_strength)
}
