//! Multiplicative occlusion masks from light sponges.

use super::{attenuation, point_intensity};
use crate::color::Color;
use crate::sponge::{LightSponge, SpongeShape};
use glam::{Quat, Vec3};

/// Mask for one sponge at `vertex`: white means no effect.
///
/// `None` yields white.
pub fn sponge_color(vertex: Vec3, normal: Vec3, sponge: Option<&LightSponge>) -> Color {
    let Some(sponge) = sponge else {
        return Color::WHITE;
    };
    match sponge.shape {
        SpongeShape::Sphere { radius } => sphere_sponge_color(
            vertex,
            normal,
            sponge.position,
            radius,
            sponge.intensity,
            sponge.ignore_reverse_normals,
        ),
        SpongeShape::Box { half_extents } => box_sponge_color(
            vertex,
            normal,
            sponge.position,
            sponge.rotation,
            half_extents,
            sponge.intensity,
            sponge.ignore_reverse_normals,
        ),
    }
}

pub fn sphere_sponge_color(
    vertex: Vec3,
    normal: Vec3,
    center: Vec3,
    radius: f32,
    intensity: f32,
    ignore_reverse_normals: bool,
) -> Color {
    let atten = point_intensity(vertex, center, radius);
    mask(atten, intensity * normal_factor(vertex, normal, center, ignore_reverse_normals))
}

pub fn box_sponge_color(
    vertex: Vec3,
    normal: Vec3,
    center: Vec3,
    rotation: Quat,
    half_extents: Vec3,
    intensity: f32,
    ignore_reverse_normals: bool,
) -> Color {
    let local = rotation.inverse() * (vertex - center);
    let atten = attenuation(local.x.abs(), half_extents.x)
        * attenuation(local.y.abs(), half_extents.y)
        * attenuation(local.z.abs(), half_extents.z);
    mask(atten, intensity * normal_factor(vertex, normal, center, ignore_reverse_normals))
}

/// 1.0, or a hard 0/1 cutoff on whether `normal` faces the sponge center.
fn normal_factor(vertex: Vec3, normal: Vec3, center: Vec3, ignore_reverse_normals: bool) -> f32 {
    if !ignore_reverse_normals {
        return 1.0;
    }
    if normal.dot((center - vertex).normalize_or_zero()) >= 0.0 {
        1.0
    } else {
        0.0
    }
}

fn mask(atten: f32, t: f32) -> Color {
    Color::WHITE
        .lerp(Color::WHITE * (1.0 - atten), t)
        .with_alpha(1.0)
}
