//! Light sponges: authored volumes that soak up ambient and directional light.

use glam::{Mat3, Quat, Vec3};

/// Volume shape of a [`LightSponge`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "shape", rename_all = "snake_case"))]
pub enum SpongeShape {
    Sphere { radius: f32 },
    /// Oriented box; falloff reaches zero at each half-extent.
    Box { half_extents: Vec3 },
}

impl Default for SpongeShape {
    fn default() -> Self {
        SpongeShape::Sphere { radius: 10.0 }
    }
}

/// An ambient-occlusion volume.
///
/// Sponges never add light. The bake multiplies accumulated ambient and
/// directional light by [`crate::lighting::sponge_color`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LightSponge {
    pub position: Vec3,
    /// Orientation, only used by box sponges.
    pub rotation: Quat,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub shape: SpongeShape,
    /// 0.0 = no effect, 1.0 = full darkening at the center.
    pub intensity: f32,
    /// Skip vertices whose normal faces away from the sponge center.
    pub ignore_reverse_normals: bool,
}

impl LightSponge {
    pub fn sphere(position: Vec3, radius: f32) -> Self {
        Self {
            position,
            shape: SpongeShape::Sphere { radius },
            ..Self::default()
        }
    }

    pub fn box_volume(position: Vec3, rotation: Quat, half_extents: Vec3) -> Self {
        Self {
            position,
            rotation,
            shape: SpongeShape::Box { half_extents },
            ..Self::default()
        }
    }

    /// Box sponge oriented so local +Z is `forward` and local +Y is as close
    /// to `up` as possible.
    pub fn box_looking(position: Vec3, forward: Vec3, up: Vec3, half_extents: Vec3) -> Self {
        Self::box_volume(position, look_rotation(forward, up), half_extents)
    }

    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }

    pub fn ignoring_reverse_normals(mut self) -> Self {
        self.ignore_reverse_normals = true;
        self
    }
}

impl Default for LightSponge {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            shape: SpongeShape::default(),
            intensity: 1.0,
            ignore_reverse_normals: false,
        }
    }
}

/// Rotation taking +Z to `forward` and +Y towards `up`.
///
/// Degenerate inputs (zero forward, or up parallel to forward) fall back to
/// the shortest arc from +Z.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let Some(f) = forward.try_normalize() else {
        return Quat::IDENTITY;
    };
    match up.cross(f).try_normalize() {
        Some(r) => {
            let u = f.cross(r);
            Quat::from_mat3(&Mat3::from_cols(r, u, f)).normalize()
        }
        None => Quat::from_rotation_arc(Vec3::Z, f),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn look_rotation_maps_z_to_forward() {
        let q = look_rotation(Vec3::X, Vec3::Y);
        assert!((q * Vec3::Z - Vec3::X).length() < 1e-5);
        assert!((q * Vec3::Y - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn look_rotation_parallel_up_still_points_forward() {
        let q = look_rotation(Vec3::Y, Vec3::Y);
        assert!((q * Vec3::Z - Vec3::Y).length() < 1e-5);
    }
}
