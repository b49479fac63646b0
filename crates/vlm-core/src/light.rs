//! Light sources that contribute to a bake.

use crate::color::Color;
use glam::Vec3;

/// Which falloff model a [`Light`] uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LightType {
    /// Parallel rays along `forward`, no position or range.
    Directional,
    /// Omnidirectional light with range falloff.
    #[default]
    Point,
    /// Cone light along `forward` with range falloff.
    Spot,
}

/// A light participating in a bake.
///
/// `position` is ignored by directional lights, `forward` by point lights,
/// and `range` by directional lights.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Light {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: LightType,
    /// World-space position (point and spot).
    pub position: Vec3,
    /// World-space direction the light points along (directional and spot).
    pub forward: Vec3,
    pub color: Color,
    /// Non-negative multiplier on `color`.
    pub intensity: f32,
    /// Distance at which attenuation reaches zero (point and spot).
    pub range: f32,
    /// Cone angle in degrees (spot).
    pub spot_angle: f32,
    /// Whether this light is tested for occlusion.
    pub shadows: bool,
    /// 0.0 = occlusion has no effect, 1.0 = occluded vertices get no light.
    pub shadow_strength: f32,
}

impl Light {
    pub fn directional(forward: Vec3, color: Color, intensity: f32) -> Self {
        Self {
            kind: LightType::Directional,
            forward,
            color,
            intensity,
            ..Self::default()
        }
    }

    pub fn point(position: Vec3, range: f32, color: Color, intensity: f32) -> Self {
        Self {
            kind: LightType::Point,
            position,
            range,
            color,
            intensity,
            ..Self::default()
        }
    }

    pub fn spot(
        position: Vec3,
        forward: Vec3,
        range: f32,
        spot_angle: f32,
        color: Color,
        intensity: f32,
    ) -> Self {
        Self {
            kind: LightType::Spot,
            position,
            forward,
            range,
            spot_angle,
            color,
            intensity,
            ..Self::default()
        }
    }

    /// Enable shadow testing with the given strength.
    pub fn with_shadows(mut self, strength: f32) -> Self {
        self.shadows = true;
        self.shadow_strength = strength;
        self
    }

    pub fn is_directional(&self) -> bool {
        self.kind == LightType::Directional
    }
}

impl Default for Light {
    fn default() -> Self {
        Self {
            kind: LightType::Point,
            position: Vec3::ZERO,
            forward: Vec3::Z,
            color: Color::WHITE,
            intensity: 1.0,
            range: 10.0,
            spot_angle: 30.0,
            shadows: false,
            shadow_strength: 1.0,
        }
    }
}
