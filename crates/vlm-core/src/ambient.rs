//! Ambient lighting settings and environment probes.

use crate::color::Color;
use glam::Vec3;
use std::fmt;
use std::sync::Arc;

/// Direction-dependent ambient source (e.g. a baked sky probe).
pub trait AmbientProbe: Send + Sync {
    /// Ambient color arriving from around `direction` (a unit vector).
    fn evaluate(&self, direction: Vec3) -> Color;
}

/// How the ambient term is computed.
#[derive(Clone)]
pub enum AmbientMode {
    /// A single constant color.
    Flat(Color),
    /// Gradient between ground, equator and sky colors by normal elevation.
    Trilight {
        sky: Color,
        equator: Color,
        ground: Color,
    },
    /// External probe, scaled by [`AmbientSettings::intensity`].
    Probe(Arc<dyn AmbientProbe>),
}

impl fmt::Debug for AmbientMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmbientMode::Flat(c) => f.debug_tuple("Flat").field(c).finish(),
            AmbientMode::Trilight {
                sky,
                equator,
                ground,
            } => f
                .debug_struct("Trilight")
                .field("sky", sky)
                .field("equator", equator)
                .field("ground", ground)
                .finish(),
            AmbientMode::Probe(_) => f.write_str("Probe(..)"),
        }
    }
}

/// Ambient configuration passed explicitly to the lighting functions.
#[derive(Clone, Debug)]
pub struct AmbientSettings {
    pub mode: AmbientMode,
    /// Multiplier applied in [`AmbientMode::Probe`] mode.
    pub intensity: f32,
}

impl AmbientSettings {
    pub fn flat(color: Color) -> Self {
        Self {
            mode: AmbientMode::Flat(color),
            intensity: 1.0,
        }
    }

    pub fn trilight(sky: Color, equator: Color, ground: Color) -> Self {
        Self {
            mode: AmbientMode::Trilight {
                sky,
                equator,
                ground,
            },
            intensity: 1.0,
        }
    }

    pub fn probe(probe: Arc<dyn AmbientProbe>, intensity: f32) -> Self {
        Self {
            mode: AmbientMode::Probe(probe),
            intensity,
        }
    }
}

impl Default for AmbientSettings {
    fn default() -> Self {
        Self::flat(Color::BLACK)
    }
}

/// Real spherical-harmonics basis constants, bands 0-2.
const SH_C0: f32 = 0.282_095;
const SH_C1: f32 = 0.488_603;
const SH_C2: f32 = 1.092_548;
const SH_C3: f32 = 0.315_392;
const SH_C4: f32 = 0.546_274;

/// L2 spherical-harmonics ambient probe.
///
/// Coefficients are stored per basis function in the usual order
/// (l,m) = (0,0), (1,-1), (1,0), (1,1), (2,-2), (2,-1), (2,0), (2,1), (2,2),
/// using the standard real basis with +Z as the polar axis. They are expected
/// to be pre-convolved for irradiance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShProbe {
    pub coefficients: [Vec3; 9],
}

impl ShProbe {
    pub fn new(coefficients: [Vec3; 9]) -> Self {
        Self { coefficients }
    }

    /// Probe returning `color` in every direction.
    pub fn uniform(color: Color) -> Self {
        let mut coefficients = [Vec3::ZERO; 9];
        coefficients[0] = color.rgb_vec() / SH_C0;
        Self { coefficients }
    }

    fn basis(d: Vec3) -> [f32; 9] {
        [
            SH_C0,
            SH_C1 * d.y,
            SH_C1 * d.z,
            SH_C1 * d.x,
            SH_C2 * d.x * d.y,
            SH_C2 * d.y * d.z,
            SH_C3 * (3.0 * d.z * d.z - 1.0),
            SH_C2 * d.x * d.z,
            SH_C4 * (d.x * d.x - d.y * d.y),
        ]
    }
}

impl AmbientProbe for ShProbe {
    fn evaluate(&self, direction: Vec3) -> Color {
        let d = direction.normalize_or_zero();
        let rgb = Self::basis(d)
            .iter()
            .zip(self.coefficients.iter())
            .fold(Vec3::ZERO, |acc, (b, c)| acc + *c * *b);
        Color::rgb(rgb.x, rgb.y, rgb.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_probe_is_direction_independent() {
        let probe = ShProbe::uniform(Color::rgb(0.2, 0.4, 0.6));
        for d in [Vec3::X, Vec3::NEG_Y, Vec3::new(1.0, 1.0, -1.0)] {
            let c = probe.evaluate(d);
            assert!((c.r - 0.2).abs() < 1e-5);
            assert!((c.g - 0.4).abs() < 1e-5);
            assert!((c.b - 0.6).abs() < 1e-5);
            assert_eq!(c.a, 1.0);
        }
    }

    #[test]
    fn linear_band_tilts_towards_y() {
        let mut coefficients = [Vec3::ZERO; 9];
        coefficients[1] = Vec3::ONE;
        let probe = ShProbe::new(coefficients);
        assert!(probe.evaluate(Vec3::Y).r > 0.0);
        assert!(probe.evaluate(Vec3::NEG_Y).r < 0.0);
    }
}
