//! Participants gathered at the start of a bake.

use crate::ambient::AmbientSettings;
use crate::collision::OcclusionQuery;
use crate::color::Color;
use crate::light::{Light, LightType};
use crate::lighting::{
    ambient_color, color_from_directional_light, color_from_point_light, color_from_spot_light,
    sponge_color,
};
use crate::options::BakeOptions;
use crate::scene::{ObjectId, Scene};
use crate::sponge::LightSponge;
use glam::Vec3;

/// A mesh object selected for baking.
#[derive(Clone, Debug, PartialEq)]
pub struct BakeTarget {
    /// Position in [`Scene::objects`].
    pub index: usize,
    pub id: ObjectId,
    pub name: String,
    pub options: Option<BakeOptions>,
}

/// Lights, sponges and targets of one bake, in scene order.
#[derive(Clone, Debug, Default)]
pub struct BakeData {
    pub directional_lights: Vec<Light>,
    /// Point and spot lights.
    pub lights: Vec<Light>,
    pub sponges: Vec<LightSponge>,
    pub targets: Vec<BakeTarget>,
}

impl BakeData {
    /// Snapshot the scene's participants.
    ///
    /// Targets are static objects that have not opted out. Sponges with no
    /// intensity are dropped since their mask is always white.
    pub fn collect(scene: &Scene) -> Self {
        let (directional_lights, lights): (Vec<Light>, Vec<Light>) = scene
            .lights
            .iter()
            .copied()
            .partition(|l| l.is_directional());

        let sponges = scene
            .sponges
            .iter()
            .filter(|s| {
                let active = s.intensity > 0.0;
                if !active {
                    log::debug!("Excluding light sponge at {} with zero intensity", s.position);
                }
                active
            })
            .copied()
            .collect();

        let targets = scene
            .objects
            .iter()
            .enumerate()
            .filter(|(_, o)| o.is_bake_target())
            .map(|(index, o)| BakeTarget {
                index,
                id: o.id,
                name: o.name.clone(),
                options: o.bake_options,
            })
            .collect();

        Self {
            directional_lights,
            lights,
            sponges,
            targets,
        }
    }

    /// Lit color of one world-space vertex.
    ///
    /// Ambient, plus directional lights, times every sponge mask, plus point
    /// and spot lights. Sponges therefore darken ambient and directional
    /// light but never point or spot light.
    pub fn shade_vertex<Q>(
        &self,
        vertex: Vec3,
        normal: Vec3,
        ambient: &AmbientSettings,
        options: Option<&BakeOptions>,
        world: &Q,
    ) -> Color
    where
        Q: OcclusionQuery + ?Sized,
    {
        let mut color = ambient_color(normal, ambient);

        for light in &self.directional_lights {
            color += color_from_directional_light(vertex, normal, Some(light), options, world);
        }

        for sponge in &self.sponges {
            color *= sponge_color(vertex, normal, Some(sponge));
        }

        for light in &self.lights {
            color += match light.kind {
                LightType::Spot => color_from_spot_light(vertex, normal, Some(light), options, world),
                _ => color_from_point_light(vertex, normal, Some(light), options, world),
            };
        }

        color
    }
}
