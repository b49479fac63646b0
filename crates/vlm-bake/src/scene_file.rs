//! JSON scene description consumed by the `vlm-bake` tool.
//!
//! ```json
//! {
//!   "ambient": { "mode": "trilight", "sky": [0.5, 0.6, 0.8, 1], "equator": [0.3, 0.3, 0.3, 1], "ground": [0.1, 0.1, 0.1, 1] },
//!   "lights": [ { "type": "directional", "forward": [0, -1, 0], "shadows": true } ],
//!   "sponges": [ { "shape": "sphere", "radius": 2.0, "position": [0, 1, 0] } ],
//!   "objects": [ { "name": "floor", "mesh": "floor.obj", "collider": true } ]
//! }
//! ```

use crate::error::BakeToolError;
use crate::obj_loader;
use crate::obj_writer::obj_file_name;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use vlm_core::{
    AmbientSettings, BakeOptions, Color, Light, LightSponge, Mesh, Scene, SceneObject, ShProbe,
    Transform,
};

/// Root of a scene description file.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneFile {
    pub ambient: AmbientConfig,
    pub lights: Vec<Light>,
    pub sponges: Vec<LightSponge>,
    pub objects: Vec<ObjectConfig>,
}

/// Ambient block. Colors are `[r, g, b, a]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AmbientConfig {
    Flat {
        color: Color,
    },
    Trilight {
        sky: Color,
        equator: Color,
        ground: Color,
    },
    /// L2 spherical harmonics, nine RGB coefficients.
    Probe {
        coefficients: [[f32; 3]; 9],
        #[serde(default = "default_intensity")]
        intensity: f32,
    },
}

impl Default for AmbientConfig {
    fn default() -> Self {
        AmbientConfig::Flat {
            color: Color::BLACK,
        }
    }
}

impl AmbientConfig {
    pub fn to_settings(&self) -> AmbientSettings {
        match self {
            AmbientConfig::Flat { color } => AmbientSettings::flat(*color),
            AmbientConfig::Trilight {
                sky,
                equator,
                ground,
            } => AmbientSettings::trilight(*sky, *equator, *ground),
            AmbientConfig::Probe {
                coefficients,
                intensity,
            } => {
                let coefficients = coefficients.map(Vec3::from_array);
                AmbientSettings::probe(Arc::new(ShProbe::new(coefficients)), *intensity)
            }
        }
    }
}

fn default_intensity() -> f32 {
    1.0
}

fn default_true() -> bool {
    true
}

/// One scene object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectConfig {
    /// Unique within the scene; keys the baked output.
    pub name: String,
    /// OBJ file, relative to the scene file. Objects without one are skipped
    /// by the bake.
    #[serde(default)]
    pub mesh: Option<PathBuf>,
    #[serde(default)]
    pub transform: Transform,
    #[serde(default = "default_true")]
    pub static_lighting: bool,
    #[serde(default)]
    pub ignore_lightmapper: bool,
    #[serde(default)]
    pub bake_options: Option<BakeOptions>,
    /// The object already owns collision geometry.
    #[serde(default)]
    pub collider: bool,
}

impl SceneFile {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read and parse a scene file.
    pub fn load(path: &Path) -> Result<Self, BakeToolError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json).map_err(|source| BakeToolError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check the description before any mesh is loaded.
    pub fn validate(&self) -> Result<(), BakeToolError> {
        let mut names = HashSet::new();
        let mut files: HashMap<String, &str> = HashMap::new();
        for object in &self.objects {
            if object.name.is_empty() {
                return Err(BakeToolError::Validation("object with empty name".into()));
            }
            if !names.insert(object.name.as_str()) {
                return Err(BakeToolError::Validation(format!(
                    "duplicate object name: {}",
                    object.name
                )));
            }
            let file = obj_file_name(&object.name);
            if let Some(first) = files.get(&file) {
                return Err(BakeToolError::FileNameCollision {
                    file,
                    first: first.to_string(),
                    second: object.name.clone(),
                });
            }
            files.insert(file, &object.name);
        }
        for light in &self.lights {
            if !light.is_directional() && light.range <= 0.0 {
                log::warn!("Light at {} has range {}, it adds nothing", light.position, light.range);
            }
        }
        Ok(())
    }

    /// Build an in-memory scene, loading meshes relative to `base_dir`.
    pub fn build_scene(&self, base_dir: &Path) -> Result<Scene, BakeToolError> {
        self.validate()?;

        let mut scene = Scene::new();
        scene.ambient = self.ambient.to_settings();
        scene.lights.clone_from(&self.lights);
        scene.sponges.clone_from(&self.sponges);

        for config in &self.objects {
            let mesh = match &config.mesh {
                Some(relative) => {
                    let path = base_dir.join(relative);
                    log::info!("Loading mesh: {}", path.display());
                    Some(obj_loader::load_mesh(&path)?)
                }
                None => None,
            };
            let mut object = SceneObject::new(config.name.clone(), Mesh::default())
                .with_transform(config.transform);
            object.mesh = mesh;
            object.static_lighting = config.static_lighting;
            object.ignore_lightmapper = config.ignore_lightmapper;
            object.bake_options = config.bake_options;
            scene.add_object(object, config.collider);
        }

        log::info!(
            "Scene loaded: {} objects, {} lights, {} sponges",
            scene.objects().len(),
            scene.lights.len(),
            scene.sponges.len()
        );
        Ok(scene)
    }
}
