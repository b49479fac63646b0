//! Static vertex-light baking.
//!
//! Computes a per-vertex color for every static mesh in a [`Scene`] from its
//! ambient settings, directional/point/spot lights and light sponges, with a
//! binary raycast shadow test against a [`CollisionWorld`]. The lighting math
//! lives in [`lighting`]; [`bake::bake`] drives it over every target.

pub mod ambient;
pub mod bake;
pub mod baked;
pub mod collision;
pub mod color;
pub mod error;
pub mod light;
pub mod lighting;
pub mod mesh;
pub mod options;
pub mod scene;
pub mod sponge;
pub mod transform;

pub use ambient::{AmbientMode, AmbientProbe, AmbientSettings, ShProbe};
pub use bake::{bake, BakeProgress, BakeReport, LogProgress, NoProgress, SkippedTarget};
pub use baked::{ApplyOutcome, BakedData};
pub use collision::{CollisionWorld, MeshCollider, OcclusionQuery, SurfaceHit};
pub use color::Color;
pub use error::BakeError;
pub use light::{Light, LightType};
pub use mesh::Mesh;
pub use options::BakeOptions;
pub use scene::{ObjectId, Scene, SceneObject};
pub use sponge::{LightSponge, SpongeShape};
pub use transform::Transform;
