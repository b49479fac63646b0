//! In-memory scene: the participants a bake reads and the buffers it writes.

use crate::ambient::AmbientSettings;
use crate::baked::{ApplyOutcome, BakedData};
use crate::collision::{CollisionWorld, MeshCollider};
use crate::light::Light;
use crate::mesh::Mesh;
use crate::options::BakeOptions;
use crate::sponge::LightSponge;
use crate::transform::Transform;

pub type ObjectId = u64;

/// A mesh-carrying object in the scene.
#[derive(Clone, Debug)]
pub struct SceneObject {
    /// Assigned by [`Scene::add_object`].
    pub(crate) id: ObjectId,
    pub name: String,
    pub transform: Transform,
    pub mesh: Option<Mesh>,
    /// Flagged as static for lighting; only static objects are baked.
    pub static_lighting: bool,
    pub bake_options: Option<BakeOptions>,
    /// Explicit opt-out from baking even when static.
    pub ignore_lightmapper: bool,
    /// Result of the last bake, if any.
    pub baked: Option<BakedData>,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, mesh: Mesh) -> Self {
        Self {
            id: 0,
            name: name.into(),
            transform: Transform::default(),
            mesh: Some(mesh),
            static_lighting: true,
            bake_options: None,
            ignore_lightmapper: false,
            baked: None,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_options(mut self, options: BakeOptions) -> Self {
        self.bake_options = Some(options);
        self
    }

    /// Static and not opted out.
    pub fn is_bake_target(&self) -> bool {
        self.static_lighting && !self.ignore_lightmapper
    }

    /// World-space collider for this object's mesh, if it has one.
    pub fn build_collider(&self) -> Option<MeshCollider> {
        self.mesh.as_ref().map(|mesh| {
            MeshCollider::from_mesh(self.id, mesh, &self.transform, self.bake_options)
        })
    }
}

/// Scene contents consumed and produced by [`crate::bake::bake`].
///
/// Objects enter only through [`Scene::add_object`], so every object has a
/// distinct id.
#[derive(Debug, Default)]
pub struct Scene {
    pub(crate) objects: Vec<SceneObject>,
    pub lights: Vec<Light>,
    pub sponges: Vec<LightSponge>,
    pub ambient: AmbientSettings,
    pub collision: CollisionWorld,
    next_id: ObjectId,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object, assigning it a fresh id.
    ///
    /// `with_collider` registers a persistent collider, as for objects that
    /// already own collision geometry. Bake targets without one get a
    /// temporary collider for the duration of a bake.
    pub fn add_object(&mut self, mut object: SceneObject, with_collider: bool) -> ObjectId {
        object.id = self.next_id;
        self.next_id += 1;
        if with_collider {
            if let Some(collider) = object.build_collider() {
                self.collision.insert(collider);
            }
        }
        let id = object.id;
        self.objects.push(object);
        id
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn add_sponge(&mut self, sponge: LightSponge) {
        self.sponges.push(sponge);
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Objects in insertion order. The slice cannot grow; use
    /// [`Scene::add_object`] to add more.
    pub fn objects_mut(&mut self) -> &mut [SceneObject] {
        &mut self.objects
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    pub fn object_by_name(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    /// Drop every stored bake result, returning how many there were.
    pub fn clear_baked(&mut self) -> usize {
        let mut cleared = 0;
        for object in &mut self.objects {
            if object.baked.take().is_some() {
                cleared += 1;
            }
        }
        cleared
    }

    /// Re-apply stored bake results to their meshes, as a scene load would.
    ///
    /// Returns the number of meshes whose colors were written. Failures are
    /// logged and skipped.
    pub fn apply_baked(&mut self) -> usize {
        let mut applied = 0;
        for object in &mut self.objects {
            let Some(baked) = object.baked.as_mut() else {
                continue;
            };
            match baked.apply(object.mesh.as_mut()) {
                Ok(ApplyOutcome::Applied) => applied += 1,
                Ok(ApplyOutcome::Skipped) => {
                    log::debug!("{}: baked colors already current", object.name)
                }
                Err(e) => log::error!("Couldn't apply vertex colors to {}: {}", object.name, e),
            }
        }
        applied
    }
}
