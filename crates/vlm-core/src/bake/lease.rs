//! Temporary colliders for bake targets that do not own one.

use super::data::BakeTarget;
use crate::collision::CollisionWorld;
use crate::scene::{ObjectId, SceneObject};

/// Borrow of the collision world holding the colliders created for a bake.
///
/// Dropping the lease unregisters exactly those colliders; colliders the
/// scene already had are left alone.
pub struct ProxyLease<'a> {
    world: &'a mut CollisionWorld,
    created: Vec<ObjectId>,
}

impl<'a> ProxyLease<'a> {
    /// Register a collider for every target missing one.
    ///
    /// Colliders already in the world take their owner's current bake
    /// options, so edits made after the collider was registered apply.
    pub fn acquire(
        world: &'a mut CollisionWorld,
        objects: &[SceneObject],
        targets: &[BakeTarget],
    ) -> Self {
        for object in objects {
            world.set_options(object.id, object.bake_options);
        }

        let mut created = Vec::new();
        for target in targets {
            if world.contains(target.id) {
                continue;
            }
            if let Some(collider) = objects.get(target.index).and_then(SceneObject::build_collider)
            {
                world.insert(collider);
                created.push(target.id);
            }
        }
        log::debug!(
            "Attached {} temporary colliders ({} total)",
            created.len(),
            world.len()
        );
        Self { world, created }
    }

    pub fn world(&self) -> &CollisionWorld {
        &*self.world
    }

    /// Ids whose colliders exist only for this bake.
    pub fn created(&self) -> &[ObjectId] {
        &self.created
    }
}

impl Drop for ProxyLease<'_> {
    fn drop(&mut self) {
        for id in self.created.drain(..) {
            self.world.remove(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bake::data::BakeData;
    use crate::mesh::Mesh;
    use crate::scene::Scene;

    #[test]
    fn drop_removes_only_created_colliders() {
        let mut scene = Scene::new();
        let kept = scene.add_object(SceneObject::new("kept", Mesh::quad(1.0)), true);
        let temp = scene.add_object(SceneObject::new("temp", Mesh::quad(1.0)), false);
        let data = BakeData::collect(&scene);

        let Scene {
            objects, collision, ..
        } = &mut scene;
        {
            let lease = ProxyLease::acquire(collision, objects, &data.targets);
            assert_eq!(lease.created(), &[temp]);
            assert!(lease.world().contains(kept) && lease.world().contains(temp));
        }
        assert!(collision.contains(kept));
        assert!(!collision.contains(temp));
    }
}
