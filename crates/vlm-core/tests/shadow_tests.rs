//! Shadow tests against a real collision index.

use core::f32::consts::PI;
use glam::{Quat, Vec3};
use vlm_core::lighting::{
    color_from_directional_light, color_from_point_light, is_occluded, is_occluded_directional,
    NO_LIGHT,
};
use vlm_core::{BakeOptions, Color, CollisionWorld, Light, Mesh, MeshCollider, Transform};

/// Quad centered at `(0, 0, z)` whose front face looks down -Z, towards the origin.
fn ceiling(owner: u64, z: f32, options: Option<BakeOptions>) -> MeshCollider {
    let transform = Transform::new(
        Vec3::new(0.0, 0.0, z),
        Quat::from_rotation_x(PI),
        Vec3::ONE,
    );
    MeshCollider::from_mesh(owner, &Mesh::quad(4.0), &transform, options)
}

fn world_with(colliders: impl IntoIterator<Item = MeshCollider>) -> CollisionWorld {
    let mut world = CollisionWorld::new();
    for c in colliders {
        world.insert(c);
    }
    world
}

mod occlusion {
    use super::*;

    #[test]
    fn blocker_between_vertex_and_light() {
        let world = world_with([ceiling(1, 5.0, None)]);
        assert!(is_occluded(&world, Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0)));
    }

    #[test]
    fn blocker_beyond_light_is_ignored() {
        let world = world_with([ceiling(1, 12.0, None)]);
        assert!(!is_occluded(&world, Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0)));
    }

    #[test]
    fn back_faces_do_not_occlude() {
        let mut world = CollisionWorld::new();
        world.insert(MeshCollider::from_mesh(
            1,
            &Mesh::quad(4.0),
            &Transform::from_position(Vec3::new(0.0, 0.0, 5.0)),
            None,
        ));
        assert!(!is_occluded(&world, Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0)));
    }

    #[test]
    fn non_casting_blocker_is_ignored() {
        let options = BakeOptions {
            cast_shadows: false,
            ..Default::default()
        };
        let world = world_with([ceiling(1, 5.0, Some(options))]);
        assert!(!is_occluded(&world, Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0)));
    }

    #[test]
    fn any_casting_blocker_is_enough() {
        let options = BakeOptions {
            cast_shadows: false,
            ..Default::default()
        };
        let world = world_with([ceiling(1, 3.0, Some(options)), ceiling(2, 6.0, None)]);
        assert!(is_occluded(&world, Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0)));
    }

    #[test]
    fn light_at_vertex_is_never_occluded() {
        let world = world_with([ceiling(1, 5.0, None)]);
        assert!(!is_occluded(&world, Vec3::ZERO, Vec3::ZERO));
    }

    #[test]
    fn directional_ray_is_unbounded() {
        let world = world_with([ceiling(1, 10_000.0, None)]);
        assert!(is_occluded_directional(&world, Vec3::ZERO, Vec3::NEG_Z));
        // Light shining upwards: the ray towards it points down, away from the blocker.
        assert!(!is_occluded_directional(&world, Vec3::ZERO, Vec3::Z));
    }

    #[test]
    fn directional_ray_misses_offset_blocker() {
        let world = world_with([ceiling(1, 5.0, None)]);
        assert!(!is_occluded_directional(&world, Vec3::new(10.0, 0.0, 0.0), Vec3::NEG_Z));
    }
}

mod shaded_colors {
    use super::*;

    #[test]
    fn directional_light_under_roof() {
        let world = world_with([ceiling(1, 5.0, None)]);
        let sun = Light::directional(Vec3::NEG_Z, Color::WHITE, 1.0);

        let lit = color_from_directional_light(Vec3::ZERO, Vec3::Z, Some(&sun), None, &world);
        assert_eq!(lit, Color::WHITE);

        let shadowed = sun.with_shadows(1.0);
        let dark = color_from_directional_light(Vec3::ZERO, Vec3::Z, Some(&shadowed), None, &world);
        assert_eq!(dark, NO_LIGHT);
    }

    #[test]
    fn point_light_under_roof() {
        let world = world_with([ceiling(1, 1.0, None)]);
        let lamp = Light::point(Vec3::new(0.0, 0.0, 2.0), 4.0, Color::WHITE, 1.0).with_shadows(0.5);
        let c = color_from_point_light(Vec3::ZERO, Vec3::Z, Some(&lamp), None, &world);

        // (1 - 4/16)^2 halved by the shadow.
        let expected = 0.5625 * 0.5;
        assert!((c.r - expected).abs() < 1e-5, "r={}", c.r);
    }

    #[test]
    fn receiver_can_opt_out() {
        let world = world_with([ceiling(1, 5.0, None)]);
        let sun = Light::directional(Vec3::NEG_Z, Color::WHITE, 1.0).with_shadows(1.0);
        let options = BakeOptions {
            receive_shadows: false,
            ..Default::default()
        };
        let c = color_from_directional_light(Vec3::ZERO, Vec3::Z, Some(&sun), Some(&options), &world);
        assert_eq!(c, Color::WHITE);
    }
}
