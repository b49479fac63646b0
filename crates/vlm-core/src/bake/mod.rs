//! Bake orchestration: collect participants, light every vertex of every
//! target, and commit the colors back onto the meshes.
//!
//! Per-target failures are logged and recorded in the [`BakeReport`]; the
//! remaining targets still bake. Re-running a bake on an unchanged scene
//! produces the same colors.

pub mod data;
pub mod lease;
pub mod progress;

pub use data::{BakeData, BakeTarget};
pub use lease::ProxyLease;
pub use progress::{BakeProgress, LogProgress, NoProgress};

use crate::ambient::AmbientSettings;
use crate::baked::BakedData;
use crate::collision::OcclusionQuery;
use crate::color::Color;
use crate::error::BakeError;
use crate::scene::{Scene, SceneObject};
use parking_lot::Mutex;

/// Held for the duration of a bake; at most one bake runs per process.
static BAKE_GUARD: Mutex<()> = parking_lot::const_mutex(());

/// A target that was not baked.
#[derive(Clone, Debug, PartialEq)]
pub struct SkippedTarget {
    pub name: String,
    pub reason: String,
}

/// Outcome of one [`bake`] call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BakeReport {
    /// Names of committed targets, in bake order.
    pub baked: Vec<String>,
    pub skipped: Vec<SkippedTarget>,
    /// Stale bake results removed before lighting.
    pub cleared: usize,
    /// The progress sink cancelled the bake before every target ran.
    pub cancelled: bool,
}

/// Bake vertex lighting for every eligible object in `scene`.
///
/// Phases run strictly in order:
/// 1. collect lights, sponges and targets, drop all previously baked
///    results, and attach temporary colliders;
/// 2. light each target's vertices;
/// 3. write each target's colors into its mesh and store them as
///    [`BakedData`] flagged to skip the next apply.
///
/// Temporary colliders are removed before returning.
pub fn bake(scene: &mut Scene, progress: &mut dyn BakeProgress) -> Result<BakeReport, BakeError> {
    let _guard = BAKE_GUARD.try_lock().ok_or(BakeError::BakeInProgress)?;

    progress.report("Gathering scene data", 0.0);
    let data = BakeData::collect(scene);
    log::info!(
        "Baking {} meshes: {} directional lights, {} point/spot lights, {} sponges",
        data.targets.len(),
        data.directional_lights.len(),
        data.lights.len(),
        data.sponges.len()
    );

    let mut report = BakeReport {
        cleared: scene.clear_baked(),
        ..BakeReport::default()
    };

    let Scene {
        objects,
        ambient,
        collision,
        ..
    } = scene;
    let lease = ProxyLease::acquire(collision, objects, &data.targets);

    let count = data.targets.len();
    for (i, target) in data.targets.iter().enumerate() {
        if progress.is_cancelled() {
            log::warn!("Bake cancelled after {} of {} meshes", i, count);
            report.cancelled = true;
            break;
        }

        let object = &mut objects[target.index];
        progress.report(
            &format!("Calculating lighting ({} {} / {})", target.name, i + 1, count),
            (i + 1) as f32 / count as f32,
        );

        match light_object(object, target, &data, ambient, lease.world()) {
            Ok(colors) => {
                commit(object, colors);
                report.baked.push(target.name.clone());
            }
            Err(e) => {
                log::warn!("Skipping {}: {}", target.name, e);
                report.skipped.push(SkippedTarget {
                    name: target.name.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    drop(lease);
    log::info!(
        "Bake finished: {} baked, {} skipped",
        report.baked.len(),
        report.skipped.len()
    );
    Ok(report)
}

/// Lit colors for every vertex of `object`, one per vertex.
///
/// Alpha comes from the mesh's existing vertex color, or 1.0 if it has none.
pub fn light_object<Q>(
    object: &SceneObject,
    target: &BakeTarget,
    data: &BakeData,
    ambient: &AmbientSettings,
    world: &Q,
) -> Result<Vec<Color>, BakeError>
where
    Q: OcclusionQuery + ?Sized,
{
    let mesh = object
        .mesh
        .as_ref()
        .ok_or_else(|| BakeError::MissingMesh(object.name.clone()))?;

    let vertices = mesh.vertex_count();
    if vertices == 0 {
        return Err(BakeError::EmptyMesh(object.name.clone()));
    }
    if mesh.normals.len() != vertices {
        return Err(BakeError::NormalCountMismatch {
            name: object.name.clone(),
            vertices,
            normals: mesh.normals.len(),
        });
    }
    if !mesh.colors.is_empty() && mesh.colors.len() != vertices {
        return Err(BakeError::ColorCountMismatch {
            name: object.name.clone(),
            vertices,
            colors: mesh.colors.len(),
        });
    }

    let options = target.options.as_ref();
    let colors = mesh
        .positions
        .iter()
        .zip(&mesh.normals)
        .enumerate()
        .map(|(i, (&position, &normal))| {
            let vertex = object.transform.transform_point(position);
            let normal = object.transform.transform_direction(normal);
            let alpha = mesh.colors.get(i).map_or(1.0, |c| c.a);
            data.shade_vertex(vertex, normal, ambient, options, world)
                .with_alpha(alpha)
        })
        .collect();
    Ok(colors)
}

fn commit(object: &mut SceneObject, colors: Vec<Color>) {
    if let Some(mesh) = object.mesh.as_mut() {
        mesh.colors.clone_from(&colors);
    }
    object.baked = Some(BakedData::from_bake(colors));
}
