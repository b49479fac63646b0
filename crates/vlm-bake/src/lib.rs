/// Error types for the bake tool.
pub mod error;

/// JSON scene description and scene construction.
pub mod scene_file;

/// Baked vertex colors on disk.
pub mod baked_file;

/// OBJ to mesh loading.
pub mod obj_loader;

/// Vertex-colored OBJ output.
pub mod obj_writer;

pub use baked_file::{BakedFile, BakedObject};
pub use error::BakeToolError;
pub use scene_file::SceneFile;

use std::path::{Path, PathBuf};
use vlm_core::{BakeReport, BakedData, LogProgress, Scene};

/// Load a scene file and the meshes it references.
pub fn load_scene(scene_path: &Path) -> Result<Scene, BakeToolError> {
    let file = SceneFile::load(scene_path)?;
    let base_dir = scene_path.parent().unwrap_or_else(|| Path::new(""));
    file.build_scene(base_dir)
}

/// Bake `scene_path` and write the resulting colors as JSON to `out_path`.
pub fn bake_scene_file(scene_path: &Path, out_path: &Path) -> Result<BakeReport, BakeToolError> {
    let mut scene = load_scene(scene_path)?;
    let report = vlm_core::bake(&mut scene, &mut LogProgress)?;

    for skipped in &report.skipped {
        log::warn!("  {} not baked: {}", skipped.name, skipped.reason);
    }

    BakedFile::from_scene(&scene).save(out_path)?;
    log::info!("Wrote {}", out_path.display());
    Ok(report)
}

/// Re-apply baked colors to a scene's meshes and write each as a
/// vertex-colored OBJ in `out_dir`.
///
/// Objects whose colors cannot be applied are logged and skipped. Returns
/// the written paths.
pub fn apply_baked_file(
    scene_path: &Path,
    baked_path: &Path,
    out_dir: &Path,
) -> Result<Vec<PathBuf>, BakeToolError> {
    let mut scene = load_scene(scene_path)?;
    let baked = BakedFile::load(baked_path)?;

    for entry in &baked.objects {
        if scene.object_by_name(&entry.name).is_none() {
            log::warn!("Baked data for unknown object {}", entry.name);
        }
    }

    let mut written = Vec::new();
    for object in scene.objects_mut() {
        let Some(entry) = baked.get(&object.name) else {
            continue;
        };
        let data = object.baked.insert(BakedData::new(entry.colors.clone()));
        if let Err(e) = data.apply(object.mesh.as_mut()) {
            log::error!("Couldn't apply vertex colors to {}: {}", object.name, e);
            continue;
        }
        if let Some(mesh) = &object.mesh {
            written.push(obj_writer::write_mesh(mesh, &object.name, out_dir)?);
        }
    }

    log::info!("Wrote {} meshes to {}", written.len(), out_dir.display());
    Ok(written)
}
