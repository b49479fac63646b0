use crate::error::BakeToolError;
use glam::Vec3;
use std::path::Path;
use vlm_core::{Color, Mesh};

/// Load an OBJ file and merge all objects/groups into one bakeable mesh.
///
/// Vertex colors (`v x y z r g b`) are kept when present. Meshes without
/// normals get smooth normals computed from their faces.
pub fn load_mesh(path: &Path) -> Result<Mesh, BakeToolError> {
    let load_options = tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    };

    let (models, _materials) =
        tobj::load_obj(path, &load_options).map_err(|e| BakeToolError::ObjParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if models.len() > 1 {
        log::warn!(
            "{} contains {} objects/groups, all geometry will be merged",
            path.display(),
            models.len()
        );
    }

    let mesh = merge_models(&models);
    if mesh.positions.is_empty() || mesh.indices.is_empty() {
        return Err(BakeToolError::Validation(format!(
            "Mesh has no vertices or faces: {}",
            path.display()
        )));
    }
    Ok(mesh)
}

/// Merge tobj models into a single vertex and index list.
fn merge_models(models: &[tobj::Model]) -> Mesh {
    let mut mesh = Mesh::default();
    let mut missing_normals = false;
    let mut any_colors = false;

    for model in models {
        let src = &model.mesh;
        if src.positions.is_empty() {
            continue;
        }

        let offset = mesh.positions.len() as u32;
        let vert_count = src.positions.len() / 3;
        let has_normals = src.normals.len() == src.positions.len();
        let has_colors = src.vertex_color.len() == src.positions.len();

        if !has_normals {
            log::warn!("Mesh '{}' has no normals, recalculating", model.name);
            missing_normals = true;
        }
        any_colors |= has_colors;

        for i in 0..vert_count {
            mesh.positions.push(vec3_at(&src.positions, i));
            mesh.normals.push(if has_normals {
                vec3_at(&src.normals, i)
            } else {
                Vec3::ZERO
            });
            mesh.colors.push(if has_colors {
                let c = vec3_at(&src.vertex_color, i);
                Color::rgb(c.x, c.y, c.z)
            } else {
                Color::WHITE
            });
        }

        mesh.indices.extend(src.indices.iter().map(|&idx| idx + offset));
    }

    if !any_colors {
        mesh.colors.clear();
    }
    if missing_normals {
        mesh.recalculate_normals();
    }
    mesh
}

fn vec3_at(data: &[f32], i: usize) -> Vec3 {
    Vec3::new(data[i * 3], data[i * 3 + 1], data[i * 3 + 2])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_obj(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_quad_with_normals() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_obj(
            dir.path(),
            "quad.obj",
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\n\
             vn 0 0 1\n\
             f 1//1 2//1 3//1 4//1\n",
        );

        let mesh = load_mesh(&path).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.indices.len(), 6);
        assert!(mesh.colors.is_empty());
        for n in &mesh.normals {
            assert!((*n - Vec3::Z).length() < 1e-6, "normal {n}");
        }
    }

    #[test]
    fn test_missing_normals_are_recalculated() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_obj(
            dir.path(),
            "tri.obj",
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n",
        );

        let mesh = load_mesh(&path).unwrap();
        assert_eq!(mesh.normals.len(), 3);
        for n in &mesh.normals {
            assert!((*n - Vec3::Z).length() < 1e-6, "normal {n}");
        }
    }

    #[test]
    fn test_vertex_colors_are_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_obj(
            dir.path(),
            "colored.obj",
            "v 0 0 0 1 0 0\nv 1 0 0 0 1 0\nv 0 1 0 0 0 1\nf 1 2 3\n",
        );

        let mesh = load_mesh(&path).unwrap();
        assert_eq!(
            mesh.colors,
            vec![
                Color::rgb(1.0, 0.0, 0.0),
                Color::rgb(0.0, 1.0, 0.0),
                Color::rgb(0.0, 0.0, 1.0),
            ]
        );
    }

    #[test]
    fn test_multiple_groups_are_merged() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_obj(
            dir.path(),
            "two.obj",
            "o a\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n\
             o b\nv 0 0 1\nv 1 0 1\nv 0 1 1\nf 4 5 6\n",
        );

        let mesh = load_mesh(&path).unwrap();
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.indices.len(), 6);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
    }

    #[test]
    fn test_empty_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_obj(dir.path(), "empty.obj", "# nothing\n");
        assert!(load_mesh(&path).is_err());
    }

    #[test]
    fn test_missing_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_mesh(&dir.path().join("absent.obj"));
        assert!(matches!(result, Err(BakeToolError::ObjParse { .. })));
    }
}
