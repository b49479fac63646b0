use crate::error::BakeToolError;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use vlm_core::Mesh;

/// File name for an object's baked mesh: the name with anything outside
/// `[A-Za-z0-9_-]` replaced by `_`, plus `.obj`.
pub fn obj_file_name(object_name: &str) -> String {
    let stem: String = object_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}.obj", if stem.is_empty() { "_" } else { &stem })
}

/// Write `mesh` as an OBJ file into `out_dir` and return its path.
///
/// Vertex colors are emitted as `v x y z r g b` with RGB clamped to 0-1;
/// alpha is not representable and is dropped.
pub fn write_mesh(mesh: &Mesh, object_name: &str, out_dir: &Path) -> Result<PathBuf, BakeToolError> {
    fs::create_dir_all(out_dir)?;
    let path = out_dir.join(obj_file_name(object_name));
    let mut out = BufWriter::new(fs::File::create(&path)?);
    write_obj(&mut out, mesh, object_name)?;
    out.flush()?;
    Ok(path)
}

/// Serialize `mesh` in OBJ text form.
pub fn write_obj<W: Write>(out: &mut W, mesh: &Mesh, object_name: &str) -> std::io::Result<()> {
    writeln!(out, "# Baked vertex lighting")?;
    writeln!(out, "o {}", object_name)?;

    let colored = mesh.colors.len() == mesh.positions.len();
    for (i, p) in mesh.positions.iter().enumerate() {
        if colored {
            let c = mesh.colors[i].saturate();
            writeln!(out, "v {} {} {} {} {} {}", p.x, p.y, p.z, c.r, c.g, c.b)?;
        } else {
            writeln!(out, "v {} {} {}", p.x, p.y, p.z)?;
        }
    }

    let has_normals = mesh.normals.len() == mesh.positions.len();
    if has_normals {
        for n in &mesh.normals {
            writeln!(out, "vn {} {} {}", n.x, n.y, n.z)?;
        }
    }

    for [a, b, c] in mesh.triangles() {
        let (a, b, c) = (a + 1, b + 1, c + 1);
        if has_normals {
            writeln!(out, "f {a}//{a} {b}//{b} {c}//{c}")?;
        } else {
            writeln!(out, "f {a} {b} {c}")?;
        }
    }
    Ok(())
}
