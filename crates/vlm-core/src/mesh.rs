//! Local-space mesh data read and written by the bake.

use crate::color::Color;
use glam::Vec3;

/// Static mesh geometry in object space.
///
/// `positions` and `normals` are parallel arrays. `colors` is either empty
/// (the mesh has no vertex colors yet) or parallel to `positions`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub colors: Vec<Color>,
    /// Triangle list, three indices per face.
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new(positions: Vec<Vec3>, normals: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            normals,
            colors: Vec::new(),
            indices,
        }
    }

    pub fn with_colors(mut self, colors: Vec<Color>) -> Self {
        self.colors = colors;
        self
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Iterate triangles as index triples, skipping any that reference
    /// vertices out of range.
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        let count = self.positions.len();
        self.indices.chunks_exact(3).filter_map(move |tri| {
            let t = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            t.iter().all(|&i| i < count).then_some(t)
        })
    }

    /// Replace normals with area-weighted smooth vertex normals.
    pub fn recalculate_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.positions.len()];
        for [i0, i1, i2] in self.triangles() {
            let p0 = self.positions[i0];
            // Unnormalized cross product weights each face by its area.
            let face = (self.positions[i1] - p0).cross(self.positions[i2] - p0);
            normals[i0] += face;
            normals[i1] += face;
            normals[i2] += face;
        }
        self.normals = normals.into_iter().map(Vec3::normalize_or_zero).collect();
    }

    /// Axis-aligned quad in the XY plane centered on the origin, facing +Z.
    pub fn quad(size: f32) -> Self {
        let s = size / 2.0;
        Self::new(
            vec![
                Vec3::new(-s, -s, 0.0),
                Vec3::new(s, -s, 0.0),
                Vec3::new(s, s, 0.0),
                Vec3::new(-s, s, 0.0),
            ],
            vec![Vec3::Z; 4],
            vec![0, 1, 2, 0, 2, 3],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_normals_recalculate_to_plus_z() {
        let mut mesh = Mesh::quad(2.0);
        mesh.normals.clear();
        mesh.recalculate_normals();
        assert_eq!(mesh.normals.len(), 4);
        for n in &mesh.normals {
            assert!((*n - Vec3::Z).length() < 1e-6, "n = {n:?}");
        }
    }

    #[test]
    fn triangles_skip_out_of_range_indices() {
        let mut mesh = Mesh::quad(1.0);
        mesh.indices.extend_from_slice(&[0, 1, 9]);
        assert_eq!(mesh.triangles().count(), 2);
    }
}
