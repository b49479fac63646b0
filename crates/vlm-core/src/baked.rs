//! Stored bake output and its load-time re-application.

use crate::color::Color;
use crate::error::BakeError;
use crate::mesh::Mesh;

/// Per-vertex colors produced by one bake of one mesh.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BakedData {
    /// One color per mesh vertex.
    pub colors: Vec<Color>,
    /// Set by the bake, which already wrote `colors` into the mesh; the next
    /// [`BakedData::apply`] only clears it. Persisted with the colors so a
    /// save written right after a bake keeps the marker.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ignore_next_apply: bool,
}

/// What [`BakedData::apply`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Colors were written into the mesh.
    Applied,
    /// The mesh was already current; the ignore flag was consumed.
    Skipped,
}

impl BakedData {
    /// Data fresh from a bake, flagged so the next apply is a no-op.
    pub fn from_bake(colors: Vec<Color>) -> Self {
        Self {
            colors,
            ignore_next_apply: true,
        }
    }

    pub fn new(colors: Vec<Color>) -> Self {
        Self {
            colors,
            ignore_next_apply: false,
        }
    }

    /// Write the stored RGB into `mesh`'s vertex colors.
    ///
    /// Existing vertex alpha is kept; a mesh without colors gets alpha 1.0.
    pub fn apply(&mut self, mesh: Option<&mut Mesh>) -> Result<ApplyOutcome, BakeError> {
        if self.ignore_next_apply {
            self.ignore_next_apply = false;
            return Ok(ApplyOutcome::Skipped);
        }
        if self.colors.is_empty() {
            return Err(BakeError::EmptyBakedData);
        }
        let mesh = mesh.ok_or_else(|| BakeError::MissingMesh("baked data owner".into()))?;
        if mesh.vertex_count() != self.colors.len() {
            return Err(BakeError::VertexCountMismatch {
                mesh: mesh.vertex_count(),
                baked: self.colors.len(),
            });
        }

        if mesh.colors.len() != self.colors.len() {
            mesh.colors = vec![Color::WHITE; self.colors.len()];
        }
        for (dst, src) in mesh.colors.iter_mut().zip(&self.colors) {
            *dst = src.with_alpha(dst.a);
        }
        Ok(ApplyOutcome::Applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_bake_skips_first_apply_only() {
        let mut mesh = Mesh::quad(1.0);
        let mut data = BakedData::from_bake(vec![Color::rgb(0.5, 0.5, 0.5); 4]);
        assert_eq!(data.apply(Some(&mut mesh)).unwrap(), ApplyOutcome::Skipped);
        assert!(mesh.colors.is_empty());
        assert_eq!(data.apply(Some(&mut mesh)).unwrap(), ApplyOutcome::Applied);
        assert_eq!(mesh.colors.len(), 4);
    }
}
