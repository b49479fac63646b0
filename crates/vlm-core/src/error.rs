/// Errors raised while baking or re-applying vertex lighting.
#[derive(Debug, thiserror::Error)]
pub enum BakeError {
    /// Another bake holds the single-bake guard.
    #[error("a bake is already in progress")]
    BakeInProgress,

    /// The object has no mesh to bake or apply to.
    #[error("{0} has no mesh")]
    MissingMesh(String),

    /// The mesh exists but has no vertices.
    #[error("{0} has no vertices")]
    EmptyMesh(String),

    /// Normal array is not parallel to the position array.
    #[error("{name}: {normals} normals for {vertices} vertices")]
    NormalCountMismatch {
        name: String,
        vertices: usize,
        normals: usize,
    },

    /// Existing vertex colors are neither empty nor parallel to positions.
    #[error("{name}: {colors} vertex colors for {vertices} vertices")]
    ColorCountMismatch {
        name: String,
        vertices: usize,
        colors: usize,
    },

    /// Baked data holds no colors.
    #[error("baked color array is empty")]
    EmptyBakedData,

    /// Baked data was produced for a mesh with a different vertex count.
    #[error("vertex count mismatch: mesh has {mesh}, baked data has {baked}")]
    VertexCountMismatch { mesh: usize, baked: usize },
}
