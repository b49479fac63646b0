use std::path::PathBuf;
use vlm_core::BakeError;

/// Errors that can occur while loading, baking or writing a scene.
#[derive(Debug, thiserror::Error)]
pub enum BakeToolError {
    /// I/O error reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A scene or baked-data file is not valid JSON for its schema.
    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to parse an OBJ mesh file.
    #[error("OBJ parse error for {path}: {message}")]
    ObjParse { path: PathBuf, message: String },

    /// Input validation failed (duplicate names, empty mesh, etc.).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Two object names produce the same output file name.
    #[error("File name collision: {file} is produced by both {first:?} and {second:?}")]
    FileNameCollision {
        file: String,
        first: String,
        second: String,
    },

    /// The bake itself could not run.
    #[error("Bake error: {0}")]
    Bake(#[from] BakeError),
}
