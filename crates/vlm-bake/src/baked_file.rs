use crate::error::BakeToolError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use vlm_core::{Color, Scene};

/// Bake output: `{ "objects": [ { "name", "colors": [[r, g, b, a], ...] } ] }`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BakedFile {
    pub objects: Vec<BakedObject>,
}

/// Baked vertex colors of one object, one entry per mesh vertex.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BakedObject {
    pub name: String,
    pub colors: Vec<Color>,
}

impl BakedFile {
    /// Collect every object holding bake results, in scene order.
    pub fn from_scene(scene: &Scene) -> Self {
        let objects = scene
            .objects()
            .iter()
            .filter_map(|o| {
                o.baked.as_ref().map(|baked| BakedObject {
                    name: o.name.clone(),
                    colors: baked.colors.clone(),
                })
            })
            .collect();
        Self { objects }
    }

    pub fn get(&self, name: &str) -> Option<&BakedObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    pub fn load(path: &Path) -> Result<Self, BakeToolError> {
        let json = fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|source| BakeToolError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), BakeToolError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| BakeToolError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vlm_core::BakedData;

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("baked.json");
        let file = BakedFile {
            objects: vec![BakedObject {
                name: "floor".into(),
                colors: vec![Color::new(0.5, 0.25, 1.0, 1.0), Color::BLACK],
            }],
        };

        file.save(&path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"floor\""));

        assert_eq!(BakedFile::load(&path).unwrap(), file);
    }

    #[test]
    fn test_colors_are_rgba_arrays() {
        let file: BakedFile = serde_json::from_str(
            r#"{ "objects": [ { "name": "a", "colors": [[1, 0, 0, 0.5]] } ] }"#,
        )
        .unwrap();
        assert_eq!(
            file.get("a").map(|o| o.colors.clone()),
            Some(vec![Color::new(1.0, 0.0, 0.0, 0.5)])
        );
        assert!(file.get("b").is_none());
    }

    #[test]
    fn test_baked_data_keeps_apply_marker() {
        let fresh = BakedData::from_bake(vec![Color::WHITE]);
        let json = serde_json::to_string(&fresh).unwrap();
        assert!(json.contains("\"ignore_next_apply\":true"), "{json}");
        let back: BakedData = serde_json::from_str(&json).unwrap();
        assert!(back.ignore_next_apply);

        let legacy: BakedData = serde_json::from_str(r#"{ "colors": [[1, 1, 1, 1]] }"#).unwrap();
        assert!(!legacy.ignore_next_apply);
    }

    #[test]
    fn test_malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ \"objects\": 3 }").unwrap();
        let err = BakedFile::load(&path).unwrap_err();
        assert!(err.to_string().contains("bad.json"), "{err}");
    }
}
