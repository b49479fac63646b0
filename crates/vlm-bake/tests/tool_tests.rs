//! End-to-end runs of the bake and apply commands on files in a temp dir.
//!
//! Only one bake may run per process, so everything that bakes lives in a
//! single test.

use std::fs;
use std::path::Path;
use vlm_bake::{apply_baked_file, bake_scene_file, BakeToolError, BakedFile};
use vlm_core::Color;

const QUAD_OBJ: &str = "v -1 -1 0\nv 1 -1 0\nv 1 1 0\nv -1 1 0\nvn 0 0 1\nf 1//1 2//1 3//1 4//1\n";

const SCENE: &str = r#"{
    "ambient": { "mode": "flat", "color": [0.25, 0.25, 0.25, 1] },
    "lights": [ { "type": "directional", "forward": [0, 0, -1], "intensity": 0.5 } ],
    "objects": [
        { "name": "floor", "mesh": "quad.obj" },
        { "name": "prop", "mesh": "quad.obj", "static_lighting": false },
        { "name": "marker" }
    ]
}"#;

fn write_scene(dir: &Path) -> std::path::PathBuf {
    fs::write(dir.join("quad.obj"), QUAD_OBJ).unwrap();
    let path = dir.join("scene.json");
    fs::write(&path, SCENE).unwrap();
    path
}

#[test]
fn bake_then_apply() {
    let dir = tempfile::tempdir().unwrap();
    let scene = write_scene(dir.path());
    let baked_path = dir.path().join("baked.json");

    let report = bake_scene_file(&scene, &baked_path).unwrap();
    assert_eq!(report.baked, vec!["floor".to_string()]);
    assert_eq!(report.skipped.len(), 1, "marker has no mesh");

    let baked = BakedFile::load(&baked_path).unwrap();
    assert_eq!(baked.objects.len(), 1);
    let floor = baked.get("floor").unwrap();
    assert_eq!(floor.colors, vec![Color::rgb(0.75, 0.75, 0.75); 4]);

    let out_dir = dir.path().join("lit");
    let written = apply_baked_file(&scene, &baked_path, &out_dir).unwrap();
    assert_eq!(written, vec![out_dir.join("floor.obj")]);

    let obj = fs::read_to_string(&written[0]).unwrap();
    assert!(obj.contains("v -1 -1 0 0.75 0.75 0.75\n"), "{obj}");
    assert!(!out_dir.join("prop.obj").exists());
}

#[test]
fn apply_skips_mismatched_colors() {
    let dir = tempfile::tempdir().unwrap();
    let scene = write_scene(dir.path());
    let baked_path = dir.path().join("baked.json");
    fs::write(
        &baked_path,
        r#"{ "objects": [
            { "name": "floor", "colors": [[1, 0, 0, 1]] },
            { "name": "prop", "colors": [[0, 1, 0, 1], [0, 1, 0, 1], [0, 1, 0, 1], [0, 1, 0, 1]] },
            { "name": "gone", "colors": [[1, 1, 1, 1]] }
        ] }"#,
    )
    .unwrap();

    let out_dir = dir.path().join("lit");
    let written = apply_baked_file(&scene, &baked_path, &out_dir).unwrap();

    assert_eq!(written, vec![out_dir.join("prop.obj")]);
    let obj = fs::read_to_string(&written[0]).unwrap();
    assert!(obj.contains("v 1 1 0 0 1 0\n"), "{obj}");
}

#[test]
fn malformed_scene_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let scene = dir.path().join("scene.json");
    fs::write(&scene, "{ \"objects\": [ { } ] }").unwrap();

    let err = bake_scene_file(&scene, &dir.path().join("baked.json")).unwrap_err();
    assert!(err.to_string().contains("scene.json"), "{err}");
}

#[test]
fn names_sharing_an_output_file_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("quad.obj"), QUAD_OBJ).unwrap();
    let scene = dir.path().join("scene.json");
    fs::write(
        &scene,
        r#"{ "objects": [
            { "name": "a b", "mesh": "quad.obj" },
            { "name": "a_b", "mesh": "quad.obj" }
        ] }"#,
    )
    .unwrap();
    let baked_path = dir.path().join("baked.json");
    fs::write(&baked_path, r#"{ "objects": [] }"#).unwrap();

    let result = apply_baked_file(&scene, &baked_path, &dir.path().join("lit"));
    assert!(
        matches!(result, Err(BakeToolError::FileNameCollision { .. })),
        "{result:?}"
    );
    assert!(!dir.path().join("lit").exists());
}
