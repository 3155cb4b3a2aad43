use std::fs;

use fanout_core::Arch;

use super::loader::load_blueprint;
use super::run_common::{BuildArgs, build};

const BLUEPRINT: &str = r#"{
    "config": {"target_arches": ["arm64", "arm"]},
    "modules": [
        {"name": "libbase", "type": "cc_library_static"},
        {"name": "app", "type": "cc_binary", "static_libs": ["libbase"]}
    ]
}"#;

fn args(path: &std::path::Path) -> BuildArgs {
    BuildArgs {
        blueprint: path.to_path_buf(),
        jobs: None,
        arches: Vec::new(),
        json: false,
        color: false,
    }
}

#[test]
fn loads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Blueprint.json");
    fs::write(&path, BLUEPRINT).unwrap();

    assert_eq!(load_blueprint(&path).unwrap(), BLUEPRINT);
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.json");

    let err = load_blueprint(&path).unwrap_err();
    assert!(err.starts_with("failed to read '"), "{err}");
}

#[test]
fn directory_rejected() {
    let dir = tempfile::tempdir().unwrap();

    let err = load_blueprint(dir.path()).unwrap_err();
    assert!(err.ends_with("is a directory, expected a blueprint file"), "{err}");
}

#[test]
fn empty_file_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.json");
    fs::write(&path, "  \n").unwrap();

    let err = load_blueprint(&path).unwrap_err();
    assert!(err.ends_with("is empty"), "{err}");
}

#[test]
fn builds_from_file_with_blueprint_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Blueprint.json");
    fs::write(&path, BLUEPRINT).unwrap();

    let build = build(&args(&path)).unwrap();

    assert!(build.is_valid());
    assert_eq!(
        build.variant_names("libbase").unwrap(),
        ["arm64_core_static", "arm_core_static"]
    );
}

#[test]
fn flags_override_blueprint_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Blueprint.json");
    fs::write(&path, BLUEPRINT).unwrap();

    let mut args = args(&path);
    args.arches = vec![Arch::X86_64];
    args.jobs = Some(3);
    let build = build(&args).unwrap();

    assert_eq!(build.config().jobs, 3);
    assert_eq!(
        build.variant_names("libbase").unwrap(),
        ["x86_64_core_static"]
    );
}

#[test]
fn invalid_json_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, "{\"modules\": [}").unwrap();

    let Err(err) = build(&args(&path)) else {
        panic!("expected a parse error");
    };
    assert!(err.contains("bad.json: invalid blueprint:"), "{err}");
}
