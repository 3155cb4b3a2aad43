use fanout_core::Arch;
use fanout_engine::{Build, BuildBuilder};
use indoc::indoc;

use super::{check, deps, link_order, registry, variants};

fn build(json: &str) -> Build {
    BuildBuilder::from_json(json)
        .unwrap()
        .with_target_arches(vec![Arch::Arm64])
        .load()
        .mutate()
        .resolve()
}

const BLUEPRINT: &str = indoc! {r#"
    {"modules": [
        {"name": "libbase", "type": "cc_library", "vendor_available": true},
        {"name": "libutil", "type": "cc_library_static", "static_libs": ["libbase"]},
        {"name": "app", "type": "cc_binary", "static_libs": ["libutil", "libbase"]}
    ]}
"#};

#[test]
fn variants_text() {
    let build = build(BLUEPRINT);

    insta::assert_snapshot!(variants::render(&build, Some("libbase"), false), @r"
    libbase (cc_library)
      arm64_core_static
      arm64_core_shared
      arm64_vendor_static
      arm64_vendor_shared
    ");
}

#[test]
fn variants_json() {
    let build = build(BLUEPRINT);

    insta::assert_snapshot!(variants::render(&build, Some("app"), true), @r#"
    [
      {
        "name": "app",
        "kind": "cc_binary",
        "failed": false,
        "variants": [
          {
            "name": "arm64_core",
            "hidden": false
          }
        ]
      }
    ]
    "#);
}

#[test]
fn deps_json() {
    let build = build(BLUEPRINT);

    insta::assert_snapshot!(deps::render(&build, Some("libutil"), true), @r#"
    [
      {
        "module": "libutil",
        "variant": "arm64_core_static",
        "hidden": false,
        "deps": {
          "static": [
            "libbase/arm64_core_static/libbase.a"
          ]
        },
        "whole_static": [],
        "include_dirs": []
      }
    ]
    "#);
}

#[test]
fn link_order_text() {
    let build = build(BLUEPRINT);

    insta::assert_snapshot!(link_order::render(&build, "app", false).unwrap(), @r"
    app arm64_core
      all: libutil/arm64_core_static/libutil.a libbase/arm64_core_static/libbase.a
      declared: libutil/arm64_core_static/libutil.a libbase/arm64_core_static/libbase.a
    ");
}

#[test]
fn link_order_json() {
    let build = build(BLUEPRINT);

    insta::assert_snapshot!(link_order::render(&build, "app", true).unwrap(), @r#"
    [
      {
        "variant": "arm64_core",
        "link_order": {
          "all": [
            "libutil/arm64_core_static/libutil.a",
            "libbase/arm64_core_static/libbase.a"
          ],
          "declared": [
            "libutil/arm64_core_static/libutil.a",
            "libbase/arm64_core_static/libbase.a"
          ]
        },
        "whole_static": []
      }
    ]
    "#);
}

#[test]
fn failed_module_leaves_others_rendered() {
    let build = build(indoc! {r#"
        {"modules": [
            {"name": "libbase", "type": "cc_library_static"},
            {"name": "broken", "type": "cc_binary", "static_libs": ["missing"]},
            {"name": "app", "type": "cc_binary", "static_libs": ["libbase"]}
        ]}
    "#});

    assert!(!build.is_valid());
    insta::assert_snapshot!(link_order::render(&build, "app", false).unwrap(), @r"
    app arm64_core
      all: libbase/arm64_core_static/libbase.a
      declared: libbase/arm64_core_static/libbase.a
    ");
    assert_eq!(link_order::render(&build, "broken", false).unwrap(), "");
    insta::assert_snapshot!(variants::render(&build, None, false), @r"
    libbase (cc_library_static)
      arm64_core_static
    broken (cc_binary) failed
      arm64_core
    app (cc_binary)
      arm64_core
    ");
}

#[test]
fn link_order_unknown_module() {
    let build = build(BLUEPRINT);

    let err = link_order::render(&build, "nope", false).unwrap_err();
    assert_eq!(err, "no module named `nope`");
}

#[test]
fn registry_text_and_json() {
    let build = build(BLUEPRINT);

    assert_eq!(
        registry::render(&build, Some("vendor_available_libraries"), false).unwrap(),
        "vendor_available_libraries: libbase\n"
    );
    assert_eq!(
        registry::render(&build, Some("vendor_available_libraries"), true).unwrap(),
        "[\n  \"libbase\"\n]\n"
    );
}

#[test]
fn registry_unknown_list() {
    let build = build(BLUEPRINT);

    let err = registry::render(&build, Some("nope"), false).unwrap_err();
    assert!(err.starts_with("unknown registry `nope` (known: llndk_libraries,"), "{err}");
}

#[test]
fn check_strict_fails_on_warnings() {
    let build = build(indoc! {r#"
        {"modules": [
            {"name": "lib", "type": "cc_library_static",
             "target": {"vendor": {"srcs": ["v.c"]}}}
        ]}
    "#});

    assert!(check::is_valid(&build, false));
    assert!(!check::is_valid(&build, true));
}

#[test]
fn check_json_summary() {
    let build = build(indoc! {r#"
        {"modules": [
            {"name": "app", "type": "cc_binary", "static_libs": ["missing"]}
        ]}
    "#});

    insta::assert_snapshot!(check::render_json(&build, build.is_valid()), @r#"
    {
      "valid": false,
      "modules": 1,
      "variants": 1,
      "errors": 1,
      "warnings": 0
    }
    "#);
}
