use fanout_core::{DepKind, axis, parse_blueprint};
use indoc::indoc;

use crate::graph::Graph;

fn graph(json: &str) -> Graph {
    Graph::build(&parse_blueprint(json).unwrap().modules)
}

fn edge_kinds(graph: &Graph, name: &str) -> Vec<(DepKind, String)> {
    let module = graph.module_by_name(name).unwrap();
    module.variants()[0]
        .edges
        .iter()
        .map(|e| (e.tag.kind, graph.module(e.target).name().to_string()))
        .collect()
}

#[test]
fn edges_follow_aspect_order() {
    let graph = graph(indoc! {r#"
        {"modules": [
            {"name": "hdr", "type": "cc_library_headers"},
            {"name": "liba", "type": "cc_library_static"},
            {"name": "libw", "type": "cc_library_static"},
            {"name": "libso", "type": "cc_library_shared"},
            {"name": "crt", "type": "cc_object"},
            {"name": "app", "type": "cc_binary",
             "static_libs": ["liba"], "shared_libs": ["libso"],
             "whole_static_libs": ["libw"], "header_libs": ["hdr"], "objs": ["crt"]}
        ]}
    "#});

    assert_eq!(
        edge_kinds(&graph, "app"),
        vec![
            (DepKind::Header, "hdr".to_string()),
            (DepKind::WholeStatic, "libw".to_string()),
            (DepKind::Static, "liba".to_string()),
            (DepKind::Shared, "libso".to_string()),
            (DepKind::Object, "crt".to_string()),
        ]
    );
    assert!(graph.diagnostics().is_empty());
}

#[test]
fn link_edges_pin_the_link_axis() {
    let graph = graph(indoc! {r#"
        {"modules": [
            {"name": "liba", "type": "cc_library"},
            {"name": "hdr", "type": "cc_library_headers"},
            {"name": "app", "type": "cc_binary", "static_libs": ["liba"], "header_libs": ["hdr"]}
        ]}
    "#});

    let app = graph.module_by_name("app").unwrap();
    let edges = &app.variants()[0].edges;
    assert_eq!(edges[0].requested.get(axis::LINK), None);
    assert_eq!(edges[1].requested.get(axis::LINK), Some(axis::STATIC));
    assert_eq!(edges[1].property, "static_libs");
}

#[test]
fn exported_deps_are_reexport_edges() {
    let graph = graph(indoc! {r#"
        {"modules": [
            {"name": "liba", "type": "cc_library_static"},
            {"name": "libb", "type": "cc_library_static"},
            {"name": "lib", "type": "cc_library_static",
             "static_libs": ["liba", "libb"], "export_static_lib_headers": ["libb"]}
        ]}
    "#});

    let lib = graph.module_by_name("lib").unwrap();
    let reexport: Vec<bool> = lib.variants()[0]
        .edges
        .iter()
        .map(|e| e.tag.reexport)
        .collect();
    assert_eq!(reexport, vec![false, true]);
}

#[test]
fn aspects_selected_by_kind() {
    let graph = graph(indoc! {r#"
        {"modules": [
            {"name": "lib", "type": "cc_library"},
            {"name": "app", "type": "cc_binary"},
            {"name": "crt", "type": "cc_object"},
            {"name": "hdr", "type": "cc_library_headers"}
        ]}
    "#});

    let names = |m: &str| graph.module_by_name(m).unwrap().variants()[0].aspect_names();
    assert_eq!(
        names("lib"),
        ["compiler", "linker", "installer", "sanitize", "lto", "abi"]
    );
    assert_eq!(
        names("app"),
        ["compiler", "linker", "installer", "sanitize", "lto"]
    );
    assert_eq!(names("crt"), ["compiler", "linker"]);
    assert_eq!(names("hdr"), ["compiler"]);
}

#[test]
fn duplicate_module_marks_first_definition() {
    let graph = graph(indoc! {r#"
        {"modules": [
            {"name": "lib", "type": "cc_library"},
            {"name": "lib", "type": "cc_library_static"}
        ]}
    "#});

    assert_eq!(graph.len(), 1);
    assert!(graph.module_by_name("lib").unwrap().is_failed());
    insta::assert_snapshot!(graph.diagnostics().render(), @r"
    error[duplicate-module]: module `lib` is defined more than once
      --> module `lib`
    ");
}

#[test]
fn undefined_dependency_drops_edge() {
    let graph = graph(indoc! {r#"
        {"modules": [
            {"name": "app", "type": "cc_binary", "static_libs": ["libmissing"]}
        ]}
    "#});

    let app = graph.module_by_name("app").unwrap();
    assert!(app.variants()[0].edges.is_empty());
    assert!(app.is_failed());
    insta::assert_snapshot!(graph.diagnostics().render(), @r"
    error[undefined-dependency]: depends on undefined module `libmissing`
      --> module `app`, property `static_libs`
    ");
}

#[test]
fn forward_references_resolve() {
    let graph = graph(indoc! {r#"
        {"modules": [
            {"name": "app", "type": "cc_binary", "shared_libs": ["libz"]},
            {"name": "libz", "type": "cc_library_shared"}
        ]}
    "#});

    assert_eq!(
        edge_kinds(&graph, "app"),
        vec![(DepKind::Shared, "libz".to_string())]
    );
}

#[test]
fn headers_module_rejects_link_properties() {
    let graph = graph(indoc! {r#"
        {"modules": [
            {"name": "liba", "type": "cc_library_static"},
            {"name": "hdr", "type": "cc_library_headers", "static_libs": ["liba"]}
        ]}
    "#});

    insta::assert_snapshot!(graph.diagnostics().render(), @r"
    error[unsupported-property]: `static_libs` is not supported by this module type
      --> module `hdr`, property `static_libs`
    ");
    assert!(graph.module_by_name("hdr").unwrap().variants()[0].edges.is_empty());
}

#[test]
fn unlisted_export() {
    let graph = graph(indoc! {r#"
        {"modules": [
            {"name": "liba", "type": "cc_library"},
            {"name": "lib", "type": "cc_library",
             "shared_libs": ["liba"], "export_static_lib_headers": ["liba"]}
        ]}
    "#});

    insta::assert_snapshot!(graph.diagnostics().render(), @r"
    error[unlisted-export]: `liba` is exported but not listed as a dependency
      --> module `lib`, property `export_static_lib_headers`
    ");
}

#[test]
fn vendor_and_vendor_available_conflict() {
    let graph = graph(indoc! {r#"
        {"modules": [
            {"name": "lib", "type": "cc_library", "vendor": true, "vendor_available": true}
        ]}
    "#});

    insta::assert_snapshot!(graph.diagnostics().render(), @r"
    error[conflicting-image]: `vendor` and `vendor_available` are mutually exclusive
      --> module `lib`, property `vendor_available`
      = hint: `vendor_available` already builds a vendor variant
    ");
}

#[test]
fn exclusive_sanitizers_conflict() {
    let graph = graph(indoc! {r#"
        {"modules": [
            {"name": "app", "type": "cc_binary",
             "sanitize": {"address": true, "hwaddress": true}}
        ]}
    "#});

    insta::assert_snapshot!(graph.diagnostics().render(), @r"
    error[conflicting-sanitizers]: sanitizers are mutually exclusive
      --> module `app`, property `sanitize.hwaddress`
      = hint: `sanitize.address` and `sanitize.hwaddress` cannot be enabled together
    ");
}

#[test]
fn vendor_sources_on_core_only_module_warn() {
    let graph = graph(indoc! {r#"
        {"modules": [
            {"name": "lib", "type": "cc_library",
             "target": {"vendor": {"srcs": ["vendor.c"]}}}
        ]}
    "#});

    let diagnostics = graph.diagnostics();
    assert!(!diagnostics.has_errors());
    insta::assert_snapshot!(diagnostics.render(), @r"
    warning[ignored-vendor-property]: vendor-only property on a module without a vendor variant
      --> module `lib`, property `target.vendor`
    ");
}

#[test]
fn rejected_entries_keep_declaration_order() {
    let blueprint = parse_blueprint(indoc! {r#"
        {"modules": [
            {"name": "x", "type": "java_library"},
            {"name": "liba", "type": "cc_library_static"},
            {"name": "y", "type": "cc_binary", "srcs": 3},
            {"name": "libb", "type": "cc_library_static", "static_libs": ["y"]}
        ]}
    "#})
    .unwrap();
    let graph = Graph::from_blueprint(&blueprint);

    let modules: Vec<(&str, &str, usize, bool)> = graph
        .modules()
        .map(|m| (m.name(), m.kind_name(), m.variants().len(), m.is_failed()))
        .collect();
    assert_eq!(
        modules,
        [
            ("x", "unknown", 0, true),
            ("liba", "cc_library_static", 1, false),
            ("y", "cc_binary", 0, true),
            ("libb", "cc_library_static", 1, false),
        ]
    );
    assert_eq!(
        edge_kinds(&graph, "libb"),
        vec![(DepKind::Static, "y".to_string())]
    );
}

#[test]
fn rejected_entry_counts_as_a_duplicate() {
    let blueprint = parse_blueprint(indoc! {r#"
        {"modules": [
            {"name": "lib", "type": "cc_library_static", "srcs": 3},
            {"name": "lib", "type": "cc_library_static"}
        ]}
    "#})
    .unwrap();
    let graph = Graph::from_blueprint(&blueprint);

    insta::assert_snapshot!(graph.diagnostics().render(), @r"
    error[invalid-declaration]: invalid type: integer `3`, expected a sequence
      --> module `lib`, property `srcs`

    error[duplicate-module]: module `lib` is defined more than once
      --> module `lib`
    ");
}
