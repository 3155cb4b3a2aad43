use std::sync::Arc;

use fanout_core::parse_blueprint;
use indoc::indoc;
use parking_lot::Mutex;

use super::Pipeline;
use crate::graph::Graph;
use crate::pipeline::Registries;

fn graph(json: &str) -> Graph {
    Graph::build(&parse_blueprint(json).unwrap().modules)
}

const DIAMOND: &str = indoc! {r#"
    {"modules": [
        {"name": "app", "type": "cc_binary", "static_libs": ["l", "r"], "shared_libs": ["so"]},
        {"name": "l", "type": "cc_library_static", "static_libs": ["base"]},
        {"name": "r", "type": "cc_library_static", "static_libs": ["base"]},
        {"name": "base", "type": "cc_library_static"},
        {"name": "so", "type": "cc_library_shared", "static_libs": ["base"]}
    ]}
"#};

#[test]
fn walk_deps_reaches_each_variant_once() {
    let mut graph = graph(DIAMOND);
    let seen = Arc::new(Mutex::new(Vec::new()));

    let log = seen.clone();
    let pipeline = Pipeline::new().top_down("walk", move |ctx| {
        if ctx.module().name() != "app" {
            return;
        }
        let mut reached = Vec::new();
        ctx.walk_deps(|edge, _| {
            reached.push(edge.target);
            true
        });
        log.lock().extend(reached);
    });
    pipeline.run(&mut graph, &Registries::new(), 1);

    let names: Vec<String> = seen
        .lock()
        .iter()
        .map(|&id| graph.module(id).name().to_string())
        .collect();
    assert_eq!(names, ["l", "base", "r", "so"]);
}

#[test]
fn walk_deps_recurses_only_when_asked() {
    let mut graph = graph(DIAMOND);
    let seen = Arc::new(Mutex::new(Vec::new()));

    let log = seen.clone();
    let pipeline = Pipeline::new().top_down("walk", move |ctx| {
        if ctx.module().name() != "app" {
            return;
        }
        let mut reached = Vec::new();
        ctx.walk_deps(|edge, _| {
            reached.push(edge.target);
            // Only `r` (declared third) is entered.
            edge.target.index() == 2
        });
        log.lock().extend(reached);
    });
    pipeline.run(&mut graph, &Registries::new(), 1);

    let names: Vec<String> = seen
        .lock()
        .iter()
        .map(|&id| graph.module(id).name().to_string())
        .collect();
    assert_eq!(names, ["l", "r", "base", "so"]);
}

#[test]
fn walk_deps_stamps_reached_variants() {
    let mut graph = graph(DIAMOND);

    let pipeline = Pipeline::new().top_down("stamp", |ctx| {
        if ctx.module().name() != "app" {
            return;
        }
        ctx.walk_deps(|edge, dep| {
            if !edge.tag.is_static() {
                return false;
            }
            dep.in_vendor = true;
            true
        });
    });
    pipeline.run(&mut graph, &Registries::new(), 1);

    let stamped: Vec<&str> = graph
        .modules()
        .filter(|m| m.variants()[0].in_vendor)
        .map(|m| m.name())
        .collect();
    assert_eq!(stamped, ["l", "r", "base"]);
}

#[test]
fn create_variations_stamps_pass_axis() {
    let mut graph = graph(r#"{"modules": [{"name": "lib", "type": "cc_library"}]}"#);

    let pipeline = Pipeline::new().bottom_up("flavor", |ctx| {
        let created = ctx.create_variations(&["", "x"]);
        created[1].props.srcs.push("x.c".to_string());
    });
    pipeline.run(&mut graph, &Registries::new(), 1);

    let lib = graph.module_by_name("lib").unwrap();
    assert_eq!(lib.variant_names(), ["", "x"]);
    assert_eq!(lib.variants()[0].variation.get("flavor"), Some(""));
    assert!(lib.variants()[0].props.srcs.is_empty());
    assert_eq!(lib.variants()[1].props.srcs, ["x.c"]);
}

#[test]
fn each_created_variant_is_visited_by_the_next_pass() {
    let mut graph = graph(r#"{"modules": [{"name": "lib", "type": "cc_library"}]}"#);

    let pipeline = Pipeline::new()
        .bottom_up("a", |ctx| {
            ctx.create_variations(&["a1", "a2"]);
        })
        .bottom_up("b", |ctx| {
            ctx.create_variations(&["b1", "b2"]);
        });
    pipeline.run(&mut graph, &Registries::new(), 1);

    let lib = graph.module_by_name("lib").unwrap();
    assert_eq!(lib.variant_names(), ["a1_b1", "a1_b2", "a2_b1", "a2_b2"]);
}

#[test]
#[should_panic(expected = "fanned out twice")]
fn fan_out_twice_in_one_visit_panics() {
    let mut graph = graph(r#"{"modules": [{"name": "lib", "type": "cc_library"}]}"#);

    let pipeline = Pipeline::new().bottom_up("twice", |ctx| {
        ctx.create_variations(&["a", "b"]);
        ctx.create_variations(&["c"]);
    });
    pipeline.run(&mut graph, &Registries::new(), 1);
}

#[test]
#[should_panic(expected = "empty name list")]
fn fan_out_to_nothing_panics() {
    let mut graph = graph(r#"{"modules": [{"name": "lib", "type": "cc_library"}]}"#);

    let pipeline = Pipeline::new().bottom_up("none", |ctx| {
        ctx.create_variations(&[]);
    });
    pipeline.run(&mut graph, &Registries::new(), 1);
}
