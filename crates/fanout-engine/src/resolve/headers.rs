//! Exported include dirs, including those reexported from dependencies.

use std::collections::HashMap;

use super::Resolution;
use crate::graph::{Graph, VariantRef};

struct Frame {
    at: VariantRef,
    deps: Vec<VariantRef>,
    next: usize,
}

/// Memoized exported include dirs per variant.
///
/// A variant exports its own `export_include_dirs` (prefixed with the module
/// name) followed by everything exported by the targets of its `reexport`
/// edges. Cycles see a provisional empty entry.
pub struct ExportedHeaders<'a> {
    graph: &'a Graph,
    resolution: &'a Resolution,
    memo: HashMap<VariantRef, Vec<String>>,
}

impl<'a> ExportedHeaders<'a> {
    pub fn new(graph: &'a Graph, resolution: &'a Resolution) -> Self {
        Self {
            graph,
            resolution,
            memo: HashMap::new(),
        }
    }

    fn reexported(&self, v: VariantRef) -> Vec<VariantRef> {
        let mut deps = Vec::new();
        for edge in self.resolution.edges(v) {
            if edge.tag.reexport && edge.tag.provides_headers() && !deps.contains(&edge.target) {
                deps.push(edge.target);
            }
        }
        deps
    }

    fn own(&self, v: VariantRef) -> Vec<String> {
        let module = self.graph.module(v.module);
        self.graph
            .variant(v)
            .props
            .export_include_dirs
            .iter()
            .map(|dir| format!("{}/{dir}", module.name()))
            .collect()
    }

    pub fn exported(&mut self, root: VariantRef) -> &[String] {
        if !self.memo.contains_key(&root) {
            self.walk(root);
        }
        &self.memo[&root]
    }

    fn walk(&mut self, root: VariantRef) {
        self.memo.insert(root, Vec::new());
        let mut stack = vec![Frame {
            at: root,
            deps: self.reexported(root),
            next: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            if let Some(&dep) = frame.deps.get(frame.next) {
                frame.next += 1;
                if !self.memo.contains_key(&dep) {
                    self.memo.insert(dep, Vec::new());
                    let deps = self.reexported(dep);
                    stack.push(Frame {
                        at: dep,
                        deps,
                        next: 0,
                    });
                }
                continue;
            }

            let Some(done) = stack.pop() else { break };
            let mut dirs = self.own(done.at);
            for dep in &done.deps {
                for dir in &self.memo[dep] {
                    if !dirs.contains(dir) {
                        dirs.push(dir.clone());
                    }
                }
            }
            self.memo.insert(done.at, dirs);
        }
    }
}
