//! Static link order.
//!
//! A static archive must appear on the link line before every archive it
//! depends on. [`order_deps`] builds one variant's line from the lines of
//! its direct dependencies; [`LinkOrderWalker`] memoizes those lines over
//! the resolved graph.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

use fanout_core::DepKind;

use super::{Resolution, invariants};
use crate::graph::{Graph, VariantRef};

/// Order one variant's link inputs.
///
/// Concatenates each direct static dependency followed by its transitive
/// line, then the same for shared dependencies, and keeps only the last
/// occurrence of every artifact. Returns `(all_ordered, declared_ordered)`
/// where the second is the first restricted to `direct_static`.
///
/// Panics when a direct dependency has no entry in `transitive`.
pub fn order_deps<A>(
    direct_static: &[A],
    direct_shared: &[A],
    transitive: &HashMap<A, Vec<A>>,
) -> (Vec<A>, Vec<A>)
where
    A: Clone + Eq + Hash + Debug,
{
    let mut concatenated: Vec<&A> = Vec::new();
    for dep in direct_static.iter().chain(direct_shared) {
        let Some(line) = transitive.get(dep) else {
            invariants::missing_memo_entry(dep)
        };
        concatenated.push(dep);
        concatenated.extend(line);
    }

    let mut seen: HashSet<&A> = HashSet::with_capacity(concatenated.len());
    let mut all: Vec<A> = concatenated
        .into_iter()
        .rev()
        .filter(|a| seen.insert(*a))
        .cloned()
        .collect();
    all.reverse();

    let direct: HashSet<&A> = direct_static.iter().collect();
    let declared = all.iter().filter(|a| direct.contains(a)).cloned().collect();

    (all, declared)
}

struct Frame {
    at: VariantRef,
    deps: Vec<VariantRef>,
    next: usize,
}

/// Memoized post-order walk over resolved static and shared library edges.
///
/// An entry is inserted empty before its dependencies are walked, so a
/// cycle sees the provisional line and terminates. A variant never appears
/// in its own line.
pub struct LinkOrderWalker<'a> {
    graph: &'a Graph,
    resolution: &'a Resolution,
    memo: HashMap<VariantRef, Vec<VariantRef>>,
}

impl<'a> LinkOrderWalker<'a> {
    pub fn new(graph: &'a Graph, resolution: &'a Resolution) -> Self {
        Self {
            graph,
            resolution,
            memo: HashMap::new(),
        }
    }

    pub fn graph(&self) -> &Graph {
        self.graph
    }

    /// Direct static and shared link inputs, in edge order, deduplicated.
    /// Whole-static inputs are linked separately.
    pub fn direct_deps(&self, v: VariantRef) -> (Vec<VariantRef>, Vec<VariantRef>) {
        let mut statics = Vec::new();
        let mut shareds = Vec::new();
        for edge in self.resolution.edges(v) {
            if !edge.tag.library {
                continue;
            }
            let list = match edge.tag.kind {
                DepKind::Static => &mut statics,
                DepKind::Shared | DepKind::Runtime => &mut shareds,
                _ => continue,
            };
            if !list.contains(&edge.target) {
                list.push(edge.target);
            }
        }
        (statics, shareds)
    }

    fn frame(&self, at: VariantRef) -> Frame {
        let (statics, shareds) = self.direct_deps(at);
        let mut deps = statics;
        deps.extend(shareds);
        Frame { at, deps, next: 0 }
    }

    fn walk(&mut self, root: VariantRef) {
        if self.memo.contains_key(&root) {
            return;
        }
        self.memo.insert(root, Vec::new());
        let mut stack = vec![self.frame(root)];

        while let Some(frame) = stack.last_mut() {
            if let Some(&dep) = frame.deps.get(frame.next) {
                frame.next += 1;
                if !self.memo.contains_key(&dep) {
                    self.memo.insert(dep, Vec::new());
                    stack.push(self.frame(dep));
                }
                continue;
            }

            let Some(done) = stack.pop() else { break };
            let (all, _) = self.order_direct(done.at);
            self.memo.insert(done.at, all);
        }
    }

    fn order_direct(&self, v: VariantRef) -> (Vec<VariantRef>, Vec<VariantRef>) {
        let (statics, shareds) = self.direct_deps(v);
        let (mut all, mut declared) = order_deps(&statics, &shareds, &self.memo);
        all.retain(|a| *a != v);
        declared.retain(|a| *a != v);
        (all, declared)
    }

    /// `(all_ordered, declared_ordered)` for `v`.
    pub fn order(&mut self, v: VariantRef) -> (Vec<VariantRef>, Vec<VariantRef>) {
        self.walk(v);
        self.order_direct(v)
    }
}
