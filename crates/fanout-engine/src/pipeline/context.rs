//! Per-visit contexts handed to pass callbacks.

use std::collections::HashSet;

use fanout_core::ModuleKind;
use tracing::debug;

use super::invariants;
use super::registry::Registries;
use crate::diagnostics::{DiagnosticBuilder, DiagnosticKind};
use crate::graph::{Edge, Graph, Module, ModuleId, Variant, VariantRef, match_edge};

/// Visit of one variant during a bottom-up pass.
///
/// Only the module being visited is mutable. Every other module is
/// reachable read-only through the graph, and its variants already reflect
/// this pass when it is a dependency.
pub struct BottomUpContext<'a> {
    pass: &'a str,
    graph: &'a Graph,
    registries: &'a Registries,
    module: &'a mut Module,
    index: usize,
    created: usize,
}

impl<'a> BottomUpContext<'a> {
    pub(super) fn new(
        pass: &'a str,
        graph: &'a Graph,
        registries: &'a Registries,
        module: &'a mut Module,
        index: usize,
    ) -> Self {
        Self {
            pass,
            graph,
            registries,
            module,
            index,
            created: 0,
        }
    }

    /// Number of variants this visit covered: the fan-out width, or one.
    pub(super) fn visited(&self) -> usize {
        self.created.max(1)
    }

    pub fn pass(&self) -> &str {
        self.pass
    }

    pub fn graph(&self) -> &Graph {
        self.graph
    }

    pub fn registries(&self) -> &Registries {
        self.registries
    }

    pub fn module_id(&self) -> ModuleId {
        self.module.id
    }

    pub fn module_name(&self) -> &str {
        &self.module.name
    }

    pub fn kind(&self) -> ModuleKind {
        self.module
            .kind
            .unwrap_or_else(|| invariants::visited_without_kind(&self.module.name, self.pass))
    }

    /// The visited variant, or the first created variant after a fan-out.
    pub fn variant(&self) -> &Variant {
        &self.module.variants[self.index]
    }

    pub fn variant_mut(&mut self) -> &mut Variant {
        &mut self.module.variants[self.index]
    }

    /// Variants covered by this visit: the created set after a fan-out,
    /// otherwise the visited variant alone.
    pub fn variants(&self) -> &[Variant] {
        &self.module.variants[self.index..self.index + self.visited()]
    }

    pub fn variants_mut(&mut self) -> &mut [Variant] {
        let end = self.index + self.visited();
        &mut self.module.variants[self.index..end]
    }

    /// Clone the visited variant once per name, stamping `pass = name` into
    /// each clone, and replace it in place with the clones.
    pub fn create_variations(&mut self, names: &[&str]) -> &mut [Variant] {
        if self.created > 0 {
            invariants::fanned_out_twice(&self.module.name, self.pass);
        }
        if names.is_empty() {
            invariants::empty_fan_out(&self.module.name, self.pass);
        }

        let origin = &self.module.variants[self.index];
        debug!(
            module = %self.module.name,
            origin = %origin.variation,
            axis = self.pass,
            ?names,
            "create variations"
        );

        let clones: Vec<Variant> = names
            .iter()
            .map(|name| {
                let mut clone = origin.clone();
                clone.variation.set(self.pass, name);
                clone
            })
            .collect();

        let range = self.index..self.index + names.len();
        self.module
            .variants
            .splice(self.index..self.index + 1, clones);
        self.created = names.len();
        &mut self.module.variants[range]
    }

    /// Resolve one of the visited variant's edges. `None` for edges that do
    /// not resolve to exactly one variant, and for self-dependencies.
    pub fn resolve(&self, edge: &Edge) -> Option<(VariantRef, &Variant)> {
        let target = self.graph.try_module(edge.target)?;
        let index = match_edge(self.variant(), edge, target).ok()?;
        let r = VariantRef {
            module: edge.target,
            index,
        };
        Some((r, &target.variants[index]))
    }

    /// Report against the visited variant.
    pub fn report(&mut self, kind: DiagnosticKind) -> DiagnosticBuilder<'_> {
        let variant = self.module.variants[self.index].name();
        let module = &mut *self.module;
        let builder = module.diagnostics.report(kind, &module.name);
        if variant.is_empty() {
            builder
        } else {
            builder.variant(variant)
        }
    }
}

/// Visit of one variant during a top-down pass.
pub struct TopDownContext<'a> {
    pass: &'a str,
    graph: &'a mut Graph,
    registries: &'a Registries,
    current: VariantRef,
}

struct Frame {
    at: VariantRef,
    edges: Vec<Edge>,
    next: usize,
}

impl<'a> TopDownContext<'a> {
    pub(super) fn new(
        pass: &'a str,
        graph: &'a mut Graph,
        registries: &'a Registries,
        current: VariantRef,
    ) -> Self {
        Self {
            pass,
            graph,
            registries,
            current,
        }
    }

    pub fn pass(&self) -> &str {
        self.pass
    }

    pub fn graph(&self) -> &Graph {
        self.graph
    }

    pub fn registries(&self) -> &Registries {
        self.registries
    }

    pub fn module(&self) -> &Module {
        self.graph.module(self.current.module)
    }

    pub fn current(&self) -> VariantRef {
        self.current
    }

    pub fn variant(&self) -> &Variant {
        self.graph.variant(self.current)
    }

    pub fn variant_mut(&mut self) -> &mut Variant {
        self.graph.variant_mut(self.current)
    }

    /// Depth-first walk of the current variant's dependency subgraph.
    ///
    /// `visit` sees each resolvable edge with its target variant and returns
    /// whether to recurse into it. A variant is recursed into at most once
    /// per walk; unresolvable edges are skipped.
    pub fn walk_deps(&mut self, mut visit: impl FnMut(&Edge, &mut Variant) -> bool) {
        let mut seen: HashSet<VariantRef> = HashSet::from([self.current]);
        let mut stack = vec![self.frame(self.current)];

        while let Some(frame) = stack.last_mut() {
            let Some(edge) = frame.edges.get(frame.next).cloned() else {
                stack.pop();
                continue;
            };
            frame.next += 1;
            let source = frame.at;

            let Some(target) = self.resolve_from(source, &edge) else {
                continue;
            };
            if seen.contains(&target) {
                continue;
            }
            if visit(&edge, self.graph.variant_mut(target)) {
                seen.insert(target);
                stack.push(self.frame(target));
            }
        }
    }

    fn frame(&self, at: VariantRef) -> Frame {
        Frame {
            at,
            edges: self.graph.variant(at).edges.clone(),
            next: 0,
        }
    }

    fn resolve_from(&self, source: VariantRef, edge: &Edge) -> Option<VariantRef> {
        let target = self.graph.module(edge.target);
        let index = match_edge(self.graph.variant(source), edge, target).ok()?;
        Some(VariantRef {
            module: edge.target,
            index,
        })
    }

    /// Report against the current variant.
    pub fn report(&mut self, kind: DiagnosticKind) -> DiagnosticBuilder<'_> {
        let current = self.current;
        let variant = self.graph.variant(current).name();
        let module = self.graph.module_mut(current.module);
        let builder = module.diagnostics.report(kind, &module.name);
        if variant.is_empty() {
            builder
        } else {
            builder.variant(variant)
        }
    }
}
