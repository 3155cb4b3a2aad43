//! Arena-backed module/variant graph.
//!
//! Modules live in a `Vec` indexed by [`ModuleId`]; variants are addressed by
//! [`VariantRef`]. Edges point at a target *module* plus a requested
//! variation and are matched against the target's variants lazily, so a
//! fan-out never has to rewrite the edges of other modules.

mod build;
mod invariants;
mod matching;
mod order;

#[cfg(test)]
mod build_tests;

use indexmap::IndexMap;

use fanout_core::{DependencyTag, ModuleKind, Properties, Variation};

use crate::aspects::Aspect;
use crate::diagnostics::Diagnostics;

pub use matching::{Mismatch, match_edge};
pub use order::{ModuleOrder, module_order};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(u32);

impl ModuleId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One variant of one module. Indices are stable once the pipeline settles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariantRef {
    pub module: ModuleId,
    pub index: usize,
}

/// Outgoing dependency of a variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    pub tag: DependencyTag,
    pub target: ModuleId,
    /// Axes pinned by the edge itself. Unpinned axes are inherited.
    pub requested: Variation,
    /// Property that declared the edge, for diagnostics.
    pub property: &'static str,
}

impl Edge {
    pub fn new(tag: DependencyTag, target: ModuleId, property: &'static str) -> Self {
        let mut requested = Variation::new();
        if let Some(mode) = tag.link_mode() {
            requested.set(fanout_core::axis::LINK, mode);
        }
        Self {
            tag,
            target,
            requested,
            property,
        }
    }
}

/// One concrete instantiation of a module.
#[derive(Clone, Debug)]
pub struct Variant {
    pub variation: Variation,
    pub props: Properties,
    pub edges: Vec<Edge>,
    pub aspects: Vec<Aspect>,
    /// Per-axis default for this variant's own unpinned edges, consulted
    /// before inheriting the variant's own value.
    pub dependency_variation: Variation,
    /// Membership flag set by the image split.
    pub in_vendor: bool,
}

impl Variant {
    pub fn name(&self) -> String {
        self.variation.name()
    }

    /// Hidden variants exist only to satisfy static-link closures.
    pub fn is_hidden(&self) -> bool {
        self.installer().is_some_and(|i| i.hidden)
    }
}

#[derive(Clone, Debug)]
pub struct Module {
    pub(crate) id: ModuleId,
    pub(crate) name: String,
    /// `None` for an entry whose type could not be read.
    pub(crate) kind: Option<ModuleKind>,
    pub(crate) variants: Vec<Variant>,
    pub(crate) diagnostics: Diagnostics,
}

impl Module {
    pub fn id(&self) -> ModuleId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> Option<ModuleKind> {
        self.kind
    }

    /// Declared type for display, `unknown` when it could not be read.
    pub fn kind_name(&self) -> &'static str {
        self.kind.map_or("unknown", ModuleKind::as_str)
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn variant_names(&self) -> Vec<String> {
        self.variants.iter().map(Variant::name).collect()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// A module with any error is skipped by resolution output.
    pub fn is_failed(&self) -> bool {
        self.diagnostics.has_errors()
    }

    /// Modules this module currently depends on, in first-seen edge order.
    pub fn dependencies(&self) -> Vec<ModuleId> {
        let mut deps: Vec<ModuleId> = Vec::new();
        for variant in &self.variants {
            for edge in &variant.edges {
                if !deps.contains(&edge.target) {
                    deps.push(edge.target);
                }
            }
        }
        deps
    }
}

/// The module arena.
///
/// A slot is `None` while its module is checked out by a pass worker.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    slots: Vec<Option<Module>>,
    by_name: IndexMap<String, ModuleId>,
}

impl Graph {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Module ids in declaration order.
    pub fn module_ids(&self) -> impl Iterator<Item = ModuleId> + use<> {
        (0..self.slots.len() as u32).map(ModuleId)
    }

    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.slots.iter().flatten()
    }

    pub fn lookup(&self, name: &str) -> Option<ModuleId> {
        self.by_name.get(name).copied()
    }

    pub fn module(&self, id: ModuleId) -> &Module {
        self.ensure_present(id)
    }

    pub fn module_mut(&mut self, id: ModuleId) -> &mut Module {
        self.ensure_present_mut(id)
    }

    /// `None` while the module is checked out (e.g. it is the module being
    /// visited and the edge is a self-dependency).
    pub fn try_module(&self, id: ModuleId) -> Option<&Module> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    pub fn module_by_name(&self, name: &str) -> Option<&Module> {
        self.lookup(name).and_then(|id| self.try_module(id))
    }

    pub fn variant(&self, r: VariantRef) -> &Variant {
        &self.module(r.module).variants[r.index]
    }

    pub fn variant_mut(&mut self, r: VariantRef) -> &mut Variant {
        &mut self.module_mut(r.module).variants[r.index]
    }

    pub fn variant_refs(&self, id: ModuleId) -> impl Iterator<Item = VariantRef> + use<> {
        let count = self.module(id).variants.len();
        (0..count).map(move |index| VariantRef { module: id, index })
    }

    pub(crate) fn checkout(&mut self, id: ModuleId) -> Module {
        self.slots[id.index()]
            .take()
            .unwrap_or_else(|| invariants::already_checked_out(id))
    }

    pub(crate) fn restore(&mut self, module: Module) {
        let slot = &mut self.slots[module.id.index()];
        invariants::ensure_vacant(slot.is_none(), module.id);
        *slot = Some(module);
    }

    /// All diagnostics, grouped by module in declaration order.
    pub fn diagnostics(&self) -> Diagnostics {
        let mut all = Diagnostics::new();
        for module in self.modules() {
            all.extend(module.diagnostics.clone());
        }
        all
    }
}
