//! Graph construction from module declarations.
//!
//! Two passes: allocate every module (declaration checks, aspect init, dep
//! collection), then resolve dependency names now that all modules exist.
//! Entries that could not be read become failed modules without variants.

use fanout_core::{Blueprint, ModuleDecl, ModuleKind, Properties, RejectedDecl, Variation};

use super::{Edge, Graph, Module, ModuleId, Variant};
use crate::aspects::{DepDecl, InitContext, aspects_for};
use crate::diagnostics::{DiagnosticKind, Diagnostics};

#[derive(Clone, Copy)]
enum Entry<'a> {
    Decl(&'a ModuleDecl),
    Rejected(&'a RejectedDecl),
}

impl<'a> Entry<'a> {
    fn name(self) -> &'a str {
        match self {
            Self::Decl(decl) => &decl.name,
            Self::Rejected(rejected) => &rejected.name,
        }
    }
}

impl Graph {
    pub fn build(decls: &[ModuleDecl]) -> Self {
        Self::build_entries(decls.iter().map(Entry::Decl).collect())
    }

    /// Build from a parsed blueprint, keeping rejected entries in
    /// declaration order.
    pub fn from_blueprint(blueprint: &Blueprint) -> Self {
        let mut rejected = blueprint.rejected.iter().peekable();
        let mut entries = Vec::with_capacity(blueprint.modules.len() + blueprint.rejected.len());
        for (position, decl) in blueprint.modules.iter().enumerate() {
            while let Some(r) = rejected.next_if(|r| r.position <= position) {
                entries.push(Entry::Rejected(r));
            }
            entries.push(Entry::Decl(decl));
        }
        entries.extend(rejected.map(Entry::Rejected));
        Self::build_entries(entries)
    }

    fn build_entries(entries: Vec<Entry<'_>>) -> Self {
        let mut graph = Graph::default();
        let mut pending: Vec<(ModuleId, Vec<DepDecl>)> = Vec::with_capacity(entries.len());

        for entry in entries {
            let name = entry.name();
            if let Some(first) = graph.lookup(name) {
                graph
                    .module_mut(first)
                    .diagnostics
                    .report(DiagnosticKind::DuplicateModule, name)
                    .message(name)
                    .emit();
                continue;
            }

            let id = ModuleId(graph.slots.len() as u32);
            let module = match entry {
                Entry::Decl(decl) => {
                    let (module, deps) = allocate(id, decl);
                    pending.push((id, deps));
                    module
                }
                Entry::Rejected(rejected) => reject(id, rejected),
            };
            graph.by_name.insert(name.to_string(), id);
            graph.slots.push(Some(module));
        }

        for (id, deps) in pending {
            let mut edges = Vec::with_capacity(deps.len());
            let mut undefined = Vec::new();
            for dep in deps {
                match graph.lookup(&dep.name) {
                    Some(target) => edges.push(Edge::new(dep.tag, target, dep.property)),
                    None => undefined.push(dep),
                }
            }

            let module = graph.module_mut(id);
            for dep in undefined {
                module
                    .diagnostics
                    .report(DiagnosticKind::UndefinedDependency, &module.name)
                    .property(dep.property)
                    .message(&dep.name)
                    .emit();
            }
            module.variants[0].edges = edges;
        }

        graph
    }
}

fn reject(id: ModuleId, rejected: &RejectedDecl) -> Module {
    let mut diagnostics = Diagnostics::new();
    let mut builder = diagnostics
        .report(DiagnosticKind::InvalidDeclaration, &rejected.name)
        .message(&rejected.message);
    if let Some(property) = &rejected.property {
        builder = builder.property(property);
    }
    builder.emit();

    Module {
        id,
        name: rejected.name.clone(),
        kind: rejected.kind,
        variants: Vec::new(),
        diagnostics,
    }
}

fn allocate(id: ModuleId, decl: &ModuleDecl) -> (Module, Vec<DepDecl>) {
    let mut diagnostics = Diagnostics::new();
    let mut props = decl.props.clone();
    for key in decl.unknown.keys() {
        diagnostics
            .report(DiagnosticKind::UnsupportedProperty, &decl.name)
            .property(key)
            .message(key)
            .emit();
    }
    check_supported(&decl.name, decl.kind, &props, &mut diagnostics);

    let mut aspects = aspects_for(decl.kind);
    for aspect in &mut aspects {
        let mut ctx = InitContext {
            module: &decl.name,
            kind: decl.kind,
            props: &mut props,
            diagnostics: &mut diagnostics,
        };
        aspect.hooks_mut().init(&mut ctx);
    }

    let mut deps = Vec::new();
    for aspect in &aspects {
        aspect.hooks().deps(&props, &mut deps);
    }

    let variant = Variant {
        variation: Variation::new(),
        props,
        edges: Vec::new(),
        aspects,
        dependency_variation: Variation::new(),
        in_vendor: false,
    };

    let module = Module {
        id,
        name: decl.name.clone(),
        kind: Some(decl.kind),
        variants: vec![variant],
        diagnostics,
    };
    (module, deps)
}

/// Properties the module kind has no aspect to interpret.
fn check_supported(name: &str, kind: ModuleKind, props: &Properties, diag: &mut Diagnostics) {
    if kind.links() {
        return;
    }

    let lists: [(&str, &[String]); 5] = [
        ("srcs", &props.srcs),
        ("static_libs", &props.static_libs),
        ("whole_static_libs", &props.whole_static_libs),
        ("shared_libs", &props.shared_libs),
        ("objs", &props.objs),
    ];
    for (property, list) in lists {
        if !list.is_empty() {
            diag.report(DiagnosticKind::UnsupportedProperty, name)
                .property(property)
                .message(property)
                .emit();
        }
    }
}
