//! Edge resolution and per-variant output, once the pipeline has settled.
//!
//! Every edge must resolve to exactly one variant of its target module;
//! failures become `missing-variant` / `ambiguous-variant` errors on the
//! source module. Resolved edges then feed the artifact map, exported
//! include dirs and the static link order of each variant.

mod headers;
mod invariants;
mod link_order;
mod output;


use fanout_core::{DependencyTag, Variation};
use tracing::trace;

use crate::diagnostics::DiagnosticKind;
use crate::graph::{Edge, Graph, Mismatch, ModuleId, VariantRef, match_edge};

pub use headers::ExportedHeaders;
pub use link_order::{LinkOrderWalker, order_deps};
pub use output::{LinkOrder, VariantOutput, artifact_path, collect_outputs};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedEdge {
    pub tag: DependencyTag,
    pub target: VariantRef,
    pub property: &'static str,
}

/// Resolved edges, indexed by module then variant.
#[derive(Clone, Debug, Default)]
pub struct Resolution {
    edges: Vec<Vec<Vec<ResolvedEdge>>>,
}

impl Resolution {
    pub fn edges(&self, v: VariantRef) -> &[ResolvedEdge] {
        self.edges
            .get(v.module.index())
            .and_then(|variants| variants.get(v.index))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

struct Failure {
    source: VariantRef,
    edge: Edge,
    mismatch: Mismatch,
}

pub fn resolve_edges(graph: &mut Graph) -> Resolution {
    let mut edges = Vec::with_capacity(graph.len());
    let mut failures = Vec::new();

    for id in graph.module_ids() {
        let module = graph.module(id);
        let mut per_variant = Vec::with_capacity(module.variants().len());

        for (index, variant) in module.variants().iter().enumerate() {
            let source = VariantRef { module: id, index };
            let mut resolved = Vec::with_capacity(variant.edges.len());

            for edge in &variant.edges {
                let target_module = graph.module(edge.target);
                match match_edge(variant, edge, target_module) {
                    Ok(target_index) => {
                        trace!(
                            from = %module.name(),
                            variant = %variant.variation,
                            tag = %edge.tag,
                            to = %target_module.name(),
                            index = target_index,
                            "resolved edge"
                        );
                        resolved.push(ResolvedEdge {
                            tag: edge.tag,
                            target: VariantRef {
                                module: edge.target,
                                index: target_index,
                            },
                            property: edge.property,
                        });
                    }
                    Err(mismatch) => failures.push(Failure {
                        source,
                        edge: edge.clone(),
                        mismatch,
                    }),
                }
            }
            per_variant.push(resolved);
        }
        edges.push(per_variant);
    }

    for failure in failures {
        report_failure(graph, failure);
    }

    Resolution { edges }
}

fn related_note(target: &str, note: &str, listed: &[String]) -> String {
    if listed.is_empty() {
        format!("`{target}` has no variants")
    } else {
        format!("{note}: {}", listed.join(", "))
    }
}

fn report_failure(graph: &mut Graph, failure: Failure) {
    let Failure {
        source,
        edge,
        mismatch,
    } = failure;
    let target = graph.module(edge.target).name().to_string();
    let variant = graph.variant(source).name();

    let (kind, requested, listed, note) = match &mismatch {
        Mismatch::Missing {
            requested,
            available,
        } => (
            DiagnosticKind::MissingVariant,
            requested,
            available,
            "available variants",
        ),
        Mismatch::Ambiguous {
            requested,
            candidates,
        } => (
            DiagnosticKind::AmbiguousVariant,
            requested,
            candidates,
            "matching variants",
        ),
    };

    let module = graph.module_mut(source.module);
    let mut builder = module
        .diagnostics
        .report(kind, &module.name)
        .property(edge.property)
        .message(describe(&edge, &target, requested))
        .related_to(&target, None, related_note(&target, note, listed));
    if !variant.is_empty() {
        builder = builder.variant(variant);
    }
    builder.emit();
}

fn describe(edge: &Edge, target: &str, requested: &Variation) -> String {
    format!("{} dependency on `{target}` requested {requested}", edge.tag)
}

/// Ids of modules that produce output: everything without errors.
pub fn output_modules(graph: &Graph) -> impl Iterator<Item = ModuleId> + '_ {
    graph
        .modules()
        .filter(|m| !m.is_failed())
        .map(|m| m.id())
}
