//! Per-variant resolution output.

use indexmap::IndexMap;
use serde::Serialize;

use fanout_core::{DepKind, ModuleKind, axis};

use super::{ExportedHeaders, LinkOrderWalker, Resolution, output_modules};
use crate::graph::{Graph, VariantRef};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LinkOrder {
    pub all: Vec<String>,
    pub declared: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VariantOutput {
    pub module: String,
    pub variant: String,
    pub hidden: bool,
    /// Artifact paths by dependency role, roles in declaration order.
    pub deps: IndexMap<DepKind, Vec<String>>,
    pub whole_static: Vec<String>,
    pub include_dirs: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_order: Option<LinkOrder>,
}

/// `<module>/<variant or "default">/<file>` for the artifact `kind` refers to.
pub fn artifact_path(graph: &Graph, v: VariantRef, kind: DepKind) -> String {
    let module = graph.module(v.module);
    let name = module.name();
    let variant = graph.variant(v).name();
    let dir = if variant.is_empty() {
        "default"
    } else {
        variant.as_str()
    };
    let file = match kind {
        DepKind::Static | DepKind::WholeStatic => format!("{name}.a"),
        DepKind::Shared | DepKind::Runtime => format!("{name}.so"),
        DepKind::Object => format!("{name}.o"),
        DepKind::Header => "include".to_string(),
    };
    format!("{name}/{dir}/{file}")
}

/// Path of a link-line entry: the archive or the shared object, by the
/// variant's link mode.
fn link_artifact(graph: &Graph, v: VariantRef) -> String {
    let kind = if graph.variant(v).variation.get(axis::LINK) == Some(axis::SHARED) {
        DepKind::Shared
    } else {
        DepKind::Static
    };
    artifact_path(graph, v, kind)
}

/// Binaries and shared libraries produce a link line.
fn links(graph: &Graph, v: VariantRef) -> bool {
    graph.module(v.module).kind() == Some(ModuleKind::CcBinary)
        || graph.variant(v).variation.get(axis::LINK) == Some(axis::SHARED)
}

/// Output for every variant of every module without errors, in declaration
/// order.
pub fn collect_outputs(graph: &Graph, resolution: &Resolution) -> Vec<VariantOutput> {
    let mut walker = LinkOrderWalker::new(graph, resolution);
    let mut headers = ExportedHeaders::new(graph, resolution);
    let mut outputs = Vec::new();

    for id in output_modules(graph) {
        let module = graph.module(id);
        for v in graph.variant_refs(id) {
            let variant = graph.variant(v);

            let mut deps: IndexMap<DepKind, Vec<String>> = IndexMap::new();
            let mut whole_static = Vec::new();
            for edge in resolution.edges(v) {
                let path = artifact_path(graph, edge.target, edge.tag.kind);
                if edge.tag.kind == DepKind::WholeStatic && !whole_static.contains(&path) {
                    whole_static.push(path.clone());
                }
                let paths = deps.entry(edge.tag.kind).or_default();
                if !paths.contains(&path) {
                    paths.push(path);
                }
            }
            deps.sort_keys();

            let link_order = links(graph, v).then(|| {
                let (all, declared) = walker.order(v);
                LinkOrder {
                    all: all.into_iter().map(|r| link_artifact(graph, r)).collect(),
                    declared: declared
                        .into_iter()
                        .map(|r| link_artifact(graph, r))
                        .collect(),
                }
            });

            outputs.push(VariantOutput {
                module: module.name().to_string(),
                variant: variant.name(),
                hidden: variant.is_hidden(),
                deps,
                whole_static,
                include_dirs: headers.exported(v).to_vec(),
                link_order,
            });
        }
    }

    outputs
}
