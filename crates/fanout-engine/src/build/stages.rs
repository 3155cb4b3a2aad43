use std::ops::Deref;

use fanout_core::{Arch, Blueprint, BuildConfig};

use crate::Diagnostics;
use crate::graph::Graph;
use crate::mutators;
use crate::pipeline::{Pipeline, Registries};
use crate::resolve::{Resolution, VariantOutput, collect_outputs, resolve_edges};

pub struct BuildBuilder {
    blueprint: Blueprint,
    config: BuildConfig,
}

impl BuildBuilder {
    /// Start from a parsed blueprint. Its `config` section, if any, is the
    /// initial configuration.
    pub fn new(blueprint: Blueprint) -> Self {
        let config = blueprint.config.clone().unwrap_or_default();
        Self { blueprint, config }
    }

    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(Self::new(fanout_core::parse_blueprint(json)?))
    }

    pub fn with_config(mut self, config: BuildConfig) -> Self {
        self.config = config;
        self
    }

    /// Worker count for parallel-safe passes; values below one mean one.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.config.jobs = jobs.max(1);
        self
    }

    pub fn with_target_arches(mut self, arches: Vec<Arch>) -> Self {
        self.config.target_arches = arches;
        self
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn load(self) -> BuildLoaded {
        let graph = Graph::from_blueprint(&self.blueprint);
        tracing::info!(modules = graph.len(), "loaded blueprint");
        BuildLoaded {
            config: self.config,
            graph,
        }
    }
}

#[derive(Debug)]
pub struct BuildLoaded {
    config: BuildConfig,
    graph: Graph,
}

impl BuildLoaded {
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn diagnostics(&self) -> Diagnostics {
        self.graph.diagnostics()
    }

    /// Run the standard fan-out pipeline.
    pub fn mutate(self) -> BuildMutated {
        let pipeline = mutators::standard(&self.config);
        self.mutate_with(&pipeline)
    }

    pub fn mutate_with(mut self, pipeline: &Pipeline) -> BuildMutated {
        let registries = Registries::new();
        pipeline.run(&mut self.graph, &registries, self.config.jobs);
        BuildMutated {
            config: self.config,
            graph: self.graph,
            registries,
        }
    }
}

#[derive(Debug)]
pub struct BuildMutated {
    config: BuildConfig,
    graph: Graph,
    registries: Registries,
}

impl BuildMutated {
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn registries(&self) -> &Registries {
        &self.registries
    }

    /// Sorted registry list; `None` for unknown lists.
    pub fn registry(&self, name: &str) -> Option<Vec<String>> {
        self.registries.get(name)
    }

    pub fn diagnostics(&self) -> Diagnostics {
        self.graph.diagnostics()
    }

    /// Variant names of `module`, in variant order.
    pub fn variant_names(&self, module: &str) -> Option<Vec<String>> {
        self.graph.module_by_name(module).map(|m| m.variant_names())
    }

    pub fn resolve(mut self) -> BuildResolved {
        let resolution = resolve_edges(&mut self.graph);
        let outputs = collect_outputs(&self.graph, &resolution);
        BuildResolved {
            mutated: self,
            resolution,
            outputs,
        }
    }
}

pub type Build = BuildResolved;

#[derive(Debug)]
pub struct BuildResolved {
    mutated: BuildMutated,
    resolution: Resolution,
    outputs: Vec<VariantOutput>,
}

impl BuildResolved {
    /// No error-severity diagnostics; warnings are allowed.
    pub fn is_valid(&self) -> bool {
        !self.mutated.graph.modules().any(|m| m.is_failed())
    }

    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    pub fn outputs(&self) -> &[VariantOutput] {
        &self.outputs
    }

    pub fn outputs_for<'b>(&'b self, module: &'b str) -> impl Iterator<Item = &'b VariantOutput> {
        self.outputs.iter().filter(move |o| o.module == module)
    }

    pub fn output(&self, module: &str, variant: &str) -> Option<&VariantOutput> {
        self.outputs
            .iter()
            .find(|o| o.module == module && o.variant == variant)
    }

    /// `Err(BuildFailed)` carrying every diagnostic when any module failed.
    pub fn into_result(self) -> crate::Result<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(crate::Error::BuildFailed(self.diagnostics()))
        }
    }
}

impl Deref for BuildResolved {
    type Target = BuildMutated;

    fn deref(&self) -> &Self::Target {
        &self.mutated
    }
}

impl TryFrom<&str> for BuildResolved {
    type Error = crate::Error;

    fn try_from(json: &str) -> crate::Result<Self> {
        Ok(BuildBuilder::from_json(json)?.load().mutate().resolve())
    }
}
