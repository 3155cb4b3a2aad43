//! Ordered, barrier-synchronized pass runner.
//!
//! A [`Pipeline`] is a list of named passes, each bottom-up or top-down.
//! Passes run strictly in registration order; a pass observes the settled
//! result of every earlier pass. Parallel-safe bottom-up passes process
//! one dependency level at a time on scoped worker threads.

mod context;
mod invariants;
mod registry;

#[cfg(test)]
mod context_tests;

use tracing::{debug, info_span, warn};

use crate::graph::{Graph, Module, module_order};

pub use context::{BottomUpContext, TopDownContext};
pub use registry::Registries;

pub type BottomUpFn = Box<dyn Fn(&mut BottomUpContext<'_>) + Send + Sync>;
pub type TopDownFn = Box<dyn Fn(&mut TopDownContext<'_>) + Send + Sync>;

enum Visit {
    BottomUp { run: BottomUpFn, parallel: bool },
    TopDown(TopDownFn),
}

struct Pass {
    name: String,
    visit: Visit,
    registries: Vec<&'static str>,
}

#[derive(Default)]
pub struct Pipeline {
    passes: Vec<Pass>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bottom_up(
        self,
        name: impl Into<String>,
        run: impl Fn(&mut BottomUpContext<'_>) + Send + Sync + 'static,
    ) -> Self {
        self.push(
            name,
            Visit::BottomUp {
                run: Box::new(run),
                parallel: false,
            },
        )
    }

    /// A bottom-up pass whose callback only reads dependencies and mutates
    /// the module being visited.
    pub fn bottom_up_parallel(
        self,
        name: impl Into<String>,
        run: impl Fn(&mut BottomUpContext<'_>) + Send + Sync + 'static,
    ) -> Self {
        self.push(
            name,
            Visit::BottomUp {
                run: Box::new(run),
                parallel: true,
            },
        )
    }

    pub fn top_down(
        self,
        name: impl Into<String>,
        run: impl Fn(&mut TopDownContext<'_>) + Send + Sync + 'static,
    ) -> Self {
        self.push(name, Visit::TopDown(Box::new(run)))
    }

    /// Declare a registry list written by the most recently added pass.
    /// The list is sealed once that pass finishes.
    pub fn owns_registry(mut self, list: &'static str) -> Self {
        let pass = self
            .passes
            .last_mut()
            .unwrap_or_else(|| invariants::registry_without_pass(list));
        pass.registries.push(list);
        self
    }

    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.name.as_str()).collect()
    }

    fn push(mut self, name: impl Into<String>, visit: Visit) -> Self {
        self.passes.push(Pass {
            name: name.into(),
            visit,
            registries: Vec::new(),
        });
        self
    }

    /// Run every pass over `graph`. `jobs <= 1` runs everything inline.
    pub fn run(&self, graph: &mut Graph, registries: &Registries, jobs: usize) {
        registries.reset();
        for pass in &self.passes {
            for &list in &pass.registries {
                registries.declare(list, &pass.name);
            }
        }

        for pass in &self.passes {
            match &pass.visit {
                Visit::BottomUp { run, parallel } => {
                    let _span = info_span!(
                        "pass",
                        name = %pass.name,
                        kind = "bottom_up",
                        parallel = *parallel && jobs > 1
                    )
                    .entered();
                    if *parallel && jobs > 1 {
                        run_bottom_up_parallel(&pass.name, run, graph, registries, jobs);
                    } else {
                        run_bottom_up(&pass.name, run, graph, registries);
                    }
                }
                Visit::TopDown(run) => {
                    let _span = info_span!("pass", name = %pass.name, kind = "top_down").entered();
                    run_top_down(&pass.name, run, graph, registries);
                }
            }
            registries.seal_owned_by(&pass.name);
        }
    }
}

fn run_bottom_up(pass: &str, run: &BottomUpFn, graph: &mut Graph, registries: &Registries) {
    let order = module_order(graph);
    for id in order.post_order {
        let mut module = graph.checkout(id);
        visit_module(pass, run, graph, registries, &mut module);
        graph.restore(module);
    }
}

fn run_bottom_up_parallel(
    pass: &str,
    run: &BottomUpFn,
    graph: &mut Graph,
    registries: &Registries,
    jobs: usize,
) {
    let order = module_order(graph);
    for (depth, level) in order.levels.iter().enumerate() {
        let mut modules: Vec<Module> = level.iter().map(|&id| graph.checkout(id)).collect();
        let chunk_size = modules.len().div_ceil(jobs).max(1);
        debug!(pass, depth, modules = modules.len(), chunk_size, "level");

        let shared: &Graph = graph;
        std::thread::scope(|scope| {
            for chunk in modules.chunks_mut(chunk_size) {
                scope.spawn(move || {
                    for module in chunk {
                        visit_module(pass, run, shared, registries, module);
                    }
                });
            }
        });

        for module in modules {
            graph.restore(module);
        }
    }
}

fn visit_module(
    pass: &str,
    run: &BottomUpFn,
    graph: &Graph,
    registries: &Registries,
    module: &mut Module,
) {
    let was_failed = module.is_failed();
    let mut index = 0;
    while index < module.variants.len() {
        let mut ctx = BottomUpContext::new(pass, graph, registries, module, index);
        run(&mut ctx);
        index += ctx.visited();
    }
    if !was_failed && module.is_failed() {
        warn!(module = module.name(), pass, "module marked failed");
    }
}

fn run_top_down(pass: &str, run: &TopDownFn, graph: &mut Graph, registries: &Registries) {
    let order = module_order(graph);
    for &id in order.post_order.iter().rev() {
        let was_failed = graph.module(id).is_failed();
        for current in graph.variant_refs(id) {
            let mut ctx = TopDownContext::new(pass, graph, registries, current);
            run(&mut ctx);
        }
        let module = graph.module(id);
        if !was_failed && module.is_failed() {
            warn!(module = module.name(), pass, "module marked failed");
        }
    }
}
