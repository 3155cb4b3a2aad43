//! Visitation order for passes.
//!
//! Post-order DFS over the module dependency graph, roots in declaration
//! order and dependencies in edge order. An edge to a module that is still on
//! the active visitation stack is a back edge and is skipped, which breaks
//! cycles deterministically.

use super::{Graph, ModuleId};

/// Snapshot of the visitation order at the start of a pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModuleOrder {
    /// Dependencies before dependents. Reverse it for top-down passes.
    pub post_order: Vec<ModuleId>,
    /// Dependency levels: level 0 has no (non-back-edge) dependencies, level
    /// `n` only depends on lower levels. Members of one level never depend on
    /// each other, so a level can be processed concurrently.
    pub levels: Vec<Vec<ModuleId>>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Unvisited,
    OnStack,
    Done,
}

struct Frame {
    id: ModuleId,
    deps: Vec<ModuleId>,
    next: usize,
    level: usize,
}

impl Frame {
    fn new(graph: &Graph, id: ModuleId) -> Self {
        Self {
            id,
            deps: graph.module(id).dependencies(),
            next: 0,
            level: 0,
        }
    }
}

pub fn module_order(graph: &Graph) -> ModuleOrder {
    let mut state = vec![State::Unvisited; graph.len()];
    let mut level = vec![0usize; graph.len()];
    let mut post_order = Vec::with_capacity(graph.len());
    let mut stack: Vec<Frame> = Vec::new();

    for root in graph.module_ids() {
        if state[root.index()] != State::Unvisited {
            continue;
        }
        state[root.index()] = State::OnStack;
        stack.push(Frame::new(graph, root));

        while let Some(frame) = stack.last_mut() {
            if let Some(&dep) = frame.deps.get(frame.next) {
                frame.next += 1;
                match state[dep.index()] {
                    State::Unvisited => {
                        state[dep.index()] = State::OnStack;
                        stack.push(Frame::new(graph, dep));
                    }
                    State::Done => frame.level = frame.level.max(level[dep.index()] + 1),
                    State::OnStack => {}
                }
                continue;
            }

            let Some(done) = stack.pop() else { break };
            state[done.id.index()] = State::Done;
            level[done.id.index()] = done.level;
            post_order.push(done.id);
            if let Some(parent) = stack.last_mut() {
                parent.level = parent.level.max(done.level + 1);
            }
        }
    }

    let depth = post_order.iter().map(|id| level[id.index()] + 1).max().unwrap_or(0);
    let mut levels = vec![Vec::new(); depth];
    for &id in &post_order {
        levels[level[id.index()]].push(id);
    }

    ModuleOrder { post_order, levels }
}
