use crate::domain::models::{DependencyGraph, Task};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Service for building the batch dependency graph and detecting circular
/// dependencies
#[derive(Debug, Clone, Default)]
pub struct DependencyResolver;

/// Depth-first walk from `root` with an explicit frame stack of
/// `(node, next dependent index)`, so chain length never touches the thread
/// stack.
fn walk_cycles(
    root: usize,
    graph: &DependencyGraph,
    visited: &mut [bool],
    on_stack: &mut [bool],
    path: &mut Vec<usize>,
    cycles: &mut Vec<Vec<usize>>,
) {
    visited[root] = true;
    on_stack[root] = true;
    path.push(root);
    let mut frames = vec![(root, 0usize)];

    while let Some(frame) = frames.last_mut() {
        let (node, next) = *frame;
        let Some(&neighbor) = graph.dependents_of(node).get(next) else {
            on_stack[node] = false;
            path.pop();
            frames.pop();
            continue;
        };
        frame.1 += 1;

        if on_stack[neighbor] {
            // Cycle detected: slice of the current path starting at `neighbor`
            if let Some(cycle_start) = path.iter().position(|&n| n == neighbor) {
                cycles.push(path[cycle_start..].to_vec());
            }
        } else if !visited[neighbor] {
            visited[neighbor] = true;
            on_stack[neighbor] = true;
            path.push(neighbor);
            frames.push((neighbor, 0));
        }
    }
}

impl DependencyResolver {
    pub fn new() -> Self {
        Self
    }

    /// Build the graph for a batch and attach every detected cycle.
    ///
    /// Cycles do not fail the build; callers surface them as a warning.
    pub fn build(&self, tasks: &[Task]) -> DependencyGraph {
        let mut graph = DependencyGraph::new(tasks);
        let cycles = self.detect_cycles(&graph);

        if cycles.is_empty() {
            debug!(
                nodes = graph.len(),
                edges = graph.edge_count(),
                "dependency graph built"
            );
        } else {
            warn!(
                nodes = graph.len(),
                cycles = cycles.len(),
                "circular dependencies detected"
            );
        }

        graph.record_cycles(cycles);
        graph
    }

    /// Detect circular dependencies among in-batch tasks.
    ///
    /// Depth-first search from every unvisited node in insertion order,
    /// following `dependency -> dependent` edges in insertion order. Each
    /// cycle is reported once, closed by repeating its first ID
    /// (`["1", "2", "1"]`). A self-dependency is reported as `[id]`.
    pub fn detect_cycles(&self, graph: &DependencyGraph) -> Vec<Vec<String>> {
        let mut visited = vec![false; graph.len()];
        let mut on_stack = vec![false; graph.len()];
        let mut path = Vec::new();
        let mut found = Vec::new();

        for node in 0..graph.len() {
            if !visited[node] {
                walk_cycles(
                    node,
                    graph,
                    &mut visited,
                    &mut on_stack,
                    &mut path,
                    &mut found,
                );
            }
        }

        let nodes = graph.nodes();
        let mut seen = HashSet::new();
        found
            .into_iter()
            .map(|cycle| {
                let mut ids: Vec<String> = cycle.iter().map(|&n| nodes[n].clone()).collect();
                if ids.len() > 1 {
                    ids.push(ids[0].clone());
                }
                ids
            })
            .filter(|ids| seen.insert(ids.clone()))
            .collect()
    }
}
