//! Dependency graph over the tasks of a single batch.
//!
//! Nodes are task IDs in insertion order. Edges point from a dependency to
//! its dependent (`dependency -> dependent`): the dependency must be done
//! first. Dependencies on IDs outside the batch are kept aside as external
//! and never produce edges.

use serde::Serialize;
use std::collections::HashMap;

use super::task::Task;

/// One `dependency -> dependent` edge, as emitted for graph rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

/// Where a task sits in the graph, as seen by the scoring engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodePosition {
    /// In-batch tasks that depend on this one (self excluded)
    pub blocks: usize,
    /// In-batch prerequisites of this task (self excluded)
    pub waiting_on: usize,
    pub in_cycle: bool,
}

impl NodePosition {
    /// Ready means nothing in the batch is still ahead of this task.
    pub const fn is_ready(&self) -> bool {
        !self.in_cycle && self.waiting_on == 0
    }
}

#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    nodes: Vec<String>,
    index: HashMap<String, usize>,
    edges: Vec<(usize, usize)>,
    dependents: Vec<Vec<usize>>,
    prerequisites: Vec<Vec<usize>>,
    external: Vec<Vec<String>>,
    cycles: Vec<Vec<String>>,
    in_cycle: Vec<bool>,
}

impl DependencyGraph {
    /// Build the structural graph. Cycle information starts empty and is
    /// filled in by [`DependencyGraph::record_cycles`].
    pub fn new(tasks: &[Task]) -> Self {
        let nodes: Vec<String> = tasks.iter().map(|t| t.id.clone()).collect();
        let index: HashMap<String, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();

        let mut edges = Vec::new();
        let mut dependents = vec![Vec::new(); nodes.len()];
        let mut prerequisites = vec![Vec::new(); nodes.len()];
        let mut external = vec![Vec::new(); nodes.len()];

        for (to, task) in tasks.iter().enumerate() {
            for dep in &task.dependencies {
                if let Some(&from) = index.get(dep) {
                    edges.push((from, to));
                    dependents[from].push(to);
                    prerequisites[to].push(from);
                } else {
                    external[to].push(dep.clone());
                }
            }
        }

        let in_cycle = vec![false; nodes.len()];

        Self {
            nodes,
            index,
            edges,
            dependents,
            prerequisites,
            external,
            cycles: Vec::new(),
            in_cycle,
        }
    }

    /// Attach detected cycles and mark their members.
    pub fn record_cycles(&mut self, cycles: Vec<Vec<String>>) {
        for cycle in &cycles {
            for id in cycle {
                if let Some(&i) = self.index.get(id) {
                    self.in_cycle[i] = true;
                }
            }
        }
        self.cycles = cycles;
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Task IDs in insertion order
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Indices of tasks that depend on the node, in insertion order
    pub fn dependents_of(&self, node: usize) -> &[usize] {
        &self.dependents[node]
    }

    /// Dependencies of the node that lie outside the batch
    pub fn external_dependencies(&self, node: usize) -> &[String] {
        &self.external[node]
    }

    /// All edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges.iter().map(|&(from, to)| Edge {
            from: self.nodes[from].clone(),
            to: self.nodes[to].clone(),
        })
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn cycles(&self) -> &[Vec<String>] {
        &self.cycles
    }

    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }

    pub fn position(&self, node: usize) -> NodePosition {
        NodePosition {
            blocks: self.dependents[node].iter().filter(|&&d| d != node).count(),
            waiting_on: self.prerequisites[node].iter().filter(|&&p| p != node).count(),
            in_cycle: self.in_cycle[node],
        }
    }
}
