//! Variable dependency graph

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::model::VariableDefinition;

/// Forward edges from a variable to everything that must be recomputed
/// when it changes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    pub nodes: BTreeSet<String>,
    pub edges: BTreeMap<String, Vec<String>>,
}

impl DependencyGraph {
    pub fn dependents(&self, id: &str) -> &[String] {
        self.edges.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    fn add_edge(&mut self, from: &str, to: &str) {
        let targets = self.edges.entry(from.to_string()).or_default();
        if !targets.iter().any(|t| t == to) {
            targets.push(to.to_string());
        }
    }
}

/// One node per variable; an edge for every cascade target and one from each
/// conditional's `depends_on` to the variable whose visibility it controls
pub fn build_dependency_graph(definitions: &[VariableDefinition]) -> DependencyGraph {
    let mut graph = DependencyGraph::default();
    for definition in definitions {
        graph.nodes.insert(definition.id.clone());
        for rule in &definition.cascades {
            graph.add_edge(&definition.id, &rule.target_variable);
        }
        if let Some(conditional) = &definition.conditional {
            graph.add_edge(&conditional.depends_on, &definition.id);
        }
    }
    graph
}

/// Depth-first post-order from `start`, reversed: `start` first, then
/// everything reachable from it with dependents after their sources
pub fn get_processing_order(graph: &DependencyGraph, start: &str) -> Vec<String> {
    fn visit(graph: &DependencyGraph, id: &str, seen: &mut HashSet<String>, out: &mut Vec<String>) {
        if !seen.insert(id.to_string()) {
            return;
        }
        for next in graph.dependents(id) {
            visit(graph, next, seen, out);
        }
        out.push(id.to_string());
    }

    let mut seen = HashSet::new();
    let mut order = Vec::new();
    visit(graph, start, &mut seen, &mut order);
    order.reverse();
    order
}
