//! Connectivity checks run ahead of the solve.
//!
//! A node without elements, or a group of elements with no path to the rest of
//! the structure, leaves rigid-body modes that the conditioning guard will later
//! reject. Reporting them up front tells the user where to look.

use std::collections::HashMap;

use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};

use crate::model::Model;

/// Element connectivity of a model as an undirected graph.
#[derive(Clone, Debug)]
pub struct Connectivity {
    /// Vertices carry node ids, edges carry element ids.
    graph: UnGraph<i64, i64>,
}

impl Connectivity {
    /// Build the graph of `model`. Elements naming unknown nodes are skipped.
    #[must_use]
    pub fn from_model(model: &Model) -> Self {
        let mut graph = UnGraph::with_capacity(model.node_count(), model.element_count());
        let vertices: HashMap<i64, NodeIndex> = model
            .nodes()
            .map(|node| (node.id, graph.add_node(node.id)))
            .collect();
        for element in model.elements() {
            if let (Some(&a), Some(&b)) = (
                vertices.get(&element.nodes[0]),
                vertices.get(&element.nodes[1]),
            ) {
                graph.add_edge(a, b, element.id);
            }
        }
        Self { graph }
    }

    /// Ids of nodes that no element touches, in ascending order.
    #[must_use]
    pub fn isolated_nodes(&self) -> Vec<i64> {
        let mut isolated: Vec<i64> = self
            .graph
            .node_indices()
            .filter(|&vertex| self.graph.neighbors(vertex).next().is_none())
            .map(|vertex| self.graph[vertex])
            .collect();
        isolated.sort_unstable();
        isolated
    }

    /// Number of disjoint sub-structures, counting isolated nodes individually.
    #[must_use]
    pub fn component_count(&self) -> usize {
        connected_components(&self.graph)
    }
}
