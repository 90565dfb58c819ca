use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type NodeId = usize;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A node may only cite nodes that arrived before it.
    #[error("node {node} cites node {target}, which has not arrived yet")]
    ForwardEdge { node: NodeId, target: NodeId },
}

/// A growing directed network (e.g. a citation graph).
///
/// Nodes are identified by their arrival index `0..n`; every out-edge points
/// to a strictly earlier node, so the graph is a DAG by construction. Edge
/// arrival order is the order in which out-edges appear while scanning nodes
/// in increasing index, which is exactly the order the estimation passes
/// replay them in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowingGraph {
    cites: Vec<Vec<NodeId>>,
    ecount: usize,
}

impl GrowingGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the next node, citing `targets` in the given order.
    /// Returns the new node's id. Repeated targets are allowed (multi-edges).
    pub fn push_node(&mut self, targets: &[NodeId]) -> Result<NodeId, GraphError> {
        let id = self.cites.len();
        for &target in targets {
            if target >= id {
                return Err(GraphError::ForwardEdge { node: id, target });
            }
        }
        self.cites.push(targets.to_vec());
        self.ecount += targets.len();
        Ok(id)
    }

    /// Build a graph from per-node citation lists, node 0 first.
    pub fn from_citations(lists: Vec<Vec<NodeId>>) -> Result<Self, GraphError> {
        let mut graph = Self::new();
        for targets in &lists {
            graph.push_node(targets)?;
        }
        Ok(graph)
    }

    pub fn vcount(&self) -> usize {
        self.cites.len()
    }

    pub fn ecount(&self) -> usize {
        self.ecount
    }

    pub fn is_empty(&self) -> bool {
        self.cites.is_empty()
    }

    /// Out-neighbors of `node`, in edge arrival order.
    pub fn out_neighbors(&self, node: NodeId) -> &[NodeId] {
        &self.cites[node]
    }

    pub fn out_degree(&self, node: NodeId) -> usize {
        self.cites[node].len()
    }

    /// All edges as `(source, target)`, in arrival order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.cites
            .iter()
            .enumerate()
            .flat_map(|(node, targets)| targets.iter().map(move |&t| (node, t)))
    }

    /// Final in-degree of every node.
    pub fn in_degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.vcount()];
        for targets in &self.cites {
            for &target in targets {
                degrees[target] += 1;
            }
        }
        degrees
    }

    /// Largest final in-degree; sizes the degree-class arrays.
    pub fn max_in_degree(&self) -> usize {
        self.in_degrees().into_iter().max().unwrap_or(0)
    }
}
