use std::collections::HashMap;

use noderank_core::{AttestationEdge, DecodedBatch, Identity};

use crate::error::GraphError;

/// Accumulated edge between two node indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct WeightedEdge {
    pub from: usize,
    pub to: usize,
    pub weight: f64,
}

/// Directed weighted attestation graph.
///
/// Parallel attestations for the same `(attester, attestee)` pair collapse
/// into one edge whose weight is their sum. Nodes and edges keep the order
/// in which they were first linked, which is what ranking ties fall back to.
#[derive(Debug, Clone, Default)]
pub struct AttestationGraph {
    /// Identities in first-seen order.
    nodes: Vec<Identity>,
    node_index: HashMap<Identity, usize>,
    /// Edges in first-seen order.
    edges: Vec<WeightedEdge>,
    edge_index: HashMap<(usize, usize), usize>,
}

impl AttestationGraph {
    /// Create a new, empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from every edge of a decoded batch.
    pub fn from_batch(batch: &DecodedBatch) -> Result<Self, GraphError> {
        Self::from_edges(batch.edges())
    }

    /// Build a graph by linking each edge in order.
    pub fn from_edges<'a>(
        edges: impl IntoIterator<Item = &'a AttestationEdge>,
    ) -> Result<Self, GraphError> {
        let mut graph = Self::new();
        for edge in edges {
            graph.link(&edge.attester, &edge.attestee, edge.weight)?;
        }
        Ok(graph)
    }

    /// Add `weight` to the edge `attester -> attestee`, creating the edge
    /// and either endpoint as needed.
    ///
    /// Self-loops are accepted and accumulate like any other edge.
    pub fn link(
        &mut self,
        attester: &Identity,
        attestee: &Identity,
        weight: f64,
    ) -> Result<(), GraphError> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(GraphError::InvalidWeight {
                attester: attester.clone(),
                attestee: attestee.clone(),
                weight,
            });
        }

        let from = self.intern(attester);
        let to = self.intern(attestee);

        match self.edge_index.get(&(from, to)) {
            Some(&pos) => {
                let total = self.edges[pos].weight + weight;
                if !total.is_finite() {
                    return Err(GraphError::InvalidWeight {
                        attester: attester.clone(),
                        attestee: attestee.clone(),
                        weight: total,
                    });
                }
                self.edges[pos].weight = total;
            }
            None => {
                self.edge_index.insert((from, to), self.edges.len());
                self.edges.push(WeightedEdge { from, to, weight });
            }
        }
        Ok(())
    }

    fn intern(&mut self, identity: &Identity) -> usize {
        if let Some(&idx) = self.node_index.get(identity) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(identity.clone());
        self.node_index.insert(identity.clone(), idx);
        idx
    }

    pub(crate) fn weighted_edges(&self) -> &[WeightedEdge] {
        &self.edges
    }

    /// Identities in first-seen order.
    pub fn nodes(&self) -> &[Identity] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
