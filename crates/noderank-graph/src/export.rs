//! Structural export of the attestation graph.
//!
//! The exported view lists unique identities and unique directed
//! `attester -> attestee` pairs. Edge weights are not carried: renderers
//! see who attested whom, not how strongly.

use std::collections::HashSet;

use noderank_core::{AttestationEdge, Identity};
use serde::{Deserialize, Serialize};

/// A weight-free directed edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectedEdge {
    pub from: Identity,
    pub to: Identity,
}

/// Deduplicated node and edge sets, both in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralGraph {
    pub nodes: Vec<Identity>,
    pub edges: Vec<DirectedEdge>,
}

impl StructuralGraph {
    pub fn from_edges<'a>(edges: impl IntoIterator<Item = &'a AttestationEdge>) -> Self {
        let mut graph = Self::default();
        let mut seen_nodes = HashSet::new();
        let mut seen_edges = HashSet::new();

        for edge in edges {
            for identity in [&edge.attester, &edge.attestee] {
                if seen_nodes.insert(identity.clone()) {
                    graph.nodes.push(identity.clone());
                }
            }
            let directed = DirectedEdge {
                from: edge.attester.clone(),
                to: edge.attestee.clone(),
            };
            if seen_edges.insert(directed.clone()) {
                graph.edges.push(directed);
            }
        }

        graph
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
