use std::collections::HashMap;

use noderank_core::{Identity, RankParams, RankedIdentity};

use crate::error::GraphError;
use crate::graph::AttestationGraph;

/// Scores produced by one run of the [`RankEngine`].
#[derive(Debug, Clone, PartialEq)]
pub struct RankScores {
    /// One entry per graph node, in the graph's first-seen node order.
    pub entries: Vec<RankedIdentity>,
    /// Synchronous update rounds performed.
    pub iterations: usize,
    /// Whether the largest per-node change fell below epsilon.
    pub converged: bool,
}

impl RankScores {
    fn empty() -> Self {
        Self {
            entries: Vec::new(),
            iterations: 0,
            converged: true,
        }
    }

    pub fn get(&self, identity: &Identity) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| &e.identity == identity)
            .map(|e| e.score)
    }

    /// Sum of all scores; 1 for a non-empty graph up to rounding.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.score).sum()
    }

    pub fn to_map(&self) -> HashMap<Identity, f64> {
        self.entries
            .iter()
            .map(|e| (e.identity.clone(), e.score))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Weighted PageRank over an [`AttestationGraph`].
///
/// Each round computes, for every node `v`,
///
/// ```text
/// new(v) = (1 - d) / N + d * dangling / N + d * Σ_{u → v} w(u,v) / out(u) * rank(u)
/// ```
///
/// where `dangling` is the rank held by nodes whose outgoing weight is zero.
/// Spreading that mass uniformly keeps the scores summing to one.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankEngine {
    params: RankParams,
}

impl RankEngine {
    pub fn new(params: RankParams) -> Result<Self, GraphError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &RankParams {
        &self.params
    }

    /// Run the iteration to convergence or the iteration cap.
    ///
    /// Hitting the cap is not an error; `converged` is false in that case.
    #[allow(clippy::cast_precision_loss)]
    pub fn rank(&self, graph: &AttestationGraph) -> RankScores {
        let n = graph.node_count();
        if n == 0 {
            return RankScores::empty();
        }

        let d = self.params.damping;
        let nf = n as f64;
        let edges = graph.weighted_edges();

        // Shares are taken over weights scaled by each source's largest
        // outgoing weight, so the outgoing sum stays finite.
        let mut scale = vec![0.0_f64; n];
        for edge in edges {
            scale[edge.from] = scale[edge.from].max(edge.weight);
        }
        let mut out_scaled = vec![0.0_f64; n];
        for edge in edges {
            if scale[edge.from] > 0.0 {
                out_scaled[edge.from] += edge.weight / scale[edge.from];
            }
        }
        let shares: Vec<f64> = edges
            .iter()
            .map(|edge| {
                let out = out_scaled[edge.from];
                if out > 0.0 {
                    edge.weight / scale[edge.from] / out
                } else {
                    0.0
                }
            })
            .collect();

        let mut ranks = vec![1.0 / nf; n];
        let mut iterations = 0;
        let mut converged = false;

        while iterations < self.params.max_iterations {
            iterations += 1;

            let dangling: f64 = ranks
                .iter()
                .zip(&out_scaled)
                .filter(|(_, out)| **out <= 0.0)
                .map(|(r, _)| *r)
                .sum();

            let base = (1.0 - d) / nf + d * dangling / nf;
            let mut next = vec![base; n];
            for (edge, share) in edges.iter().zip(&shares) {
                next[edge.to] += d * ranks[edge.from] * share;
            }
            zero_non_finite(&mut next);

            let max_delta = ranks
                .iter()
                .zip(&next)
                .map(|(a, b)| (a - b).abs())
                .fold(0.0_f64, f64::max);

            ranks = next;

            if max_delta < self.params.epsilon {
                converged = true;
                break;
            }
        }

        if converged {
            tracing::debug!(nodes = n, iterations, "rank converged");
        } else {
            tracing::warn!(
                nodes = n,
                iterations,
                epsilon = self.params.epsilon,
                "rank did not converge within iteration cap"
            );
        }

        let entries = graph
            .nodes()
            .iter()
            .zip(ranks)
            .map(|(identity, score)| RankedIdentity::new(identity.clone(), score))
            .collect();

        RankScores {
            entries,
            iterations,
            converged,
        }
    }
}

/// Clamp NaN and infinite scores to zero.
fn zero_non_finite(ranks: &mut [f64]) {
    for r in ranks {
        if !r.is_finite() {
            *r = 0.0;
        }
    }
}
