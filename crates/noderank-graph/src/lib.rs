//! NodeRank Graph Layer
//!
//! Pure, synchronous stages of the ranking pipeline:
//! - `AttestationGraph`: accumulates decoded edges into a weighted digraph
//! - `RankEngine`: PageRank with dangling-node redistribution
//! - `select_top`: deterministic ordering and truncation
//! - `StructuralGraph`: weight-free node/edge view for renderers

pub mod error;
pub mod export;
pub mod graph;
pub mod rank;
pub mod select;

pub use error::GraphError;
pub use export::{DirectedEdge, StructuralGraph};
pub use graph::AttestationGraph;
pub use rank::{RankEngine, RankScores};
pub use select::select_top;
