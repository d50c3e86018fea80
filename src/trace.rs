//! Per-query diagnostic trace.
//!
//! When tracing is enabled in [`ClassifierConfig`](crate::classification::ClassifierConfig),
//! every query hands a [`QueryTrace`] to the configured [`TraceSink`]. Sinks
//! only observe; they cannot change a query's result.

use crate::corpus::{Category, Feature};
use crate::neighbors::Neighbor;
use crate::vote::VoteTally;
use tracing::debug;

/// One traced neighbor with its rendered feature vector.
#[derive(Debug, Clone, PartialEq)]
pub struct TracedNeighbor {
    /// The neighbor record
    pub neighbor: Neighbor,
    /// Rendered corpus features of the neighbor
    pub features: String,
}

/// Everything observed while answering one query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryTrace {
    /// Raw query vector
    pub query: Vec<Feature>,
    /// Rendered query vector
    pub rendered_query: String,
    /// Threshold the tally was built with
    pub distance_threshold: f64,
    /// Resolved category (after fallback)
    pub category: Option<Category>,
    /// Full vote distribution
    pub tally: VoteTally,
    /// Nearest neighbors, at most `trace_neighbors` of them
    pub neighbors: Vec<TracedNeighbor>,
}

/// Destination for query traces.
pub trait TraceSink: Send + Sync {
    /// Receives the trace of one completed query.
    fn record(&self, trace: &QueryTrace);
}

/// Emits traces as `tracing` debug events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn record(&self, trace: &QueryTrace) {
        debug!(
            query = %trace.rendered_query,
            category = ?trace.category,
            votes = %trace.tally,
            threshold = trace.distance_threshold,
            neighbors = trace.neighbors.len(),
            "kNN query"
        );
        for (rank, traced) in trace.neighbors.iter().enumerate() {
            debug!(
                rank,
                index = traced.neighbor.index,
                category = traced.neighbor.category,
                distance = %format!("{:.2}", traced.neighbor.distance),
                features = %traced.features,
                "kNN neighbor"
            );
        }
    }
}
