//! k-nearest-neighbor classification of formatting decisions.
//!
//! [`KNearestNeighbors`] answers queries against an immutable [`Corpus`]:
//! find the `k` closest samples, let those within the distance threshold
//! vote, and return the majority category.
//!
//! # Example
//!
//! ```
//! use formatknn::classification::KNearestNeighbors;
//! use formatknn::corpus::Corpus;
//! use formatknn::distance::Hamming;
//!
//! let corpus = Corpus::new(
//!     vec![
//!         vec![1, 1, 0],  // newline
//!         vec![1, 1, 1],  // newline
//!         vec![2, 0, 0],  // no space
//!         vec![2, 0, 1],  // no space
//!     ],
//!     vec![1, 1, 0, 0],
//!     vec![true, true, true],
//! ).expect("consistent corpus");
//!
//! let knn = KNearestNeighbors::new(corpus, Hamming)
//!     .expect("metric fits corpus");
//! let category = knn.classify(3, &[1, 1, 0]).expect("query width matches");
//! assert_eq!(category, Some(1));
//! ```

use crate::corpus::{Category, Corpus, Feature};
use crate::distance::Distance;
use crate::error::{KnnError, Result};
use crate::neighbors::{self, Neighbor};
use crate::trace::{QueryTrace, TraceSink, TracedNeighbor, TracingSink};
use crate::vote::VoteTally;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Default distance cutoff for voting neighbors.
pub const DEFAULT_DISTANCE_THRESHOLD: f64 = 1.0;

/// Default number of neighbors included in a query trace.
pub const DEFAULT_TRACE_NEIGHBORS: usize = 16;

/// Query-time settings for [`KNearestNeighbors`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Neighbors farther than this do not vote.
    pub distance_threshold: f64,
    /// Returned by `classify` when no neighbor qualifies. `None` means
    /// "no prediction".
    pub fallback_category: Option<Category>,
    /// Send a [`QueryTrace`] to the sink for every query.
    pub trace: bool,
    /// Maximum neighbors recorded per trace.
    pub trace_neighbors: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            distance_threshold: DEFAULT_DISTANCE_THRESHOLD,
            fallback_category: None,
            trace: false,
            trace_neighbors: DEFAULT_TRACE_NEIGHBORS,
        }
    }
}

impl ClassifierConfig {
    /// Default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the voting distance threshold.
    #[must_use]
    pub fn with_distance_threshold(mut self, threshold: f64) -> Self {
        self.distance_threshold = threshold;
        self
    }

    /// Sets the category returned when no neighbor qualifies.
    #[must_use]
    pub fn with_fallback_category(mut self, category: Option<Category>) -> Self {
        self.fallback_category = category;
        self
    }

    /// Enables or disables query tracing.
    #[must_use]
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Sets how many neighbors a trace records.
    #[must_use]
    pub fn with_trace_neighbors(mut self, n: usize) -> Self {
        self.trace_neighbors = n;
        self
    }

    /// Checks that every value is in range.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHyperparameter` for a negative or NaN threshold.
    pub fn validate(&self) -> Result<()> {
        check_threshold(self.distance_threshold)
    }
}

fn check_threshold(threshold: f64) -> Result<()> {
    if threshold.is_nan() || threshold < 0.0 {
        return Err(KnnError::invalid_hyperparameter(
            "distance_threshold",
            threshold,
            ">= 0",
        ));
    }
    Ok(())
}

/// K-Nearest Neighbors classifier over an immutable corpus.
///
/// Queries take `&self` and allocate their own neighbor list and tally, so a
/// classifier can be shared across threads when its metric is `Sync`.
pub struct KNearestNeighbors<D> {
    corpus: Corpus,
    metric: D,
    config: ClassifierConfig,
    sink: Arc<dyn TraceSink>,
}

impl<D: fmt::Debug> fmt::Debug for KNearestNeighbors<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KNearestNeighbors")
            .field("samples", &self.corpus.len())
            .field("width", &self.corpus.width())
            .field("metric", &self.metric)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<D: Distance> KNearestNeighbors<D> {
    /// Creates a classifier with the default configuration.
    ///
    /// kNN is a lazy learner: the corpus is simply stored and all work is
    /// deferred to query time.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `metric` is shaped for a different feature
    /// width than the corpus (e.g. a weight vector of the wrong length).
    pub fn new(corpus: Corpus, metric: D) -> Result<Self> {
        metric.check_width(corpus.width())?;

        Ok(Self {
            corpus,
            metric,
            config: ClassifierConfig::default(),
            sink: Arc::new(TracingSink),
        })
    }

    /// Replaces the configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHyperparameter` if `config` fails validation.
    pub fn with_config(mut self, config: ClassifierConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Routes query traces to `sink` instead of `tracing`.
    #[must_use]
    pub fn with_trace_sink(mut self, sink: Arc<dyn TraceSink>) -> Self {
        self.sink = sink;
        self
    }

    /// The reference corpus.
    #[must_use]
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// The distance metric.
    #[must_use]
    pub fn metric(&self) -> &D {
        &self.metric
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Majority category among the `k` nearest samples, using the configured
    /// threshold.
    ///
    /// Returns the configured fallback when no neighbor qualifies.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `query` does not have the corpus width.
    pub fn classify(&self, k: usize, query: &[Feature]) -> Result<Option<Category>> {
        self.classify_with_threshold(k, query, self.config.distance_threshold)
    }

    /// Like [`classify`](Self::classify) with an explicit threshold.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` on a width mismatch and
    /// `InvalidHyperparameter` for a negative or NaN threshold.
    pub fn classify_with_threshold(
        &self,
        k: usize,
        query: &[Feature],
        threshold: f64,
    ) -> Result<Option<Category>> {
        let (_, category) = self.run(k, query, threshold)?;
        Ok(category)
    }

    /// Vote distribution among the `k` nearest samples, using the configured
    /// threshold.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `query` does not have the corpus width.
    pub fn votes(&self, k: usize, query: &[Feature]) -> Result<VoteTally> {
        self.votes_with_threshold(k, query, self.config.distance_threshold)
    }

    /// Like [`votes`](Self::votes) with an explicit threshold.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` on a width mismatch and
    /// `InvalidHyperparameter` for a negative or NaN threshold.
    pub fn votes_with_threshold(
        &self,
        k: usize,
        query: &[Feature],
        threshold: f64,
    ) -> Result<VoteTally> {
        let (tally, _) = self.run(k, query, threshold)?;
        Ok(tally)
    }

    /// The `min(k, n)` nearest samples, ascending by distance, ties in corpus
    /// order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `query` does not have the corpus width.
    pub fn nearest(&self, k: usize, query: &[Feature]) -> Result<Vec<Neighbor>> {
        neighbors::nearest(&self.corpus, &self.metric, k, query)
    }

    fn run(
        &self,
        k: usize,
        query: &[Feature],
        threshold: f64,
    ) -> Result<(VoteTally, Option<Category>)> {
        check_threshold(threshold)?;

        let nearest = self.nearest(k, query)?;
        let tally = VoteTally::from_neighbors(&nearest, threshold);
        let category = tally.winner().or(self.config.fallback_category);

        if self.config.trace {
            self.trace(query, threshold, category, &tally, &nearest);
        }

        Ok((tally, category))
    }

    fn trace(
        &self,
        query: &[Feature],
        threshold: f64,
        category: Option<Category>,
        tally: &VoteTally,
        nearest: &[Neighbor],
    ) {
        let mask = self.corpus.categorical();
        let neighbors = nearest
            .iter()
            .take(self.config.trace_neighbors)
            .filter_map(|n| {
                let sample = self.corpus.get(n.index)?;
                Some(TracedNeighbor {
                    neighbor: *n,
                    features: self.metric.render(&sample.features, mask),
                })
            })
            .collect();

        self.sink.record(&QueryTrace {
            query: query.to_vec(),
            rendered_query: self.metric.render(query, mask),
            distance_threshold: threshold,
            category,
            tally: tally.clone(),
            neighbors,
        });
    }
}


#[cfg(test)]
mod tests_knn_contract;
