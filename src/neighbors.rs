//! Exhaustive nearest-neighbor search over a [`Corpus`].
//!
//! Every query evaluates the metric once per corpus sample, then stable-sorts
//! the results by distance. Samples at equal distance therefore stay in
//! corpus insertion order, which keeps voting reproducible.

use crate::corpus::{Category, Corpus, Feature};
use crate::distance::Distance;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A corpus sample's distance to one query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    /// Label of the corpus sample
    pub category: Category,
    /// Distance from the query
    pub distance: f64,
    /// Position of the sample in the corpus
    pub index: usize,
}

impl Neighbor {
    /// Creates a neighbor record.
    #[must_use]
    pub fn new(category: Category, distance: f64, index: usize) -> Self {
        Self {
            category,
            distance,
            index,
        }
    }
}

impl fmt::Display for Neighbor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(@{},cat={},d={:.2})",
            self.index, self.category, self.distance
        )
    }
}

/// Distance from `query` to every sample, in corpus order.
///
/// # Errors
///
/// Returns `InvalidInput` if `query` does not have the corpus width.
pub fn distances<D: Distance + ?Sized>(
    corpus: &Corpus,
    metric: &D,
    query: &[Feature],
) -> Result<Vec<Neighbor>> {
    corpus.check_width(query)?;

    let mask = corpus.categorical();
    Ok(corpus
        .samples()
        .iter()
        .enumerate()
        .map(|(i, sample)| {
            let d = metric.distance(&sample.features, query, mask);
            Neighbor::new(sample.label, d, i)
        })
        .collect())
}

/// The `min(k, n)` samples closest to `query`, ascending by distance.
///
/// `k == 0` yields an empty list. Ties keep corpus order.
///
/// # Errors
///
/// Returns `InvalidInput` if `query` does not have the corpus width.
pub fn nearest<D: Distance + ?Sized>(
    corpus: &Corpus,
    metric: &D,
    k: usize,
    query: &[Feature],
) -> Result<Vec<Neighbor>> {
    let mut all = distances(corpus, metric, query)?;
    if k == 0 {
        return Ok(Vec::new());
    }

    // sort_by is stable, so equal keys keep corpus order
    all.sort_by(by_distance);
    all.truncate(k);
    Ok(all)
}

/// Ascending distance with every NaN, whatever its sign bit, ordered last.
fn by_distance(a: &Neighbor, b: &Neighbor) -> Ordering {
    match (a.distance.is_nan(), b.distance.is_nan()) {
        (false, false) => a.distance.total_cmp(&b.distance),
        (a_nan, b_nan) => a_nan.cmp(&b_nan),
    }
}
