//! Threshold-gated majority voting.
//!
//! Votes are cast walking the neighbor list nearest first. The walk stops at
//! the first neighbor farther than the threshold: the list is sorted, so no
//! later neighbor could qualify either.
//!
//! # Tie-break
//!
//! When several categories share the highest count, the winner is the one
//! that reached that count first while votes were being cast. Nearer
//! neighbors are counted earlier, so the tie goes to the category whose
//! support is concentrated closer to the query.
//!
//! ```
//! use formatknn::vote::VoteTally;
//!
//! let mut tally = VoteTally::new();
//! for category in [4, 9, 9, 4] {
//!     tally.record(category);
//! }
//! // both have two votes; 9 got its second vote first
//! assert_eq!(tally.winner(), Some(9));
//! ```

use crate::corpus::Category;
use crate::neighbors::Neighbor;
use std::collections::BTreeMap;
use std::fmt;

/// Per-category vote counts for one query.
///
/// Two tallies are equal when their category counts are equal; the order in
/// which votes were cast is not compared.
#[derive(Debug, Clone, Default)]
pub struct VoteTally {
    counts: BTreeMap<Category, usize>,
    /// Categories in the order votes were cast
    sequence: Vec<Category>,
}

impl VoteTally {
    /// Empty tally.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one vote per neighbor with `distance <= threshold`.
    ///
    /// `neighbors` must be ascending by distance.
    #[must_use]
    pub fn from_neighbors(neighbors: &[Neighbor], threshold: f64) -> Self {
        let mut tally = Self::new();
        for neighbor in neighbors {
            if neighbor.distance > threshold || neighbor.distance.is_nan() {
                break;
            }
            tally.record(neighbor.category);
        }
        tally
    }

    /// Adds one vote for `category`.
    pub fn record(&mut self, category: Category) {
        *self.counts.entry(category).or_insert(0) += 1;
        self.sequence.push(category);
    }

    /// Votes for `category` (0 if absent).
    #[must_use]
    pub fn count(&self, category: Category) -> usize {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    /// Total votes cast.
    #[must_use]
    pub fn total(&self) -> usize {
        self.sequence.len()
    }

    /// Number of distinct categories that received a vote.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// `true` when no neighbor qualified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// `(category, votes)` pairs in ascending category order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, usize)> + '_ {
        self.counts.iter().map(|(&c, &n)| (c, n))
    }

    /// Counts keyed by category.
    #[must_use]
    pub fn counts(&self) -> &BTreeMap<Category, usize> {
        &self.counts
    }

    /// Majority category, or `None` for an empty tally.
    ///
    /// Ties go to the category that reached the top count first.
    #[must_use]
    pub fn winner(&self) -> Option<Category> {
        let top = self.counts.values().copied().max()?;

        let mut running: BTreeMap<Category, usize> = BTreeMap::new();
        for &category in &self.sequence {
            let seen = running.entry(category).or_insert(0);
            *seen += 1;
            if *seen == top {
                return Some(category);
            }
        }
        None
    }

    /// Winner's votes minus the runner-up's (0 for an empty tally or a tie).
    #[must_use]
    pub fn margin(&self) -> usize {
        let mut sorted: Vec<usize> = self.counts.values().copied().collect();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        match sorted.as_slice() {
            [] => 0,
            [only] => *only,
            [first, second, ..] => first - second,
        }
    }

    /// Winner's share of all votes, in `(0, 1]`.
    #[must_use]
    pub fn confidence(&self) -> Option<f64> {
        let winner = self.winner()?;
        Some(self.count(winner) as f64 / self.total() as f64)
    }
}

impl PartialEq for VoteTally {
    fn eq(&self, other: &Self) -> bool {
        self.counts == other.counts
    }
}

impl Eq for VoteTally {}

impl fmt::Display for VoteTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (category, votes)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{category}={votes}")?;
        }
        write!(f, "}}")
    }
}
