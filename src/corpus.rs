//! Labeled reference set for nearest-neighbor lookup.
//!
//! A [`Corpus`] is built once from feature vectors produced by an external
//! extraction pipeline and is read-only afterwards. Every vector has the same
//! width, which is also the length of the categorical mask.
//!
//! # Example
//!
//! ```
//! use formatknn::corpus::Corpus;
//!
//! let corpus = Corpus::new(
//!     vec![vec![1, 0, 4], vec![1, 2, 8]],
//!     vec![0, 1],
//!     vec![true, true, false],
//! ).expect("consistent corpus");
//!
//! assert_eq!(corpus.len(), 2);
//! assert_eq!(corpus.width(), 3);
//! ```

use crate::error::{KnnError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A single structural feature value.
pub type Feature = i32;

/// A formatting category label. Any sign or range is allowed.
pub type Category = i32;

/// One labeled feature vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    /// Feature vector
    pub features: Vec<Feature>,
    /// Category this vector was observed with
    pub label: Category,
}

impl Sample {
    /// Creates a labeled sample.
    #[must_use]
    pub fn new(features: Vec<Feature>, label: Category) -> Self {
        Self { features, label }
    }
}

/// Immutable, non-empty collection of samples plus the categorical mask.
#[derive(Debug, Clone, PartialEq)]
pub struct Corpus {
    samples: Vec<Sample>,
    categorical: Vec<bool>,
}

impl Corpus {
    /// Builds a corpus from parallel vectors and labels.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if `vectors` and `labels` differ in length, or a
    ///   vector's width differs from `categorical.len()`.
    /// - `InvalidState` if no vectors are supplied.
    pub fn new(
        vectors: Vec<Vec<Feature>>,
        labels: Vec<Category>,
        categorical: Vec<bool>,
    ) -> Result<Self> {
        if vectors.len() != labels.len() {
            return Err(KnnError::dimension_mismatch(
                "label count",
                vectors.len(),
                labels.len(),
            ));
        }

        let samples = vectors
            .into_iter()
            .zip(labels)
            .map(|(features, label)| Sample::new(features, label))
            .collect();

        Self::from_samples(samples, categorical)
    }

    /// Builds a corpus from already paired samples.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Corpus::new`].
    pub fn from_samples(samples: Vec<Sample>, categorical: Vec<bool>) -> Result<Self> {
        if samples.is_empty() {
            return Err(KnnError::empty_corpus("at least one sample is required"));
        }

        let width = categorical.len();
        if let Some((i, bad)) = samples
            .iter()
            .enumerate()
            .find(|(_, s)| s.features.len() != width)
        {
            return Err(KnnError::InvalidInput {
                message: format!(
                    "sample {i} has width {}, categorical mask has width {width}",
                    bad.features.len()
                ),
            });
        }

        debug!(
            samples = samples.len(),
            width,
            categorical = categorical.iter().filter(|&&c| c).count(),
            "Corpus built"
        );

        Ok(Self {
            samples,
            categorical,
        })
    }

    /// Returns a new corpus without the samples matching `exclude`.
    ///
    /// The predicate sees each sample with its index in this corpus. Used to
    /// withhold one document's samples during leave-one-out validation.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if every sample would be excluded.
    pub fn excluding<F>(&self, mut exclude: F) -> Result<Self>
    where
        F: FnMut(usize, &Sample) -> bool,
    {
        let kept: Vec<Sample> = self
            .samples
            .iter()
            .enumerate()
            .filter(|(i, s)| !exclude(*i, *s))
            .map(|(_, s)| s.clone())
            .collect();

        if kept.is_empty() {
            return Err(KnnError::empty_corpus("every sample was excluded"));
        }

        Ok(Self {
            samples: kept,
            categorical: self.categorical.clone(),
        })
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false` for a constructed corpus.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Width shared by every feature vector.
    #[must_use]
    pub fn width(&self) -> usize {
        self.categorical.len()
    }

    /// Per-feature categorical mask.
    #[must_use]
    pub fn categorical(&self) -> &[bool] {
        &self.categorical
    }

    /// All samples in insertion order.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Sample at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    /// Checks that `query` has the corpus width.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` on a width mismatch.
    pub fn check_width(&self, query: &[Feature]) -> Result<()> {
        if query.len() == self.width() {
            Ok(())
        } else {
            Err(KnnError::dimension_mismatch(
                "query width",
                self.width(),
                query.len(),
            ))
        }
    }
}
