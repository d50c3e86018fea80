//! formatknn: k-nearest-neighbor prediction of code formatting decisions.
//!
//! Each whitespace decision in a source file (insert a newline, drop a
//! space, ...) is described by a fixed-width vector of structural features.
//! Given a corpus of such vectors labeled with the decision a human made,
//! formatknn predicts the decision for a new vector by letting its nearest
//! neighbors vote.
//!
//! # Quick Start
//!
//! ```
//! use formatknn::prelude::*;
//!
//! let corpus = Corpus::new(
//!     vec![vec![3, 0, 12], vec![3, 0, 14], vec![7, 1, 2]],
//!     vec![1, 1, 0],
//!     vec![true, true, false],
//! ).unwrap();
//!
//! let knn = KNearestNeighbors::new(corpus, MixedDistance::uniform(3)).unwrap();
//! assert_eq!(knn.classify(2, &[3, 0, 13]).unwrap(), Some(1));
//!
//! let votes = knn.votes(3, &[3, 0, 13]).unwrap();
//! assert_eq!(votes.count(1), 2);
//! ```
//!
//! # Modules
//!
//! - [`corpus`]: Labeled feature vectors and the categorical mask
//! - [`distance`]: Distance trait and built-in metrics
//! - [`neighbors`]: Exhaustive, stable nearest-neighbor search
//! - [`vote`]: Threshold-gated vote tally and majority resolution
//! - [`classification`]: The classifier facade and its configuration
//! - [`trace`]: Per-query diagnostic traces

pub mod classification;
pub mod corpus;
pub mod distance;
pub mod error;
pub mod neighbors;
pub mod prelude;
pub mod trace;
pub mod vote;

pub use classification::{ClassifierConfig, KNearestNeighbors};
pub use corpus::{Category, Corpus, Feature, Sample};
pub use error::{KnnError, Result};
