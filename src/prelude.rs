//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use formatknn::prelude::*;
//! ```

pub use crate::classification::{ClassifierConfig, KNearestNeighbors};
pub use crate::corpus::{Category, Corpus, Feature, Sample};
pub use crate::distance::{Distance, Hamming, Manhattan, MixedDistance};
pub use crate::error::{KnnError, Result};
pub use crate::neighbors::Neighbor;
pub use crate::trace::{QueryTrace, TraceSink, TracingSink};
pub use crate::vote::VoteTally;
