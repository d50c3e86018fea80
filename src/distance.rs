//! Distance metrics between feature vectors.
//!
//! A metric is any type implementing [`Distance`]. It receives both vectors
//! plus the corpus categorical mask, and must return a non-negative value for
//! every pair of equal-width vectors. Plain closures qualify:
//!
//! ```
//! use formatknn::distance::Distance;
//!
//! let count_diffs = |a: &[i32], b: &[i32], _mask: &[bool]| {
//!     a.iter().zip(b).filter(|(x, y)| x != y).count() as f64
//! };
//! assert_eq!(count_diffs.distance(&[1, 2, 3], &[1, 0, 0], &[true; 3]), 2.0);
//! ```

use crate::corpus::Feature;
use crate::error::{KnnError, Result};

/// Dissimilarity between two same-width feature vectors.
pub trait Distance {
    /// Computes the distance between `a` and `b`.
    ///
    /// `categorical[i]` tells whether feature `i` is nominal. Must be total,
    /// deterministic and `>= 0`.
    fn distance(&self, a: &[Feature], b: &[Feature], categorical: &[bool]) -> f64;

    /// Checks that the metric covers vectors of `width` features.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the metric is shaped for another width.
    fn check_width(&self, _width: usize) -> Result<()> {
        Ok(())
    }

    /// Human-readable rendering of a feature vector for diagnostics.
    fn render(&self, features: &[Feature], _categorical: &[bool]) -> String {
        render_plain(features)
    }
}

impl<F> Distance for F
where
    F: Fn(&[Feature], &[Feature], &[bool]) -> f64,
{
    fn distance(&self, a: &[Feature], b: &[Feature], categorical: &[bool]) -> f64 {
        self(a, b, categorical)
    }
}

fn render_plain(features: &[Feature]) -> String {
    let parts: Vec<String> = features.iter().map(ToString::to_string).collect();
    format!("[{}]", parts.join(", "))
}

/// Fraction of positions whose values differ. Range `[0, 1]`.
///
/// Every feature is compared by equality regardless of the mask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hamming;

impl Distance for Hamming {
    fn distance(&self, a: &[Feature], b: &[Feature], _categorical: &[bool]) -> f64 {
        if a.is_empty() {
            return 0.0;
        }
        let diffs = a.iter().zip(b).filter(|(x, y)| x != y).count();
        diffs as f64 / a.len() as f64
    }
}

/// Unnormalized mask-aware L1 distance.
///
/// Numeric features contribute `|a - b|`; categorical features contribute 1
/// when they differ.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Manhattan;

impl Distance for Manhattan {
    fn distance(&self, a: &[Feature], b: &[Feature], categorical: &[bool]) -> f64 {
        a.iter()
            .zip(b)
            .zip(categorical)
            .map(|((&x, &y), &nominal)| {
                if nominal {
                    f64::from(u8::from(x != y))
                } else {
                    (f64::from(x) - f64::from(y)).abs()
                }
            })
            .sum()
    }
}

/// Weighted mix of equality and magnitude terms, normalized to `[0, 1]`.
///
/// Categorical feature `i` contributes `w[i]` when the values differ.
/// Numeric feature `i` contributes `w[i] * d / (1 + d)` with `d = |a - b|`,
/// so small offsets cost little and large ones saturate near `w[i]`.
/// The sum is divided by the total weight.
#[derive(Debug, Clone, PartialEq)]
pub struct MixedDistance {
    weights: Vec<f64>,
    total: f64,
}

impl MixedDistance {
    /// Every feature weighted 1.0.
    #[must_use]
    pub fn uniform(width: usize) -> Self {
        Self {
            weights: vec![1.0; width],
            total: width as f64,
        }
    }

    /// Explicit per-feature weights.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHyperparameter` if any weight is negative or not
    /// finite, or if all weights are zero.
    pub fn with_weights(weights: Vec<f64>) -> Result<Self> {
        if let Some((i, w)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(KnnError::invalid_hyperparameter(
                &format!("weights[{i}]"),
                w,
                "finite and >= 0",
            ));
        }

        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return Err(KnnError::invalid_hyperparameter(
                "weights",
                "all zero",
                "at least one positive weight",
            ));
        }

        Ok(Self { weights, total })
    }

    /// Per-feature weights.
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

impl Distance for MixedDistance {
    fn check_width(&self, width: usize) -> Result<()> {
        if self.weights.len() == width {
            Ok(())
        } else {
            Err(KnnError::dimension_mismatch(
                "metric weights",
                width,
                self.weights.len(),
            ))
        }
    }

    fn distance(&self, a: &[Feature], b: &[Feature], categorical: &[bool]) -> f64 {
        if self.total <= 0.0 {
            return 0.0;
        }

        let mut sum = 0.0;
        for (i, ((&x, &y), &nominal)) in a.iter().zip(b).zip(categorical).enumerate() {
            let w = self.weights.get(i).copied().unwrap_or(0.0);
            if nominal {
                if x != y {
                    sum += w;
                }
            } else {
                let d = (f64::from(x) - f64::from(y)).abs();
                sum += w * d / (1.0 + d);
            }
        }

        sum / self.total
    }

    /// Categorical positions are prefixed with `#`.
    fn render(&self, features: &[Feature], categorical: &[bool]) -> String {
        let parts: Vec<String> = features
            .iter()
            .zip(categorical)
            .map(|(f, &nominal)| {
                if nominal {
                    format!("#{f}")
                } else {
                    f.to_string()
                }
            })
            .collect();
        format!("[{}]", parts.join(", "))
    }
}
