//! Next-day-direction classifiers.
//!
//! A bake-off between two independently trained models on the same
//! stratified split: a CART decision tree (unscaled features) and an L2
//! logistic regression (standardized features). The trainer scores both on
//! the held-out 30% and keeps the one with strictly higher accuracy.

pub mod dataset;
pub mod logistic;
pub mod metrics;
pub mod trainer;
pub mod tree;

pub use dataset::{Dataset, StandardScaler, TrainTestSplit, CANDIDATE_FEATURES};
pub use metrics::Scores;
pub use trainer::{train, MlError, ModelKind, ModelReport};

use thiserror::Error;

/// A model fit that could not proceed. The trainer logs and skips the
/// affected model rather than aborting the bake-off.
#[derive(Debug, Error)]
pub enum FitError {
    #[error("empty training set")]
    EmptyTrainingSet,

    #[error("feature dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}
