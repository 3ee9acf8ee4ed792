//! Model bake-off: train both classifiers on one stratified split and keep
//! the better one.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::dataset::{stratified_split, Dataset, StandardScaler};
use super::logistic::LogisticRegression;
use super::metrics::{score, Scores};
use super::tree::{DecisionTree, TreeConfig};
use crate::domain::Series;
use crate::logging::RunLog;

/// Minimum distinct features required before training is attempted.
const MIN_FEATURES: usize = 5;
/// Minimum labeled rows required before training is attempted.
const MIN_ROWS: usize = 20;
/// Held-out fraction for the test side of the split.
const TEST_FRACTION: f64 = 0.3;
/// Fixed shuffle seed so repeated runs produce the same split.
const SPLIT_SEED: u64 = 42;

#[derive(Debug, Error)]
pub enum MlError {
    #[error("insufficient features for model training: {available} available, {MIN_FEATURES} required")]
    InsufficientFeatures { available: usize },

    #[error("not enough labeled rows for model training: {rows} available, {MIN_ROWS} required")]
    NotEnoughRows { rows: usize },

    #[error("no model could be trained")]
    NoModelTrained,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    DecisionTree,
    LogisticRegression,
}

impl ModelKind {
    pub fn label(self) -> &'static str {
        match self {
            ModelKind::DecisionTree => "Decision Tree",
            ModelKind::LogisticRegression => "Logistic Regression",
        }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The winning model's held-out scores and metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelReport {
    pub model: ModelKind,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Top feature importances, descending; populated only when the
    /// decision tree wins (at most ten entries).
    pub feature_importance: Vec<(String, f64)>,
    pub features_used: Vec<String>,
    pub train_rows: usize,
    pub test_rows: usize,
}

struct Candidate {
    kind: ModelKind,
    scores: Scores,
    importances: Option<Vec<f64>>,
}

/// Train both models on an enriched series and report the better one.
///
/// The decision tree sees raw features; the logistic regression sees
/// features standardized by a scaler fit on the training rows only. A model
/// whose fit fails is logged and skipped; the logistic regression replaces
/// the tree only on strictly higher held-out accuracy.
pub fn train(series: &Series, log: &RunLog) -> Result<ModelReport, MlError> {
    let dataset =
        Dataset::from_series(series).ok_or(MlError::InsufficientFeatures { available: 0 })?;
    if dataset.feature_count() < MIN_FEATURES {
        log.error(format!(
            "insufficient features for {}: {} of {} required",
            series.ticker(),
            dataset.feature_count(),
            MIN_FEATURES
        ));
        return Err(MlError::InsufficientFeatures {
            available: dataset.feature_count(),
        });
    }
    if dataset.len() < MIN_ROWS {
        log.error(format!(
            "not enough labeled rows for {}: {} of {} required",
            series.ticker(),
            dataset.len(),
            MIN_ROWS
        ));
        return Err(MlError::NotEnoughRows {
            rows: dataset.len(),
        });
    }

    log.info(format!(
        "training models for {} on {} rows x {} features",
        series.ticker(),
        dataset.len(),
        dataset.feature_count()
    ));

    let split = stratified_split(&dataset, TEST_FRACTION, SPLIT_SEED);
    let scaler = StandardScaler::fit(&split.x_train);
    let x_train_scaled = scaler.transform(&split.x_train);
    let x_test_scaled = scaler.transform(&split.x_test);

    let mut candidates: Vec<Candidate> = Vec::new();

    let mut tree = DecisionTree::new(TreeConfig::default());
    match tree.fit(&split.x_train, &split.y_train) {
        Ok(()) => {
            let scores = score(&split.y_test, &tree.predict(&split.x_test));
            log.info(format!(
                "decision tree accuracy for {}: {:.4}",
                series.ticker(),
                scores.accuracy
            ));
            candidates.push(Candidate {
                kind: ModelKind::DecisionTree,
                scores,
                importances: Some(tree.feature_importances().to_vec()),
            });
        }
        Err(err) => log.warn(format!(
            "decision tree training failed for {}: {err}",
            series.ticker()
        )),
    }

    let mut logistic = LogisticRegression::new(1000, 1.0);
    match logistic.fit(&x_train_scaled, &split.y_train) {
        Ok(()) => {
            let scores = score(&split.y_test, &logistic.predict(&x_test_scaled));
            log.info(format!(
                "logistic regression accuracy for {}: {:.4}",
                series.ticker(),
                scores.accuracy
            ));
            candidates.push(Candidate {
                kind: ModelKind::LogisticRegression,
                scores,
                importances: None,
            });
        }
        Err(err) => log.warn(format!(
            "logistic regression training failed for {}: {err}",
            series.ticker()
        )),
    }

    let mut best: Option<Candidate> = None;
    for candidate in candidates {
        let replace = match &best {
            None => true,
            Some(current) => candidate.scores.accuracy > current.scores.accuracy,
        };
        if replace {
            best = Some(candidate);
        }
    }
    let best = best.ok_or(MlError::NoModelTrained)?;

    log.info(format!(
        "best model for {}: {} ({:.4} accuracy)",
        series.ticker(),
        best.kind,
        best.scores.accuracy
    ));

    let feature_importance = best
        .importances
        .map(|values| top_importances(&dataset.feature_names, &values, 10))
        .unwrap_or_default();

    Ok(ModelReport {
        model: best.kind,
        accuracy: best.scores.accuracy,
        precision: best.scores.precision,
        recall: best.scores.recall,
        f1: best.scores.f1,
        feature_importance,
        features_used: dataset.feature_names.clone(),
        train_rows: split.y_train.len(),
        test_rows: split.y_test.len(),
    })
}

fn top_importances(names: &[String], values: &[f64], limit: usize) -> Vec<(String, f64)> {
    let mut pairs: Vec<(String, f64)> = names
        .iter()
        .cloned()
        .zip(values.iter().copied())
        .collect();
    // Stable sort keeps feature order among equal importances.
    pairs.sort_by(|a, b| b.1.partial_cmp(&a.1).expect("finite importances"));
    pairs.truncate(limit);
    pairs
}
