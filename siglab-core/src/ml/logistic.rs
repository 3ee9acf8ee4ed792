//! L2-regularized logistic regression trained by batch gradient descent.
//!
//! Expects standardized inputs; the trainer fits a scaler on the training
//! rows and applies it to both sides of the split before calling in here.

use super::FitError;

#[derive(Debug, Clone)]
pub struct LogisticRegression {
    weights: Vec<f64>,
    intercept: f64,
    learning_rate: f64,
    max_iter: usize,
    /// Inverse regularization strength; larger means weaker regularization.
    c: f64,
}

impl LogisticRegression {
    pub fn new(max_iter: usize, c: f64) -> Self {
        Self {
            weights: Vec::new(),
            intercept: 0.0,
            learning_rate: 0.1,
            max_iter,
            c,
        }
    }

    pub fn fit(&mut self, x: &[Vec<f64>], y: &[u8]) -> Result<(), FitError> {
        if x.is_empty() || y.is_empty() {
            return Err(FitError::EmptyTrainingSet);
        }
        let n_features = x[0].len();
        for row in x {
            if row.len() != n_features {
                return Err(FitError::DimensionMismatch {
                    expected: n_features,
                    got: row.len(),
                });
            }
        }

        let n = x.len() as f64;
        self.weights = vec![0.0; n_features];
        self.intercept = 0.0;

        let mut grad_w = vec![0.0; n_features];
        for _ in 0..self.max_iter {
            grad_w.iter_mut().for_each(|g| *g = 0.0);
            let mut grad_b = 0.0;
            for (row, &label) in x.iter().zip(y) {
                let residual = self.probability(row) - f64::from(label);
                for (g, v) in grad_w.iter_mut().zip(row) {
                    *g += residual * v;
                }
                grad_b += residual;
            }
            // L2 penalty on the weights only, never the intercept.
            let mut norm_sq = 0.0;
            for (g, w) in grad_w.iter_mut().zip(&self.weights) {
                *g = *g / n + w / (self.c * n);
                norm_sq += *g * *g;
            }
            grad_b /= n;
            norm_sq += grad_b * grad_b;

            for (w, g) in self.weights.iter_mut().zip(&grad_w) {
                *w -= self.learning_rate * g;
            }
            self.intercept -= self.learning_rate * grad_b;

            if norm_sq.sqrt() < 1e-6 {
                break;
            }
        }
        Ok(())
    }

    /// P(y = 1 | row).
    pub fn probability(&self, row: &[f64]) -> f64 {
        let z = self
            .weights
            .iter()
            .zip(row)
            .map(|(w, v)| w * v)
            .sum::<f64>()
            + self.intercept;
        sigmoid(z)
    }

    pub fn predict_row(&self, row: &[f64]) -> u8 {
        u8::from(self.probability(row) >= 0.5)
    }

    pub fn predict(&self, x: &[Vec<f64>]) -> Vec<u8> {
        x.iter().map(|row| self.predict_row(row)).collect()
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        // Numerically stable branch for large negative z.
        let e = z.exp();
        e / (1.0 + e)
    }
}
