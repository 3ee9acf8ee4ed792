//! CART decision-tree classifier (gini impurity).
//!
//! Greedy binary splits over axis-aligned thresholds. Split search is
//! deterministic: features are scanned in order and a candidate replaces the
//! incumbent only on strictly lower impurity, so retraining on the same data
//! rebuilds the same tree. Feature importances are normalized total
//! impurity decreases.

use super::FitError;

/// Tree growth limits.
#[derive(Debug, Clone, Copy)]
pub struct TreeConfig {
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 8,
            min_samples_split: 20,
            min_samples_leaf: 10,
        }
    }
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        class: u8,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

#[derive(Debug, Clone)]
pub struct DecisionTree {
    config: TreeConfig,
    root: Option<Node>,
    n_features: usize,
    importances: Vec<f64>,
}

impl DecisionTree {
    pub fn new(config: TreeConfig) -> Self {
        Self {
            config,
            root: None,
            n_features: 0,
            importances: Vec::new(),
        }
    }

    pub fn fit(&mut self, x: &[Vec<f64>], y: &[u8]) -> Result<(), FitError> {
        if x.is_empty() || y.is_empty() {
            return Err(FitError::EmptyTrainingSet);
        }
        self.n_features = x[0].len();
        for row in x {
            if row.len() != self.n_features {
                return Err(FitError::DimensionMismatch {
                    expected: self.n_features,
                    got: row.len(),
                });
            }
        }

        self.importances = vec![0.0; self.n_features];
        let indices: Vec<usize> = (0..x.len()).collect();
        let total = x.len() as f64;
        let root = self.build(x, y, &indices, 0, total);
        self.root = Some(root);

        let sum: f64 = self.importances.iter().sum();
        if sum > 0.0 {
            for v in &mut self.importances {
                *v /= sum;
            }
        }
        Ok(())
    }

    pub fn predict_row(&self, row: &[f64]) -> u8 {
        let mut node = self.root.as_ref().expect("tree not fitted");
        loop {
            match node {
                Node::Leaf { class } => return *class,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }

    pub fn predict(&self, x: &[Vec<f64>]) -> Vec<u8> {
        x.iter().map(|row| self.predict_row(row)).collect()
    }

    /// Normalized impurity-decrease importances, one entry per feature.
    pub fn feature_importances(&self) -> &[f64] {
        &self.importances
    }

    fn build(
        &mut self,
        x: &[Vec<f64>],
        y: &[u8],
        indices: &[usize],
        depth: usize,
        total: f64,
    ) -> Node {
        let (count0, count1) = class_counts(y, indices);
        let majority = u8::from(count1 > count0);

        if depth >= self.config.max_depth
            || indices.len() < self.config.min_samples_split
            || count0 == 0
            || count1 == 0
        {
            return Node::Leaf { class: majority };
        }

        let parent_impurity = gini(count0, count1);
        let best = self.best_split(x, y, indices, parent_impurity);
        let Some(best) = best else {
            return Node::Leaf { class: majority };
        };

        let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
            .iter()
            .partition(|&&i| x[i][best.feature] <= best.threshold);

        // Weighted impurity decrease, accumulated before recursing.
        let n = indices.len() as f64;
        self.importances[best.feature] += (n / total) * best.gain;

        let left = self.build(x, y, &left_idx, depth + 1, total);
        let right = self.build(x, y, &right_idx, depth + 1, total);
        Node::Split {
            feature: best.feature,
            threshold: best.threshold,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    fn best_split(
        &self,
        x: &[Vec<f64>],
        y: &[u8],
        indices: &[usize],
        parent_impurity: f64,
    ) -> Option<SplitCandidate> {
        let n = indices.len();
        let min_leaf = self.config.min_samples_leaf;
        let mut best: Option<SplitCandidate> = None;

        for feature in 0..self.n_features {
            let mut ordered: Vec<(f64, u8)> =
                indices.iter().map(|&i| (x[i][feature], y[i])).collect();
            ordered.sort_by(|a, b| a.0.partial_cmp(&b.0).expect("finite feature values"));

            let (mut right0, mut right1) = ordered
                .iter()
                .fold((0usize, 0usize), |(c0, c1), (_, label)| {
                    if *label == 0 {
                        (c0 + 1, c1)
                    } else {
                        (c0, c1 + 1)
                    }
                });
            let mut left0 = 0usize;
            let mut left1 = 0usize;

            for split_at in 1..n {
                let (value, label) = ordered[split_at - 1];
                if label == 0 {
                    left0 += 1;
                    right0 -= 1;
                } else {
                    left1 += 1;
                    right1 -= 1;
                }

                let next_value = ordered[split_at].0;
                if next_value == value {
                    continue;
                }
                if split_at < min_leaf || n - split_at < min_leaf {
                    continue;
                }

                let left_n = split_at as f64;
                let right_n = (n - split_at) as f64;
                let weighted = (left_n * gini(left0, left1)
                    + right_n * gini(right0, right1))
                    / n as f64;
                let gain = parent_impurity - weighted;
                if gain <= 0.0 {
                    continue;
                }

                let threshold = (value + next_value) / 2.0;
                let better = match &best {
                    None => true,
                    Some(b) => gain > b.gain,
                };
                if better {
                    best = Some(SplitCandidate {
                        feature,
                        threshold,
                        gain,
                    });
                }
            }
        }

        best
    }
}

struct SplitCandidate {
    feature: usize,
    threshold: f64,
    gain: f64,
}

fn class_counts(y: &[u8], indices: &[usize]) -> (usize, usize) {
    let ones = indices.iter().filter(|&&i| y[i] == 1).count();
    (indices.len() - ones, ones)
}

fn gini(count0: usize, count1: usize) -> f64 {
    let n = (count0 + count1) as f64;
    if n == 0.0 {
        return 0.0;
    }
    let p0 = count0 as f64 / n;
    let p1 = count1 as f64 / n;
    1.0 - p0 * p0 - p1 * p1
}
