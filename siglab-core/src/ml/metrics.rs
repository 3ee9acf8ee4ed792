//! Classification scoring: accuracy plus support-weighted precision,
//! recall, and F1 over the two classes.

/// Held-out evaluation scores, all in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scores {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// Score predictions against truth. Per-class precision/recall/F1 are
/// weighted by each class's support in `y_true`; a class with no predicted
/// positives contributes zero precision rather than an undefined value.
pub fn score(y_true: &[u8], y_pred: &[u8]) -> Scores {
    assert_eq!(y_true.len(), y_pred.len(), "prediction length mismatch");
    let n = y_true.len() as f64;
    if y_true.is_empty() {
        return Scores {
            accuracy: 0.0,
            precision: 0.0,
            recall: 0.0,
            f1: 0.0,
        };
    }

    let correct = y_true
        .iter()
        .zip(y_pred)
        .filter(|(t, p)| t == p)
        .count() as f64;
    let accuracy = correct / n;

    let mut precision = 0.0;
    let mut recall = 0.0;
    let mut f1 = 0.0;
    for class in [0u8, 1u8] {
        let support = y_true.iter().filter(|&&t| t == class).count() as f64;
        if support == 0.0 {
            continue;
        }
        let tp = y_true
            .iter()
            .zip(y_pred)
            .filter(|(&t, &p)| t == class && p == class)
            .count() as f64;
        let predicted = y_pred.iter().filter(|&&p| p == class).count() as f64;

        let p = if predicted > 0.0 { tp / predicted } else { 0.0 };
        let r = tp / support;
        let f = if p + r > 0.0 {
            2.0 * p * r / (p + r)
        } else {
            0.0
        };

        let weight = support / n;
        precision += weight * p;
        recall += weight * r;
        f1 += weight * f;
    }

    Scores {
        accuracy,
        precision,
        recall,
        f1,
    }
}
