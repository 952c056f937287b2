use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// An entry of a probability vector together with its original position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedProbability {
    pub index: usize,
    pub probability: f64,
}

/// Numerically stable softmax, rounded to 4 decimal places.
///
/// The maximum logit is subtracted before exponentiating, so large logits
/// cannot overflow. An empty input yields an empty output.
pub fn softmax(logits: &[f64]) -> Vec<f64> {
    let Some(max) = logits.iter().copied().reduce(f64::max) else {
        return Vec::new();
    };
    let exps: Vec<f64> = logits.iter().map(|l| (l - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.iter().map(|e| round_to(e / sum, 4)).collect()
}

/// The `k` most probable entries, highest first. Equal probabilities keep
/// their original index order.
pub fn top_k(probabilities: &[f64], k: usize) -> Vec<RankedProbability> {
    probabilities
        .iter()
        .enumerate()
        .map(|(index, &probability)| RankedProbability { index, probability })
        .sorted_by(|a, b| b.probability.total_cmp(&a.probability))
        .take(k)
        .collect()
}

/// Rounds half away from zero to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub(crate) fn variance(values: &[f64]) -> f64 {
    let m = mean(values);
    mean(&values.iter().map(|v| (v - m).powi(2)).collect::<Vec<_>>())
}
