//! Factor attribution
//!
//! Explains a score by assigning each input feature a signed contribution
//! and ranking the top factors in human-readable form. The primary path
//! fits a small logistic-regression surrogate on a seeded background
//! sample and explains the input against it; if attribution is unavailable
//! for any reason, the ranker falls back to the raw feature values and
//! never fails.

use credit_core::{Attributor, CreditError, FeatureVector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cmp::Ordering;
use std::sync::Arc;

const BACKGROUND_SEED: u64 = 42;
const BACKGROUND_SIZE: usize = 100;
const TRAIN_EPOCHS: usize = 500;
const LEARNING_RATE: f64 = 0.1;

/// Attribution via a disposable linear surrogate model.
///
/// A logistic regression is fit by gradient descent on a fixed seeded
/// background sample, then each feature's contribution for an input is
/// `weight * (value - background_mean)` — the exact Shapley value for a
/// linear model. The surrogate carries no predictive meaning; it exists
/// to produce a reproducible per-feature decomposition.
pub struct LinearSurrogateAttributor {
    weights: [f64; 3],
    background_mean: [f64; 3],
}

impl LinearSurrogateAttributor {
    pub fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(BACKGROUND_SEED);

        let samples: Vec<[f64; 3]> = (0..BACKGROUND_SIZE)
            .map(|_| [rng.gen::<f64>(), rng.gen::<f64>(), rng.gen::<f64>()])
            .collect();
        let labels: Vec<f64> = (0..BACKGROUND_SIZE)
            .map(|_| rng.gen_range(0..2) as f64)
            .collect();

        let weights = fit_logistic(&samples, &labels);

        let mut background_mean = [0.0; 3];
        for sample in &samples {
            for i in 0..3 {
                background_mean[i] += sample[i];
            }
        }
        for mean in &mut background_mean {
            *mean /= samples.len() as f64;
        }

        Self {
            weights,
            background_mean,
        }
    }
}

impl Default for LinearSurrogateAttributor {
    fn default() -> Self {
        Self::new()
    }
}

impl Attributor for LinearSurrogateAttributor {
    fn attribute(&self, features: &FeatureVector) -> Result<[f64; 3], CreditError> {
        let values = features.values();
        let mut contributions = [0.0; 3];
        for i in 0..3 {
            contributions[i] = self.weights[i] * (values[i] - self.background_mean[i]);
        }

        if contributions.iter().any(|c| !c.is_finite()) {
            return Err(CreditError::Attribution(
                "surrogate produced non-finite contribution".to_string(),
            ));
        }

        Ok(contributions)
    }
}

/// Batch gradient descent for logistic regression. Returns the feature
/// weights; the bias term is fit but not needed for attribution.
fn fit_logistic(samples: &[[f64; 3]], labels: &[f64]) -> [f64; 3] {
    let mut weights = [0.0f64; 3];
    let mut bias = 0.0f64;
    let n = samples.len() as f64;

    for _ in 0..TRAIN_EPOCHS {
        let mut grad_w = [0.0f64; 3];
        let mut grad_b = 0.0f64;

        for (x, y) in samples.iter().zip(labels) {
            let z = weights[0] * x[0] + weights[1] * x[1] + weights[2] * x[2] + bias;
            let predicted = 1.0 / (1.0 + (-z).exp());
            let err = predicted - y;
            for i in 0..3 {
                grad_w[i] += err * x[i];
            }
            grad_b += err;
        }

        for i in 0..3 {
            weights[i] -= LEARNING_RATE * grad_w[i] / n;
        }
        bias -= LEARNING_RATE * grad_b / n;
    }

    weights
}

/// Ranks per-feature contributions into display strings, falling back to
/// the raw feature values when the attributor errors.
pub struct AttributionRanker {
    attributor: Arc<dyn Attributor>,
}

impl AttributionRanker {
    pub fn new(attributor: Arc<dyn Attributor>) -> Self {
        Self { attributor }
    }

    /// Exactly 3 strings of the form `"<Label>: <signed value, 3 dp>"`.
    ///
    /// Primary path: ordered by descending absolute impact, with feature
    /// declaration order breaking ties. Fallback path: the raw feature
    /// values in declaration order. This method never fails.
    pub fn ranked_factors(&self, features: &FeatureVector) -> Vec<String> {
        match self.attributor.attribute(features) {
            Ok(contributions) => {
                let mut ranked: Vec<(&str, f64)> = FeatureVector::LABELS
                    .iter()
                    .copied()
                    .zip(contributions)
                    .collect();
                // Stable sort keeps declaration order on equal magnitudes
                ranked.sort_by(|a, b| {
                    b.1.abs()
                        .partial_cmp(&a.1.abs())
                        .unwrap_or(Ordering::Equal)
                });
                ranked
                    .into_iter()
                    .map(|(label, impact)| format!("{}: {:.3}", label, impact))
                    .collect()
            }
            Err(e) => {
                tracing::debug!("attribution unavailable, using raw feature values: {}", e);
                FeatureVector::LABELS
                    .iter()
                    .zip(features.values())
                    .map(|(label, value)| format!("{}: {:.3}", label, value))
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingAttributor;

    impl Attributor for FailingAttributor {
        fn attribute(&self, _features: &FeatureVector) -> Result<[f64; 3], CreditError> {
            Err(CreditError::Attribution("forced failure".to_string()))
        }
    }

    struct FixedAttributor([f64; 3]);

    impl Attributor for FixedAttributor {
        fn attribute(&self, _features: &FeatureVector) -> Result<[f64; 3], CreditError> {
            Ok(self.0)
        }
    }

    fn sample_features() -> FeatureVector {
        FeatureVector {
            profit_margin: 0.2,
            debt_ratio: 0.5,
            growth: 0.1,
        }
    }

    fn parse_impact(factor: &str) -> f64 {
        factor
            .rsplit(": ")
            .next()
            .and_then(|v| v.parse().ok())
            .unwrap()
    }

    #[test]
    fn test_ranker_returns_exactly_three_factors() {
        let ranker = AttributionRanker::new(Arc::new(LinearSurrogateAttributor::new()));
        let factors = ranker.ranked_factors(&sample_features());
        assert_eq!(factors.len(), 3);
        for factor in &factors {
            let (label, value) = factor.split_once(": ").unwrap();
            assert!(FeatureVector::LABELS.contains(&label));
            // Three decimal places, signed
            let decimals = value.trim_start_matches('-').split('.').nth(1).unwrap();
            assert_eq!(decimals.len(), 3);
        }
    }

    #[test]
    fn test_factors_sorted_by_descending_magnitude() {
        let ranker = AttributionRanker::new(Arc::new(FixedAttributor([0.1, -0.9, 0.4])));
        let factors = ranker.ranked_factors(&sample_features());
        assert!(factors[0].starts_with("Debt Ratio"));
        assert!(factors[1].starts_with("Growth"));
        assert!(factors[2].starts_with("Profit Margin"));
        let impacts: Vec<f64> = factors.iter().map(|f| parse_impact(f).abs()).collect();
        assert!(impacts[0] >= impacts[1] && impacts[1] >= impacts[2]);
    }

    #[test]
    fn test_magnitude_ties_keep_declaration_order() {
        let ranker = AttributionRanker::new(Arc::new(FixedAttributor([0.5, -0.5, 0.25])));
        let factors = ranker.ranked_factors(&sample_features());
        assert!(factors[0].starts_with("Profit Margin"));
        assert!(factors[1].starts_with("Debt Ratio"));
        assert!(factors[2].starts_with("Growth"));
    }

    #[test]
    fn test_surrogate_is_deterministic() {
        let a = LinearSurrogateAttributor::new();
        let b = LinearSurrogateAttributor::new();
        let features = sample_features();
        assert_eq!(a.attribute(&features).unwrap(), b.attribute(&features).unwrap());
    }

    #[test]
    fn test_fallback_emits_raw_features_in_declared_order() {
        let ranker = AttributionRanker::new(Arc::new(FailingAttributor));
        let features = sample_features();
        let factors = ranker.ranked_factors(&features);
        assert_eq!(
            factors,
            vec![
                "Profit Margin: 0.200".to_string(),
                "Debt Ratio: 0.500".to_string(),
                "Growth: 0.100".to_string(),
            ]
        );
    }
}
