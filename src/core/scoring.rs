use crate::core::features::{index, FeatureVector};
use crate::core::predictor::Predictor;

/// Fallback weights, in feature order
pub const FALLBACK_WEIGHTS: [f64; 7] = [15.0, 20.0, 10.0, 10.0, -2.0, 5.0, 2.0];

/// Experience gaps at or above this many years earn nothing in the fallback
pub const EXPERIENCE_HORIZON: f64 = 10.0;

/// Weight used for any feature without a coefficient
pub const DEFAULT_COEFFICIENT: f64 = 1.0;

/// Learned models predict in [0, 1]; scores live in [0, 100]
pub const LEARNED_SCALE: f64 = 100.0;

pub const MAX_SCORE: u8 = 100;

/// Which strategy produced a score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringMode {
    Learned,
    Coefficients,
    /// No predictor loaded
    Fallback,
    /// Predictor loaded but failed on this input
    Degraded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreOutcome {
    pub score: u8,
    pub mode: ScoringMode,
}

/// Converts feature vectors into match scores in [0, 100]
///
/// The predictor is fixed at construction and only ever read, so one scorer
/// can be shared by every worker.
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    predictor: Predictor,
}

impl Scorer {
    pub fn new(predictor: Predictor) -> Self {
        Self { predictor }
    }

    /// Scorer that always uses the fallback formula
    pub fn fallback() -> Self {
        Self::new(Predictor::Unavailable)
    }

    pub fn predictor(&self) -> &Predictor {
        &self.predictor
    }

    /// Score one feature vector, see [`evaluate`]
    pub fn score(&self, features: &FeatureVector) -> ScoreOutcome {
        evaluate(features, &self.predictor)
    }
}

/// Score a feature vector with the given predictor
pub fn score(features: &FeatureVector, predictor: &Predictor) -> u8 {
    evaluate(features, predictor).score
}

/// Score a feature vector and report which strategy produced the score
///
/// A predictor that fails or yields a non-finite value does not fail the
/// call: the fallback formula is used instead and the outcome is marked
/// [`ScoringMode::Degraded`].
pub fn evaluate(features: &FeatureVector, predictor: &Predictor) -> ScoreOutcome {
    let attempt = match predictor {
        Predictor::Learned(model) => match model.predict(features) {
            Ok(value) => learned_score(value).map(|s| (s, ScoringMode::Learned)),
            Err(e) => {
                tracing::debug!(model = model.kind(), error = %e, "Prediction failed");
                None
            }
        },
        Predictor::Coefficients(coefficients) => {
            coefficient_score(features.as_slice(), coefficients)
                .map(|s| (s, ScoringMode::Coefficients))
        }
        Predictor::Unavailable => {
            return ScoreOutcome {
                score: fallback_score(features.as_slice()),
                mode: ScoringMode::Fallback,
            };
        }
    };

    match attempt {
        Some((score, mode)) => ScoreOutcome { score, mode },
        None => ScoreOutcome {
            score: fallback_score(features.as_slice()),
            mode: ScoringMode::Degraded,
        },
    }
}

/// Fixed-weight fallback formula
///
/// The experience gap (index 4) is first turned into `max(0, 10 - gap)` so
/// that closer experience scores higher. Only the prefix shared by the
/// features and [`FALLBACK_WEIGHTS`] is summed.
pub fn fallback_score(features: &[f64]) -> u8 {
    let raw: f64 = features
        .iter()
        .zip(FALLBACK_WEIGHTS.iter())
        .enumerate()
        .map(|(i, (&f, &w))| {
            let f = if i == index::EXPERIENCE_DIFF {
                (EXPERIENCE_HORIZON - f).max(0.0)
            } else {
                f
            };
            f * w
        })
        .sum();

    to_score(raw)
}

/// Dot product with a coefficient list, padded with 1.0 or truncated to the
/// feature count. `None` when the result is not finite.
pub fn coefficient_score(features: &[f64], coefficients: &[f64]) -> Option<u8> {
    let raw: f64 = features
        .iter()
        .enumerate()
        .map(|(i, f)| f * coefficients.get(i).copied().unwrap_or(DEFAULT_COEFFICIENT))
        .sum();

    clamp_score(raw)
}

/// Map a learned model output onto [0, 100]. `None` when not finite.
pub fn learned_score(value: f64) -> Option<u8> {
    clamp_score(value * LEARNED_SCALE)
}

/// Like [`to_score`], but rejects NaN and infinities
#[inline]
fn clamp_score(raw: f64) -> Option<u8> {
    raw.is_finite().then(|| to_score(raw))
}

/// Clamp to [0, 100] and truncate toward zero; NaN maps to 0
#[inline]
fn to_score(raw: f64) -> u8 {
    raw.clamp(0.0, MAX_SCORE as f64) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::predictor::{Predict, PredictError};

    #[derive(Debug)]
    struct Fixed(Result<f64, ()>);

    impl Predict for Fixed {
        fn predict(&self, _features: &FeatureVector) -> Result<f64, PredictError> {
            self.0.map_err(|_| PredictError::NonFinite(f64::NAN))
        }

        fn kind(&self) -> &'static str {
            "fixed"
        }
    }

    #[test]
    fn test_fallback_high_match_clamps() {
        // 30 + 20 + 30 + 10 - 16 + 24 + 24 = 122
        let features = [2.0, 1.0, 3.0, 1.0, 2.0, 4.8, 12.0];
        assert_eq!(fallback_score(&features), 100);
    }

    #[test]
    fn test_fallback_low_match_truncates() {
        // 0 + 0 + 0 + 0 + 0 + 17.5 + 2 = 19.5
        let features = [0.0, 0.0, 0.0, 0.0, 10.0, 3.5, 1.0];
        assert_eq!(fallback_score(&features), 19);
    }

    #[test]
    fn test_fallback_experience_gap_beyond_horizon() {
        let features = [1.0, 0.0, 0.0, 0.0, 25.0, 0.0, 0.0];
        assert_eq!(fallback_score(&features), 15);
    }

    #[test]
    fn test_fallback_short_vector_uses_prefix() {
        assert_eq!(fallback_score(&[2.0, 1.0]), 50);
        assert_eq!(fallback_score(&[]), 0);
    }

    #[test]
    fn test_coefficient_padding() {
        let features = [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0];
        // 3 * 10 + 4 * 1.0 padding
        assert_eq!(coefficient_score(&features, &[10.0, 10.0, 10.0]), Some(34));
    }

    #[test]
    fn test_coefficient_truncation() {
        let features = [1.0, 2.0];
        assert_eq!(coefficient_score(&features, &[3.0, 4.0, 1000.0]), Some(11));
    }

    #[test]
    fn test_coefficient_clamps_and_truncates() {
        assert_eq!(coefficient_score(&[1.0], &[-5.0]), Some(0));
        assert_eq!(coefficient_score(&[1.0], &[250.0]), Some(100));
        assert_eq!(coefficient_score(&[1.0], &[42.9]), Some(42));
        assert_eq!(coefficient_score(&[f64::INFINITY], &[0.0]), None);
    }

    #[test]
    fn test_learned_scaling() {
        assert_eq!(learned_score(0.755), Some(75));
        assert_eq!(learned_score(1.4), Some(100));
        assert_eq!(learned_score(-0.2), Some(0));
        assert_eq!(learned_score(f64::NAN), None);
    }

    #[test]
    fn test_scorer_modes() {
        let features = FeatureVector::new([0.0, 0.0, 0.0, 0.0, 10.0, 3.5, 1.0]);

        let outcome = Scorer::fallback().score(&features);
        assert_eq!(outcome, ScoreOutcome { score: 19, mode: ScoringMode::Fallback });

        let outcome = Scorer::new(Predictor::learned(Fixed(Ok(0.62)))).score(&features);
        assert_eq!(outcome, ScoreOutcome { score: 62, mode: ScoringMode::Learned });

        let outcome = Scorer::new(Predictor::coefficients(vec![2.0; 7])).score(&features);
        assert_eq!(outcome, ScoreOutcome { score: 29, mode: ScoringMode::Coefficients });
    }

    #[test]
    fn test_failing_predictor_degrades_to_fallback() {
        let features = FeatureVector::new([0.0, 0.0, 0.0, 0.0, 10.0, 3.5, 1.0]);
        let scorer = Scorer::new(Predictor::learned(Fixed(Err(()))));

        let outcome = scorer.score(&features);
        assert_eq!(outcome, ScoreOutcome { score: 19, mode: ScoringMode::Degraded });
    }

    #[test]
    fn test_score_function_matches_scorer() {
        let features = FeatureVector::new([2.0, 1.0, 3.0, 1.0, 2.0, 4.8, 12.0]);
        assert_eq!(score(&features, &Predictor::Unavailable), 100);
        // 0.5 * 2 + 1 + 3 + 1 + 2 + 4.8 + 12 = 24.8
        assert_eq!(score(&features, &Predictor::coefficients(vec![0.5])), 24);
    }
}
