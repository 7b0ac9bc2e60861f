use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::core::features::FeatureVector;

/// Errors raised while applying a learned model to one feature vector
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("Prediction is not a finite number: {0}")]
    NonFinite(f64),

    #[error("Tree {tree} did not reach a leaf after {steps} steps")]
    UnterminatedTree { tree: usize, steps: usize },

    #[error("Tree {tree} references missing node {node}")]
    MissingNode { tree: usize, node: usize },

    #[error("Model references feature {0}")]
    FeatureOutOfRange(usize),

    #[error("Expected {expected} {what}, found {found}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
}

/// A learned model mapping a feature vector to a continuous value,
/// nominally in [0, 1]
pub trait Predict: fmt::Debug + Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictError>;

    /// Short model family name for logs and health output
    fn kind(&self) -> &'static str;
}

/// Scoring strategy chosen once, when the model is loaded
#[derive(Debug, Clone, Default)]
pub enum Predictor {
    /// Callable model; its output is scaled by 100
    Learned(Arc<dyn Predict>),
    /// Fixed weights applied as a dot product with the feature vector
    Coefficients(Vec<f64>),
    /// No usable model; every score comes from the fallback formula
    #[default]
    Unavailable,
}

impl Predictor {
    pub fn learned<P: Predict + 'static>(model: P) -> Self {
        Predictor::Learned(Arc::new(model))
    }

    /// Coefficient predictor; an empty list carries no weights and is unusable
    pub fn coefficients(values: Vec<f64>) -> Self {
        if values.is_empty() {
            Predictor::Unavailable
        } else {
            Predictor::Coefficients(values)
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, Predictor::Unavailable)
    }

    /// Human readable mode, e.g. `learned:forest`, `coefficients`, `fallback`
    pub fn describe(&self) -> String {
        match self {
            Predictor::Learned(model) => format!("learned:{}", model.kind()),
            Predictor::Coefficients(_) => "coefficients".to_string(),
            Predictor::Unavailable => "fallback".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Constant(f64);

    impl Predict for Constant {
        fn predict(&self, _features: &FeatureVector) -> Result<f64, PredictError> {
            Ok(self.0)
        }

        fn kind(&self) -> &'static str {
            "constant"
        }
    }

    #[test]
    fn test_empty_coefficients_are_unavailable() {
        assert!(!Predictor::coefficients(vec![]).is_available());
        assert!(Predictor::coefficients(vec![1.0]).is_available());
    }

    #[test]
    fn test_describe() {
        assert_eq!(Predictor::learned(Constant(0.5)).describe(), "learned:constant");
        assert_eq!(Predictor::coefficients(vec![2.0]).describe(), "coefficients");
        assert_eq!(Predictor::default().describe(), "fallback");
    }
}
