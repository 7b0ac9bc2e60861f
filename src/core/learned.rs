//! Learned model families that can back a [`Predictor::Learned`].
//!
//! Both are plain data deserialized from a model file and checked once with
//! `validate` before they are put in service. Prediction still rejects a
//! malformed model with a [`PredictError`] instead of panicking, since
//! models can also be built directly in code.
//!
//! [`Predictor::Learned`]: crate::core::Predictor::Learned

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::features::{FeatureVector, FEATURE_COUNT};
use crate::core::predictor::{Predict, PredictError};

/// Structural problems found when a model is validated at load time
#[derive(Debug, Error, PartialEq)]
pub enum InvalidModel {
    #[error("Expected {expected} {what}, found {found}")]
    WrongLength {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Scaler entry {0} has zero or non-finite scale")]
    DegenerateScale(usize),

    #[error("Non-finite parameter in {0}")]
    NonFinite(&'static str),

    #[error("Forest has no trees")]
    EmptyForest,

    #[error("Tree {0} has no nodes")]
    EmptyTree(usize),

    #[error("Tree {tree} node {node} references feature {feature}")]
    FeatureOutOfRange { tree: usize, node: usize, feature: usize },

    #[error("Tree {tree} node {node} references missing child {child}")]
    ChildOutOfRange { tree: usize, node: usize, child: usize },
}

/// Per-feature standardization: `(x - mean) / scale`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl Scaler {
    pub fn validate(&self) -> Result<(), InvalidModel> {
        check_len("scaler means", &self.mean)?;
        check_len("scaler scales", &self.scale)?;
        if self.mean.iter().any(|m| !m.is_finite()) {
            return Err(InvalidModel::NonFinite("scaler means"));
        }
        if let Some(i) = self
            .scale
            .iter()
            .position(|s| !s.is_finite() || *s == 0.0)
        {
            return Err(InvalidModel::DegenerateScale(i));
        }
        Ok(())
    }

    pub fn transform(&self, features: &FeatureVector) -> Result<[f64; FEATURE_COUNT], PredictError> {
        check_shape("scaler means", &self.mean)?;
        check_shape("scaler scales", &self.scale)?;

        let mut out = features.values();
        for ((x, mean), scale) in out.iter_mut().zip(&self.mean).zip(&self.scale) {
            *x = (*x - mean) / scale;
        }
        Ok(out)
    }
}

/// Linear regression: `intercept + coefficients · x`, optionally on
/// standardized features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    #[serde(default)]
    pub intercept: f64,
    pub coefficients: Vec<f64>,
    #[serde(default)]
    pub scaler: Option<Scaler>,
}

impl LinearModel {
    pub fn validate(&self) -> Result<(), InvalidModel> {
        check_len("linear coefficients", &self.coefficients)?;
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(InvalidModel::NonFinite("linear model"));
        }
        if let Some(scaler) = &self.scaler {
            scaler.validate()?;
        }
        Ok(())
    }
}

impl Predict for LinearModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictError> {
        check_shape("linear coefficients", &self.coefficients)?;
        let x = match &self.scaler {
            Some(scaler) => scaler.transform(features)?,
            None => features.values(),
        };
        let value = self.intercept
            + self
                .coefficients
                .iter()
                .zip(x.iter())
                .map(|(c, x)| c * x)
                .sum::<f64>();
        finite(value)
    }

    fn kind(&self) -> &'static str {
        "linear"
    }
}

/// Node of a regression tree, stored in a flat array with node 0 as root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Go to `left` when `x[feature] <= threshold`, else to `right`
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf { value: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    fn validate(&self, tree: usize) -> Result<(), InvalidModel> {
        if self.nodes.is_empty() {
            return Err(InvalidModel::EmptyTree(tree));
        }
        for (node, entry) in self.nodes.iter().enumerate() {
            match *entry {
                TreeNode::Split { feature, threshold, left, right } => {
                    if feature >= FEATURE_COUNT {
                        return Err(InvalidModel::FeatureOutOfRange { tree, node, feature });
                    }
                    if threshold.is_nan() {
                        return Err(InvalidModel::NonFinite("tree threshold"));
                    }
                    for child in [left, right] {
                        if child >= self.nodes.len() {
                            return Err(InvalidModel::ChildOutOfRange { tree, node, child });
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(InvalidModel::NonFinite("tree leaf"));
                    }
                }
            }
        }
        Ok(())
    }

    /// Walk from the root to a leaf. A walk longer than the node count
    /// means the tree loops.
    fn evaluate(&self, tree: usize, features: &FeatureVector) -> Result<f64, PredictError> {
        let mut current = 0;
        for _ in 0..self.nodes.len() {
            let node = self
                .nodes
                .get(current)
                .ok_or(PredictError::MissingNode { tree, node: current })?;
            match *node {
                TreeNode::Leaf { value } => return Ok(value),
                TreeNode::Split { feature, threshold, left, right } => {
                    let x = features
                        .as_slice()
                        .get(feature)
                        .ok_or(PredictError::FeatureOutOfRange(feature))?;
                    current = if *x <= threshold { left } else { right };
                }
            }
        }
        Err(PredictError::UnterminatedTree {
            tree,
            steps: self.nodes.len(),
        })
    }
}

/// Random-forest style regressor: the mean of its trees' outputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestModel {
    pub trees: Vec<RegressionTree>,
}

impl ForestModel {
    pub fn validate(&self) -> Result<(), InvalidModel> {
        if self.trees.is_empty() {
            return Err(InvalidModel::EmptyForest);
        }
        self.trees
            .iter()
            .enumerate()
            .try_for_each(|(i, tree)| tree.validate(i))
    }
}

impl Predict for ForestModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictError> {
        let mut total = 0.0;
        for (i, tree) in self.trees.iter().enumerate() {
            total += tree.evaluate(i, features)?;
        }
        finite(total / self.trees.len() as f64)
    }

    fn kind(&self) -> &'static str {
        "forest"
    }
}

fn check_len(what: &'static str, values: &[f64]) -> Result<(), InvalidModel> {
    if values.len() != FEATURE_COUNT {
        return Err(InvalidModel::WrongLength {
            what,
            expected: FEATURE_COUNT,
            found: values.len(),
        });
    }
    Ok(())
}

/// Same length rule as `check_len`, enforced again at prediction time for
/// models that never went through `validate`
fn check_shape(what: &'static str, values: &[f64]) -> Result<(), PredictError> {
    if values.len() != FEATURE_COUNT {
        return Err(PredictError::ShapeMismatch {
            what,
            expected: FEATURE_COUNT,
            found: values.len(),
        });
    }
    Ok(())
}

fn finite(value: f64) -> Result<f64, PredictError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PredictError::NonFinite(value))
    }
}
