// Core algorithm exports
pub mod features;
pub mod learned;
pub mod predictor;
pub mod ranker;
pub mod scoring;

pub use features::{extract_features, FeatureVector, FEATURE_COUNT};
pub use learned::{ForestModel, InvalidModel, LinearModel, RegressionTree, Scaler, TreeNode};
pub use predictor::{Predict, PredictError, Predictor};
pub use ranker::{RankedResult, Ranker, RankingStats};
pub use scoring::{evaluate, fallback_score, score, ScoreOutcome, Scorer, ScoringMode};
