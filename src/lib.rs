//! Mentor Match - student-mentor compatibility scoring service
//!
//! The core turns a (student, mentor) pair into a seven-feature vector,
//! scores it with a learned model, a coefficient list or a fixed fallback
//! formula, and ranks candidate mentors by that score.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{extract_features, FeatureVector, Predictor, RankedResult, Ranker, Scorer};
pub use models::{Profile, ScoredMentor, PredictRequest, PredictResponse};
