use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::ModelSettings;
use crate::core::{ForestModel, InvalidModel, LinearModel, Predictor};

/// Errors that can occur while loading a model file
#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("Model file not found: {0}")]
    NotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid model: {0}")]
    Invalid(#[from] InvalidModel),
}

/// On-disk model formats
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ModelFile {
    /// Bare coefficient list, e.g. `[15, 20, 10, 10, -2, 5, 2]`
    Coefficients(Vec<f64>),
    Tagged(TaggedModel),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum TaggedModel {
    Coefficients { values: Vec<f64> },
    Linear(LinearModel),
    Forest(ForestModel),
}

/// Parse a model document into a predictor
pub fn parse_predictor(json: &str) -> Result<Predictor, ModelLoadError> {
    let predictor = match serde_json::from_str::<ModelFile>(json)? {
        ModelFile::Coefficients(values)
        | ModelFile::Tagged(TaggedModel::Coefficients { values }) => {
            // An empty list leaves nothing to weigh with
            Predictor::coefficients(values)
        }
        ModelFile::Tagged(TaggedModel::Linear(model)) => {
            model.validate()?;
            Predictor::learned(model)
        }
        ModelFile::Tagged(TaggedModel::Forest(model)) => {
            model.validate()?;
            Predictor::learned(model)
        }
    };
    Ok(predictor)
}

/// Read and parse a model file
pub fn load_predictor(path: &Path) -> Result<Predictor, ModelLoadError> {
    let json = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ModelLoadError::NotFound(path.to_path_buf()),
        _ => ModelLoadError::Io(e),
    })?;
    parse_predictor(&json)
}

/// Resolve the process-wide predictor from settings
///
/// Never fails: a missing or broken model is logged once and the service runs
/// on the fallback formula for its whole lifetime.
pub fn predictor_from_settings(settings: &ModelSettings) -> Predictor {
    let Some(path) = &settings.path else {
        tracing::info!("No model configured, using fallback scoring");
        return Predictor::Unavailable;
    };

    match load_predictor(path) {
        Ok(predictor) => {
            tracing::info!("Loaded model from {} ({})", path.display(), predictor.describe());
            predictor
        }
        Err(e) => {
            tracing::error!("Failed to load model from {}: {}", path.display(), e);
            tracing::error!("Falling back to fixed-weight scoring for this process");
            Predictor::Unavailable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_coefficient_list() {
        let predictor = parse_predictor("[15, 20, 10]").unwrap();
        assert!(matches!(predictor, Predictor::Coefficients(ref c) if c == &vec![15.0, 20.0, 10.0]));
    }

    #[test]
    fn test_tagged_coefficients() {
        let predictor = parse_predictor(r#"{"kind": "coefficients", "values": [1.5]}"#).unwrap();
        assert!(matches!(predictor, Predictor::Coefficients(_)));
    }

    #[test]
    fn test_empty_list_means_fallback() {
        let predictor = parse_predictor("[]").unwrap();
        assert!(!predictor.is_available());
    }

    #[test]
    fn test_linear_model() {
        let predictor = parse_predictor(
            r#"{"kind": "linear", "intercept": 0.2, "coefficients": [0.1, 0.1, 0.05, 0.05, -0.01, 0.02, 0.001]}"#,
        )
        .unwrap();
        assert_eq!(predictor.describe(), "learned:linear");
    }

    #[test]
    fn test_invalid_linear_model_rejected() {
        let result = parse_predictor(r#"{"kind": "linear", "coefficients": [0.1]}"#);
        assert!(matches!(result, Err(ModelLoadError::Invalid(_))));
    }

    #[test]
    fn test_forest_model() {
        let predictor = parse_predictor(
            r#"{"kind": "forest", "trees": [{"nodes": [
                {"feature": 0, "threshold": 1.5, "left": 1, "right": 2},
                {"value": 0.3},
                {"value": 0.9}
            ]}]}"#,
        )
        .unwrap();
        assert_eq!(predictor.describe(), "learned:forest");
    }

    #[test]
    fn test_unknown_shape_is_parse_error() {
        assert!(matches!(
            parse_predictor(r#"{"kind": "neural"}"#),
            Err(ModelLoadError::Parse(_))
        ));
        assert!(matches!(parse_predictor("not json"), Err(ModelLoadError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = load_predictor(Path::new("/nonexistent/model.json"));
        assert!(matches!(result, Err(ModelLoadError::NotFound(_))));
    }

    #[test]
    fn test_settings_without_path() {
        let predictor = predictor_from_settings(&ModelSettings::default());
        assert!(!predictor.is_available());
    }
}
