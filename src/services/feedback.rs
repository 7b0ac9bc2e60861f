use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::{Feedback, FeedbackRequest};
use crate::services::events::EventCatalog;

/// Errors that can occur when submitting feedback
#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Process-local feedback store
///
/// Records live only as long as the process; nothing is written to disk.
#[derive(Debug)]
pub struct FeedbackStore {
    records: RwLock<Vec<Feedback>>,
    events: Arc<EventCatalog>,
}

impl FeedbackStore {
    pub fn new(events: Arc<EventCatalog>) -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            events,
        }
    }

    /// Validate a request and store it as a new feedback record
    pub async fn submit(&self, request: FeedbackRequest) -> Result<Feedback, FeedbackError> {
        if let Some(field) = request.missing_field() {
            return Err(FeedbackError::MissingField(field));
        }
        request.validate()?;

        let FeedbackRequest {
            event_id: Some(event_id),
            rating: Some(rating),
            event_experience: Some(event_experience),
            speaker_interaction: Some(speaker_interaction),
            session_relevance: Some(session_relevance),
            suggestions,
        } = request
        else {
            // missing_field() covers every required field
            return Err(FeedbackError::MissingField("eventId"));
        };

        let mut errors = ValidationErrors::new();
        let rating = whole_rating(&mut errors, "rating", rating);
        let event_experience = whole_rating(&mut errors, "event_experience", event_experience);
        let speaker_interaction = whole_rating(&mut errors, "speaker_interaction", speaker_interaction);
        let session_relevance = whole_rating(&mut errors, "session_relevance", session_relevance);
        if !errors.is_empty() {
            return Err(errors.into());
        }

        let feedback = Feedback {
            id: uuid::Uuid::new_v4().to_string(),
            event_name: self.events.name_of(&event_id).to_string(),
            event_id,
            rating,
            event_experience,
            speaker_interaction,
            session_relevance,
            suggestions: suggestions.unwrap_or_default(),
            created_at: chrono::Utc::now(),
        };

        self.records.write().await.push(feedback.clone());
        tracing::debug!("Stored feedback {} for event {}", feedback.id, feedback.event_id);

        Ok(feedback)
    }

    /// All feedback in submission order
    pub async fn list(&self) -> Vec<Feedback> {
        self.records.read().await.clone()
    }
}

/// Ratings are whole numbers; the 1-5 range is already checked by `validate`
fn whole_rating(errors: &mut ValidationErrors, field: &'static str, value: f64) -> u8 {
    if value.fract() != 0.0 {
        errors.add(field, ValidationError::new("integer"));
    }
    value as u8
}
