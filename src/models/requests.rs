use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::Profile;

/// Request to rank mentors for a student
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRequest {
    pub student: Profile,
    #[serde(default)]
    pub mentors: Option<Vec<Profile>>,
}

impl PredictRequest {
    pub fn mentors(&self) -> &[Profile] {
        self.mentors.as_deref().unwrap_or_default()
    }
}

/// Request to submit event feedback
///
/// All fields but `suggestions` are required; they are optional here so a
/// missing one can be reported by name. Ratings are read as any JSON number
/// so `3.5` or `300` fail validation rather than parsing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    #[validate(length(min = 1))]
    pub event_id: Option<String>,
    #[validate(range(min = 1.0, max = 5.0))]
    pub rating: Option<f64>,
    #[validate(range(min = 1.0, max = 5.0))]
    pub event_experience: Option<f64>,
    #[validate(range(min = 1.0, max = 5.0))]
    pub speaker_interaction: Option<f64>,
    #[validate(range(min = 1.0, max = 5.0))]
    pub session_relevance: Option<f64>,
    #[serde(default)]
    pub suggestions: Option<String>,
}

impl FeedbackRequest {
    /// First required field that is absent, by its wire name
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.event_id.is_none() {
            Some("eventId")
        } else if self.rating.is_none() {
            Some("rating")
        } else if self.event_experience.is_none() {
            Some("eventExperience")
        } else if self.speaker_interaction.is_none() {
            Some("speakerInteraction")
        } else if self.session_relevance.is_none() {
            Some("sessionRelevance")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mentors_default_to_empty() {
        let req: PredictRequest = serde_json::from_value(json!({"student": {}})).unwrap();
        assert!(req.mentors().is_empty());

        let req: PredictRequest =
            serde_json::from_value(json!({"student": {}, "mentors": null})).unwrap();
        assert!(req.mentors().is_empty());
    }

    #[test]
    fn test_missing_field_order() {
        let req: FeedbackRequest =
            serde_json::from_value(json!({"eventId": "event1", "rating": 5})).unwrap();
        assert_eq!(req.missing_field(), Some("eventExperience"));
    }

    #[test]
    fn test_rating_range_validated() {
        let req = FeedbackRequest {
            event_id: Some("event1".to_string()),
            rating: Some(6.0),
            event_experience: Some(4.0),
            speaker_interaction: Some(4.0),
            session_relevance: Some(4.0),
            suggestions: None,
        };
        assert_eq!(req.missing_field(), None);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_out_of_range_rating_still_parses() {
        let req: FeedbackRequest = serde_json::from_value(json!({
            "eventId": "event1",
            "rating": 300,
            "eventExperience": 3.5,
            "speakerInteraction": 4,
            "sessionRelevance": 4
        }))
        .unwrap();

        assert_eq!(req.rating, Some(300.0));
        assert_eq!(req.event_experience, Some(3.5));
        assert!(req.validate().is_err());
    }
}
