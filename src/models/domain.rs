use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient;

/// Student or mentor profile
///
/// The record is kept exactly as the client sent it (name, email, bio,
/// company, ...) so a ranked mentor is echoed back unchanged. The fields that
/// feed the scoring engine are read from it once, leniently, into a typed
/// view; a field with the wrong JSON type is treated as absent there but
/// stays untouched in the record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Profile {
    fields: ScoringFields,
    record: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct ScoringFields {
    #[serde(default, deserialize_with = "lenient::skills")]
    skills: Option<Vec<Skill>>,
    #[serde(default, deserialize_with = "lenient::industry")]
    industry: Option<Industry>,
    #[serde(default, deserialize_with = "lenient::strings")]
    interests: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::text")]
    location: Option<String>,
    #[serde(rename = "experienceYears", default, deserialize_with = "lenient::number")]
    experience_years: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    rating: Option<f64>,
    #[serde(rename = "totalMentees", default, deserialize_with = "lenient::count")]
    total_mentees: Option<u32>,
}

impl From<Map<String, Value>> for Profile {
    fn from(record: Map<String, Value>) -> Self {
        // Scoring fields are optional and lenient; reading them from an object cannot fail
        let fields = ScoringFields::deserialize(&Value::Object(record.clone())).unwrap_or_default();
        Self { fields, record }
    }
}

impl From<Profile> for Map<String, Value> {
    fn from(profile: Profile) -> Self {
        profile.record
    }
}

impl Profile {
    /// The record as received
    pub fn record(&self) -> &Map<String, Value> {
        &self.record
    }

    pub fn into_record(self) -> Map<String, Value> {
        self.record
    }

    /// Skill names as sent, in input order
    pub fn skill_names(&self) -> impl Iterator<Item = &str> {
        self.fields.skills.iter().flatten().map(Skill::name)
    }

    pub fn interests(&self) -> impl Iterator<Item = &str> {
        self.fields.interests.iter().flatten().map(String::as_str)
    }

    /// Industry identifier, if the profile carries one
    pub fn industry_id(&self) -> Option<&IndustryId> {
        self.fields.industry.as_ref().and_then(|industry| industry.id.as_ref())
    }

    pub fn location(&self) -> Option<&str> {
        self.fields.location.as_deref()
    }

    /// Years of experience, defaulting to 0
    pub fn experience(&self) -> f64 {
        self.fields.experience_years.unwrap_or(0.0)
    }

    /// Mentor rating, defaulting to 0
    pub fn rating_or_default(&self) -> f64 {
        self.fields.rating.unwrap_or(0.0)
    }

    /// Mentor's total mentee count, defaulting to 0
    pub fn mentees_or_default(&self) -> u32 {
        self.fields.total_mentees.unwrap_or(0)
    }
}

/// Skill entry, either `{ "id": 1, "name": "React" }` or a bare name
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Skill {
    Named(NamedSkill),
    Plain(String),
}

impl Skill {
    pub fn name(&self) -> &str {
        match self {
            Skill::Named(skill) => &skill.name,
            Skill::Plain(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NamedSkill {
    pub name: String,
}

/// Industry reference; only the identifier takes part in matching
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Industry {
    #[serde(default, deserialize_with = "lenient::industry_id")]
    pub id: Option<IndustryId>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
}

/// Industry identifier, numeric or textual
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum IndustryId {
    Number(i64),
    Text(String),
}

/// Mentor record with its compatibility score attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMentor {
    #[serde(flatten)]
    pub mentor: Map<String, Value>,
    #[serde(rename = "matchScore")]
    pub match_score: u8,
}

/// Event feedback as stored and returned by the feedback endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: String,
    pub event_id: String,
    pub event_name: String,
    pub rating: u8,
    pub event_experience: u8,
    pub speaker_interaction: u8,
    pub session_relevance: u8,
    pub suggestions: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Entry of the event catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInfo {
    pub id: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_from_frontend_shape() {
        let profile: Profile = serde_json::from_value(json!({
            "id": 103,
            "name": "Raj Patel",
            "skills": [{"id": 7, "name": "Java"}, {"id": 8, "name": "Spring Boot"}],
            "interests": ["Backend Development", "System Design"],
            "location": "Bangalore",
            "industry": {"id": 1, "name": "Technology"},
            "experienceYears": 12,
            "rating": 4.7,
            "totalMentees": 20
        }))
        .unwrap();

        assert_eq!(profile.skill_names().collect::<Vec<_>>(), vec!["Java", "Spring Boot"]);
        assert_eq!(profile.industry_id(), Some(&IndustryId::Number(1)));
        assert_eq!(profile.location(), Some("Bangalore"));
        assert_eq!(profile.experience(), 12.0);
        assert_eq!(profile.rating_or_default(), 4.7);
        assert_eq!(profile.mentees_or_default(), 20);
        assert_eq!(profile.record().get("name"), Some(&json!("Raj Patel")));
    }

    #[test]
    fn test_malformed_fields_fall_back_to_defaults() {
        let profile: Profile = serde_json::from_value(json!({
            "skills": null,
            "interests": "not a list",
            "industry": "Technology",
            "rating": "n/a",
            "totalMentees": -3
        }))
        .unwrap();

        assert_eq!(profile.skill_names().count(), 0);
        assert_eq!(profile.interests().count(), 0);
        assert!(profile.industry_id().is_none());
        assert_eq!(profile.rating_or_default(), 0.0);
        assert_eq!(profile.mentees_or_default(), 0);
    }

    #[test]
    fn test_bare_string_skill() {
        let profile: Profile = serde_json::from_value(json!({
            "skills": ["Rust", {"name": "Go"}, 42]
        }))
        .unwrap();

        assert_eq!(profile.skill_names().collect::<Vec<_>>(), vec!["Rust", "Go"]);
    }

    #[test]
    fn test_scored_mentor_echoes_record() {
        let input = json!({
            "id": 7,
            "name": "Ana",
            "skills": [{"id": 1, "name": "Python", "level": "expert"}],
            "industry": {"id": "fin", "name": "Finance"},
            "rating": 4.5
        });
        let mentor: Profile = serde_json::from_value(input.clone()).unwrap();
        let scored = ScoredMentor { mentor: mentor.into_record(), match_score: 42 };

        let mut expected = input;
        expected["matchScore"] = json!(42);
        assert_eq!(serde_json::to_value(&scored).unwrap(), expected);
    }

    #[test]
    fn test_malformed_fields_echo_unchanged() {
        let input = json!({
            "id": 1,
            "experienceYears": 12,
            "industry": "Technology",
            "interests": ["A", 3],
            "rating": "n/a",
            "skills": ["X", 42],
            "totalMentees": -3
        });
        let profile: Profile = serde_json::from_value(input.clone()).unwrap();

        assert_eq!(profile.skill_names().collect::<Vec<_>>(), vec!["X"]);
        assert_eq!(profile.interests().collect::<Vec<_>>(), vec!["A"]);
        assert_eq!(profile.experience(), 12.0);
        assert_eq!(serde_json::to_value(&profile).unwrap(), input);
    }

    #[test]
    fn test_non_object_profile_rejected() {
        assert!(serde_json::from_value::<Profile>(json!("mentor")).is_err());
        assert!(serde_json::from_value::<Profile>(json!([1, 2])).is_err());
    }
}
