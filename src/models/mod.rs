// Model exports
pub mod domain;
mod lenient;
pub mod requests;
pub mod responses;

pub use domain::{Profile, Skill, NamedSkill, Industry, IndustryId, ScoredMentor, Feedback, EventInfo};
pub use requests::{PredictRequest, FeedbackRequest};
pub use responses::{PredictResponse, HealthResponse, ErrorResponse};
