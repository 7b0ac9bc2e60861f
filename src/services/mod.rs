// Service exports
pub mod events;
pub mod feedback;
pub mod model_loader;

pub use events::EventCatalog;
pub use feedback::{FeedbackError, FeedbackStore};
pub use model_loader::{load_predictor, parse_predictor, predictor_from_settings, ModelLoadError};
