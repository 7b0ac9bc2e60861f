use actix_web::{web, HttpResponse, Responder};

use crate::models::{ErrorResponse, FeedbackRequest};
use crate::routes::AppState;
use crate::services::FeedbackError;

/// Configure feedback and event routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/feedback", web::post().to(submit_feedback))
        .route("/feedback", web::get().to(list_feedback))
        .route("/events", web::get().to(list_events));
}

/// Submit feedback for an event
///
/// POST /api/feedback
///
/// Request body:
/// ```json
/// {
///   "eventId": "event1",
///   "rating": 5,
///   "eventExperience": 4,
///   "speakerInteraction": 4,
///   "sessionRelevance": 5,
///   "suggestions": "string"
/// }
/// ```
async fn submit_feedback(
    state: web::Data<AppState>,
    req: web::Json<FeedbackRequest>,
) -> impl Responder {
    match state.feedback.submit(req.into_inner()).await {
        Ok(feedback) => {
            tracing::info!("Recorded feedback {} for event {}", feedback.id, feedback.event_id);
            HttpResponse::Created().json(feedback)
        }
        Err(e @ FeedbackError::MissingField(_)) => HttpResponse::BadRequest().json(ErrorResponse {
            error: "Missing required field".to_string(),
            message: e.to_string(),
            status_code: 400,
        }),
        Err(FeedbackError::Validation(errors)) => {
            tracing::info!("Validation failed for feedback request: {:?}", errors);
            HttpResponse::BadRequest().json(ErrorResponse {
                error: "Validation failed".to_string(),
                message: errors.to_string(),
                status_code: 400,
            })
        }
    }
}

/// List all feedback received since startup
///
/// GET /api/feedback
async fn list_feedback(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.feedback.list().await)
}

/// List known events
///
/// GET /api/events
async fn list_events(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.events.list())
}
