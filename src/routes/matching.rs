use actix_web::{web, HttpResponse, Responder};

use crate::models::{HealthResponse, PredictRequest, PredictResponse};
use crate::routes::AppState;

/// Configure health and ranking routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/predict", web::post().to(predict));
}

/// Health check endpoint
///
/// Reports `degraded` while the service runs without a usable model.
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let predictor = state.ranker.scorer().predictor();
    let status = if predictor.is_available() { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        scoring_mode: predictor.describe(),
    })
}

/// Rank mentors for a student
///
/// POST /api/predict
///
/// Request body:
/// ```json
/// {
///   "student": { "skills": [{"id": 1, "name": "React"}], "industry": {"id": 1}, ... },
///   "mentors": [ { ... }, { ... } ]
/// }
/// ```
///
/// Responds with `{"mentors": [...]}`, each mentor echoed with an integer
/// `matchScore`, best match first.
async fn predict(
    state: web::Data<AppState>,
    req: web::Json<PredictRequest>,
) -> impl Responder {
    let mentors = req.mentors();

    tracing::debug!("Ranking {} mentors", mentors.len());

    let result = state.ranker.rank(&req.student, mentors);

    if result.stats.degraded > 0 {
        tracing::warn!(
            "Predictor failed for {} of {} mentors, scored with fallback formula",
            result.stats.degraded,
            result.stats.total()
        );
    }

    tracing::info!(
        "Ranked {} mentors (learned: {}, coefficients: {}, fallback: {})",
        result.mentors.len(),
        result.stats.learned,
        result.stats.coefficients,
        result.stats.fallback + result.stats.degraded
    );

    HttpResponse::Ok().json(PredictResponse {
        mentors: result.mentors,
    })
}
