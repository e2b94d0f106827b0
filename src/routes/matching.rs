use actix_web::{web, HttpResponse};
use crate::error::AppError;
use crate::models::{AdopterResponse, HealthResponse, SubmitAssessmentRequest};
use crate::services::MatchService;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub service: MatchService,
}

/// Configure adopter and matching routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/adopters/submit-assessment", web::post().to(submit_assessment))
        .route("/adopters/{id}", web::get().to(get_adopter))
        // the adoption frontend POSTs here
        .service(
            web::resource("/adopters/{id}/match-pets")
                .route(web::get().to(match_pets))
                .route(web::post().to(match_pets)),
        );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let status = if state.service.health().await { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Submit an assessment
///
/// POST /api/matching/adopters/submit-assessment
///
/// Request body:
/// ```json
/// {
///   "name": "string",
///   "contact_info": "string",
///   "email": "string",
///   "answer_activity_level": 1-5,
///   "answer_space_requirement": "Small|Medium|Large",
///   ...
/// }
/// ```
///
/// Every submission creates a new profile.
async fn submit_assessment(
    state: web::Data<AppState>,
    req: web::Json<SubmitAssessmentRequest>,
) -> Result<HttpResponse, AppError> {
    let adopter = state.service.submit_assessment(req.into_inner()).await?;

    Ok(HttpResponse::Created().json(AdopterResponse { adopter }))
}

/// GET /api/matching/adopters/{id}
async fn get_adopter(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let adopter = state.service.get_adopter(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(AdopterResponse { adopter }))
}

/// Rank the pet population for an adopter
///
/// GET|POST /api/matching/adopters/{id}/match-pets
///
/// Response:
/// ```json
/// {
///   "adopter_name": "string",
///   "top_matches": [{"pet_id": 1, "name": "...", "breed": "...", "type": "...", "image": null, "match": 92}],
///   "other_matches": []
/// }
/// ```
async fn match_pets(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let adopter_id = path.into_inner();
    tracing::info!("Finding pet matches for adopter {}", adopter_id);

    let result = state.service.match_pets(adopter_id).await?;

    Ok(HttpResponse::Ok().json(result))
}
