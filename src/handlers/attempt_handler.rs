use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::{ListAttemptsQuery, SubmitAttemptRequest},
    models::dto::response::AttemptPage,
};

/// The authoritative submission endpoint. Client-side gate checks are
/// advisory; a submission that loses a race on the last remaining attempt is
/// rejected here with 409.
#[post("/api/quizzes/{id}/attempts")]
async fn submit_attempt(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<SubmitAttemptRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let attempt = state
        .attempt_service
        .submit_attempt(&id, &request.user_id, &request.answers)
        .await?;

    Ok(HttpResponse::Created().json(attempt))
}

#[get("/api/quizzes/{id}/attempts")]
async fn list_attempts(
    state: web::Data<AppState>,
    id: web::Path<String>,
    query: web::Query<ListAttemptsQuery>,
) -> Result<HttpResponse, AppError> {
    let (attempts, total) = state
        .attempt_service
        .list_attempts(&id, &query.user_id, query.offset, query.limit)
        .await?;

    let remaining_attempts = state
        .attempt_service
        .remaining_attempts(&id, &query.user_id)
        .await?;

    Ok(HttpResponse::Ok().json(AttemptPage {
        attempts,
        total,
        remaining_attempts,
    }))
}
