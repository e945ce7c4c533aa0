use actix_web::{get, put, web, HttpResponse};
use serde_json::json;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::SaveQuizRequest,
};

#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

#[get("/api/quizzes/{id}")]
async fn get_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_quiz(&id).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

/// Replaces the stored quiz wholesale. Draft saves are allowed to be
/// structurally invalid; validity is only enforced when a learner opens the
/// quiz.
#[put("/api/quizzes/{id}")]
async fn save_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<SaveQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let quiz = state
        .quiz_service
        .save_quiz(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[derive(Debug, serde::Deserialize)]
pub struct CourseQuizzesQuery {
    #[serde(default)]
    pub offset: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    20
}

#[get("/api/courses/{course_id}/quizzes")]
async fn list_course_quizzes(
    state: web::Data<AppState>,
    course_id: web::Path<String>,
    query: web::Query<CourseQuizzesQuery>,
) -> Result<HttpResponse, AppError> {
    let (quizzes, total) = state
        .quiz_service
        .list_by_course(&course_id, query.offset, query.limit)
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "quizzes": quizzes, "total": total })))
}
