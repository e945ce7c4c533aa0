use actix_web::{get, web, HttpResponse};

use crate::{
    app_state::AppState, errors::AppError, models::dto::request::AnalyticsQuery,
};

/// Admin dashboard statistics, recomputed from the full attempt set on every
/// request. `active_courses_only=true` narrows the denominator before any
/// rate is derived.
#[get("/api/admin/analytics")]
async fn get_analytics(
    state: web::Data<AppState>,
    query: web::Query<AnalyticsQuery>,
) -> Result<HttpResponse, AppError> {
    let snapshot = state
        .analytics_service
        .dashboard(query.active_courses_only)
        .await?;
    Ok(HttpResponse::Ok().json(snapshot))
}
