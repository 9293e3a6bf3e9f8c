use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{services::seed_service, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(run_seed))
}

#[utoipa::path(
    get,
    path = "/api/seed",
    responses(
        (status = 200, description = "Fixture data loaded"),
        (status = 500, description = "Seeding failed"),
    ),
    tag = "Seed"
)]
pub async fn run_seed(State(state): State<AppState>) -> Response {
    match seed_service::run_seed(&state.pool).await {
        Ok(()) => Json(serde_json::json!({ "message": "Database seeded successfully" }))
            .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "seeding failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": err.to_string() })),
            )
                .into_response()
        }
    }
}
