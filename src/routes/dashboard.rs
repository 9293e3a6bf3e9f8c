use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{CardData, LatestInvoice, Revenue},
    response::ApiResponse,
    services::dashboard_service,
    state::AppState,
};

#[derive(Serialize, ToSchema)]
pub struct RevenueList {
    pub items: Vec<Revenue>,
}

#[derive(Serialize, ToSchema)]
pub struct LatestInvoiceList {
    pub items: Vec<LatestInvoice>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/revenue", get(revenue))
        .route("/latest-invoices", get(latest_invoices))
        .route("/cards", get(cards))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/revenue",
    responses(
        (status = 200, description = "Monthly revenue for the chart", body = ApiResponse<RevenueList>),
        (status = 500, description = "Revenue could not be loaded"),
    ),
    tag = "Dashboard"
)]
pub async fn revenue(State(state): State<AppState>) -> AppResult<Json<ApiResponse<RevenueList>>> {
    let items = dashboard_service::fetch_revenue(&state.pool).await?;
    Ok(Json(ApiResponse::success(
        "Revenue",
        RevenueList { items },
        None,
    )))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/latest-invoices",
    responses(
        (status = 200, description = "Five most recent invoices", body = ApiResponse<LatestInvoiceList>),
    ),
    tag = "Dashboard"
)]
pub async fn latest_invoices(State(state): State<AppState>) -> Json<ApiResponse<LatestInvoiceList>> {
    let items = dashboard_service::fetch_latest_invoices(&state.pool).await;
    Json(ApiResponse::success(
        "Latest invoices",
        LatestInvoiceList { items },
        None,
    ))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/cards",
    responses(
        (status = 200, description = "Summary card figures", body = ApiResponse<CardData>),
        (status = 500, description = "Card data could not be loaded"),
    ),
    tag = "Dashboard"
)]
pub async fn cards(State(state): State<AppState>) -> AppResult<Json<ApiResponse<CardData>>> {
    let data = dashboard_service::fetch_card_data(&state.pool).await?;
    Ok(Json(ApiResponse::success("Cards", data, None)))
}
