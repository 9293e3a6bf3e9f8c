use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::Customer,
    response::ApiResponse,
    services::customer_service,
    state::AppState,
};

#[derive(Serialize, ToSchema)]
pub struct CustomerList {
    pub items: Vec<Customer>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_customers))
}

#[utoipa::path(
    get,
    path = "/api/customers",
    responses(
        (status = 200, description = "List customers", body = ApiResponse<CustomerList>),
        (status = 500, description = "Customers could not be loaded"),
    ),
    tag = "Customers"
)]
pub async fn list_customers(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CustomerList>>> {
    let items = customer_service::fetch_customers(&state.pool).await?;
    Ok(Json(ApiResponse::success(
        "Customers",
        CustomerList { items },
        None,
    )))
}
