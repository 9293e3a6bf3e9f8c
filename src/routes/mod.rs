use axum::Router;

use crate::state::AppState;

pub mod customers;
pub mod dashboard;
pub mod doc;
pub mod health;
pub mod invoices;
pub mod params;
pub mod seed;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/dashboard", dashboard::router())
        .nest("/invoices", invoices::router())
        .nest("/customers", customers::router())
        .nest("/seed", seed::router())
}
