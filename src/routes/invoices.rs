use axum::{
    Json, Router,
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use uuid::Uuid;

use crate::{
    dto::invoices::{InvoiceFormPayload, InvoiceList},
    error::{AppError, AppResult},
    models::Invoice,
    response::{ApiResponse, Meta},
    routes::params::InvoiceListQuery,
    services::invoice_service,
    state::AppState,
};

/// Logical path of the cached invoice list in the presentation layer.
pub const INVOICES_PATH: &str = "/dashboard/invoices";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::get(list_invoices))
        .route("/", axum::routing::post(create_invoice))
        .route("/{id}", axum::routing::get(get_invoice))
        .route("/{id}", axum::routing::put(update_invoice))
        .route("/{id}", axum::routing::delete(delete_invoice))
}

#[utoipa::path(
    get,
    path = "/api/invoices",
    params(
        ("query" = Option<String>, Query, description = "Substring matched against customer name or email"),
        ("page" = Option<i64>, Query, description = "Page number, default 1, 10 per page"),
    ),
    responses(
        (status = 200, description = "List invoices", body = ApiResponse<InvoiceList>)
    ),
    tag = "Invoices"
)]
pub async fn list_invoices(
    State(state): State<AppState>,
    Query(params): Query<InvoiceListQuery>,
) -> Json<ApiResponse<InvoiceList>> {
    let (query, page) = params.normalize();
    let items = invoice_service::fetch_filtered_invoices(&state.pool, &query, page).await;
    let total_pages = invoice_service::fetch_invoice_pages(&state.pool, &query).await;

    let meta = Meta::new(page, InvoiceListQuery::page_size(), total_pages);
    Json(ApiResponse::success(
        "Invoices",
        InvoiceList { items },
        Some(meta),
    ))
}

#[utoipa::path(
    get,
    path = "/api/invoices/{id}",
    params(
        ("id" = Uuid, Path, description = "Invoice ID")
    ),
    responses(
        (status = 200, description = "Get invoice", body = ApiResponse<Invoice>),
        (status = 404, description = "Invoice not found"),
    ),
    tag = "Invoices"
)]
pub async fn get_invoice(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Invoice>>> {
    let invoice = match invoice_service::fetch_invoice_by_id(&state.pool, id).await {
        Some(invoice) => invoice,
        None => return Err(AppError::NotFound),
    };
    Ok(Json(ApiResponse::success("Invoice", invoice, None)))
}

#[utoipa::path(
    post,
    path = "/api/invoices",
    request_body(content = InvoiceFormPayload, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Invoice created; redirects to the invoice list"),
        (status = 400, description = "Validation failed"),
    ),
    tag = "Invoices"
)]
pub async fn create_invoice(
    State(state): State<AppState>,
    Form(payload): Form<InvoiceFormPayload>,
) -> Response {
    match invoice_service::create_invoice(&state.pool, &payload).await {
        Ok(_) => {
            state.revalidator.invalidate(INVOICES_PATH);
            Redirect::to(INVOICES_PATH).into_response()
        }
        Err(err) => write_failure(err, "Invoice not created"),
    }
}

#[utoipa::path(
    put,
    path = "/api/invoices/{id}",
    params(
        ("id" = Uuid, Path, description = "Invoice ID")
    ),
    request_body(content = InvoiceFormPayload, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Invoice updated; redirects to the invoice list"),
        (status = 400, description = "Validation failed"),
    ),
    tag = "Invoices"
)]
pub async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(payload): Form<InvoiceFormPayload>,
) -> Response {
    match invoice_service::update_invoice(&state.pool, id, &payload).await {
        Ok(()) => {
            state.revalidator.invalidate(INVOICES_PATH);
            Redirect::to(INVOICES_PATH).into_response()
        }
        Err(err) => write_failure(err, "Invoice not updated"),
    }
}

/// Write-path failure handling: validation errors go back to the form as a
/// structured 400; anything else is logged and the request completes with no
/// redirect and no error body.
fn write_failure(err: AppError, message: &str) -> Response {
    if matches!(&err, AppError::Validation(_)) {
        return err.into_response();
    }

    tracing::error!(error = %err, "invoice write failed");
    let body = ApiResponse::<serde_json::Value> {
        message: message.to_string(),
        data: None,
        meta: Some(Meta::empty()),
    };
    (StatusCode::OK, Json(body)).into_response()
}

#[utoipa::path(
    delete,
    path = "/api/invoices/{id}",
    params(
        ("id" = Uuid, Path, description = "Invoice ID")
    ),
    responses(
        (status = 200, description = "Deleted invoice"),
        (status = 404, description = "Invoice not found"),
    ),
    tag = "Invoices"
)]
pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    invoice_service::delete_invoice(&state.pool, id).await?;

    // Delete is fired from within the list view, so there is no redirect.
    state.revalidator.invalidate(INVOICES_PATH);

    Ok(Json(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    )))
}
