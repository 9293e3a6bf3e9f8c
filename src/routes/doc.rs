use utoipa::OpenApi;
use utoipa::openapi::OpenApi as OpenApiSpec;
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::invoices::{FieldError, InvoiceFormPayload, InvoiceList, ValidationErrors},
    models::{CardData, Customer, FilteredInvoice, Invoice, InvoiceStatus, LatestInvoice, Revenue},
    response::{ApiResponse, Meta},
    routes::{customers, dashboard, health, invoices, params, seed},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        dashboard::revenue,
        dashboard::latest_invoices,
        dashboard::cards,
        invoices::list_invoices,
        invoices::get_invoice,
        invoices::create_invoice,
        invoices::update_invoice,
        invoices::delete_invoice,
        customers::list_customers,
        seed::run_seed,
    ),
    components(
        schemas(
            Customer,
            Invoice,
            InvoiceStatus,
            Revenue,
            LatestInvoice,
            FilteredInvoice,
            CardData,
            InvoiceFormPayload,
            InvoiceList,
            FieldError,
            ValidationErrors,
            params::InvoiceListQuery,
            customers::CustomerList,
            dashboard::RevenueList,
            dashboard::LatestInvoiceList,
            Meta,
            ApiResponse<Invoice>,
            ApiResponse<InvoiceList>,
            ApiResponse<CardData>,
            ApiResponse<customers::CustomerList>,
            ApiResponse<dashboard::RevenueList>,
            ApiResponse<dashboard::LatestInvoiceList>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Dashboard", description = "Dashboard summary endpoints"),
        (name = "Invoices", description = "Invoice endpoints"),
        (name = "Customers", description = "Customer endpoints"),
        (name = "Seed", description = "Fixture data loading"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
