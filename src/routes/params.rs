use serde::Deserialize;
use utoipa::ToSchema;

use crate::services::invoice_service::PAGE_SIZE;

#[derive(Debug, Deserialize, ToSchema)]
pub struct InvoiceListQuery {
    pub query: Option<String>,
    pub page: Option<i64>,
}

impl InvoiceListQuery {
    /// Normalize to a search string and a 1-based page number. The page size
    /// is fixed at 10.
    pub fn normalize(self) -> (String, i64) {
        let query = self.query.unwrap_or_default();
        let page = self.page.unwrap_or(1).max(1);
        (query, page)
    }

    pub const fn page_size() -> i64 {
        PAGE_SIZE
    }
}
