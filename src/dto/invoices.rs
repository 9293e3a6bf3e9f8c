use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{FilteredInvoice, InvoiceStatus};

/// Raw invoice form fields as submitted, before any coercion.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct InvoiceFormPayload {
    #[serde(rename = "customerId")]
    pub customer_id: String,
    pub amount: String,
    pub status: String,
}

/// A validated invoice write: amount already converted to cents.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInvoice {
    pub customer_id: Uuid,
    pub amount: i64,
    pub status: InvoiceStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct ValidationErrors {
    pub field_errors: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.field_errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.field_errors.is_empty()
    }
}

impl InvoiceFormPayload {
    /// Validate and coerce the raw form fields.
    ///
    /// All-or-nothing: every failing field is reported and nothing is
    /// produced unless the whole payload is valid. Never panics.
    pub fn validate(&self) -> Result<NewInvoice, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let customer_id = match Uuid::parse_str(self.customer_id.trim()) {
            Ok(id) => Some(id),
            Err(_) => {
                errors.push("customer_id", "Customer id must be a valid UUID");
                None
            }
        };

        // Amounts are entered in major units and stored in cents.
        let amount = match self.amount.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => {
                let cents = (value * 100.0).round() as i64;
                if cents < 0 {
                    errors.push("amount", "Amount must be positive");
                    None
                } else {
                    Some(cents)
                }
            }
            _ => {
                errors.push("amount", "Amount must be a number");
                None
            }
        };

        let status = match InvoiceStatus::parse(self.status.trim()) {
            Some(status) => Some(status),
            None => {
                errors.push("status", "Status must be 'pending' or 'paid'");
                None
            }
        };

        match (customer_id, amount, status) {
            (Some(customer_id), Some(amount), Some(status)) if errors.is_empty() => {
                Ok(NewInvoice {
                    customer_id,
                    amount,
                    status,
                })
            }
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InvoiceList {
    pub items: Vec<FilteredInvoice>,
}
