use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppResult,
    models::{CardData, FALLBACK_IMAGE, LatestInvoice, Revenue},
};

/// All revenue rows in insertion order.
///
/// Failure policy: propagates; the revenue chart has no fallback.
pub async fn fetch_revenue(pool: &DbPool) -> AppResult<Vec<Revenue>> {
    let revenue = sqlx::query_as::<_, Revenue>("SELECT month, revenue FROM revenue")
        .fetch_all(pool)
        .await?;
    Ok(revenue)
}

/// The five most recent invoices, newest first, joined to their customer.
///
/// Rows whose customer join does not resolve keep their place in the list
/// with "Unknown" / "No email" / the fallback avatar substituted.
/// Failure policy: swallows; a failed query logs and yields an empty list.
pub async fn fetch_latest_invoices(pool: &DbPool) -> Vec<LatestInvoice> {
    let rows: Result<Vec<(Uuid, i64, Option<String>, Option<String>, Option<String>)>, _> =
        sqlx::query_as(
            r#"
            SELECT i.id, i.amount, c.name, c.email, c.image_url
            FROM invoices i
            LEFT JOIN customers c ON c.id = i.customer_id
            ORDER BY i.date DESC
            LIMIT 5
            "#,
        )
        .fetch_all(pool)
        .await;

    match rows {
        Ok(rows) => rows
            .into_iter()
            .map(|(id, amount, name, email, image_url)| LatestInvoice {
                id,
                name: name.unwrap_or_else(|| "Unknown".to_string()),
                email: email.unwrap_or_else(|| "No email".to_string()),
                image_url: image_url.unwrap_or_else(|| FALLBACK_IMAGE.to_string()),
                amount: amount.to_string(),
            })
            .collect(),
        Err(err) => {
            tracing::error!(error = %err, "failed to fetch latest invoices");
            Vec::new()
        }
    }
}

/// Summary card figures: invoice count, customer count, and the paid/pending
/// totals computed by the `get_invoice_stats` database function.
///
/// The three queries run concurrently and are joined; if any one fails the
/// whole summary fails. Failure policy: propagates.
pub async fn fetch_card_data(pool: &DbPool) -> AppResult<CardData> {
    let invoice_count = async {
        sqlx::query_as::<_, (i64,)>("SELECT count(*) FROM invoices")
            .fetch_one(pool)
            .await
    };
    let customer_count = async {
        sqlx::query_as::<_, (i64,)>("SELECT count(*) FROM customers")
            .fetch_one(pool)
            .await
    };
    let invoice_stats = async {
        sqlx::query_as::<_, (i64, i64)>("SELECT paid, pending FROM get_invoice_stats()")
            .fetch_optional(pool)
            .await
    };

    let (invoice_count, customer_count, invoice_stats) =
        tokio::try_join!(invoice_count, customer_count, invoice_stats).map_err(|err| {
            tracing::error!(error = %err, "failed to fetch card data");
            anyhow::anyhow!("Failed to fetch card data")
        })?;

    let (paid, pending) = invoice_stats.unwrap_or((0, 0));

    Ok(CardData {
        number_of_invoices: invoice_count.0,
        number_of_customers: customer_count.0,
        total_paid_invoices: paid.to_string(),
        total_pending_invoices: pending.to_string(),
    })
}
