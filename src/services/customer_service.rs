use crate::{
    db::DbPool,
    error::AppResult,
    models::{Customer, FALLBACK_IMAGE},
};

/// All customers, with the fallback avatar substituted for a missing image.
///
/// Failure policy: propagates; the invoice form cannot render without its
/// customer list.
pub async fn fetch_customers(pool: &DbPool) -> AppResult<Vec<Customer>> {
    let customers = sqlx::query_as::<_, Customer>("SELECT * FROM customers")
        .fetch_all(pool)
        .await?;

    Ok(customers
        .into_iter()
        .map(|customer| Customer {
            image_url: customer
                .image_url
                .or_else(|| Some(FALLBACK_IMAGE.to_string())),
            ..customer
        })
        .collect())
}
