use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use chrono::NaiveDate;
use futures::future::join_all;
use uuid::Uuid;

use crate::{db::DbPool, error::AppResult, models::InvoiceStatus};

// id, name, email, password
const USERS: &[(&str, &str, &str, &str)] = &[(
    "410544b2-4001-4271-9855-fec4b6a6442a",
    "User",
    "user@nextmail.com",
    "123456",
)];

// id, name, email, image_url
const CUSTOMERS: &[(&str, &str, &str, &str)] = &[
    (
        "d6e15727-9fe1-4961-8c5b-ea44a9bd81aa",
        "Evil Rabbit",
        "evil@rabbit.com",
        "/customers/evil-rabbit.png",
    ),
    (
        "3958dc9e-712f-4377-85e9-fec4b6a6442a",
        "Delba de Oliveira",
        "delba@oliveira.com",
        "/customers/delba-de-oliveira.png",
    ),
    (
        "3958dc9e-742f-4377-85e9-fec4b6a6442a",
        "Lee Robinson",
        "lee@robinson.com",
        "/customers/lee-robinson.png",
    ),
    (
        "76d65c26-f784-44a2-ac19-586678f7c2f2",
        "Michael Novotny",
        "michael@novotny.com",
        "/customers/michael-novotny.png",
    ),
    (
        "cc27c14a-0acf-4f4a-a6c9-d45682c144b9",
        "Amy Burns",
        "amy@burns.com",
        "/customers/amy-burns.png",
    ),
    (
        "13d07535-c59e-4157-a011-f8d2ef4e0cbb",
        "Balazs Orban",
        "balazs@orban.com",
        "/customers/balazs-orban.png",
    ),
];

// customer_id, amount (cents), status, date
const INVOICES: &[(&str, i64, &str, &str)] = &[
    ("d6e15727-9fe1-4961-8c5b-ea44a9bd81aa", 15795, "pending", "2022-12-06"),
    ("3958dc9e-742f-4377-85e9-fec4b6a6442a", 20348, "pending", "2022-11-14"),
    ("cc27c14a-0acf-4f4a-a6c9-d45682c144b9", 3040, "paid", "2022-10-29"),
    ("76d65c26-f784-44a2-ac19-586678f7c2f2", 44800, "paid", "2023-09-10"),
    ("13d07535-c59e-4157-a011-f8d2ef4e0cbb", 34577, "pending", "2023-08-05"),
    ("3958dc9e-712f-4377-85e9-fec4b6a6442a", 54246, "pending", "2023-07-16"),
    ("d6e15727-9fe1-4961-8c5b-ea44a9bd81aa", 666, "pending", "2023-06-27"),
    ("76d65c26-f784-44a2-ac19-586678f7c2f2", 32545, "paid", "2023-06-09"),
    ("cc27c14a-0acf-4f4a-a6c9-d45682c144b9", 1250, "paid", "2023-06-17"),
    ("13d07535-c59e-4157-a011-f8d2ef4e0cbb", 8546, "paid", "2023-06-07"),
    ("3958dc9e-712f-4377-85e9-fec4b6a6442a", 500, "paid", "2023-08-19"),
    ("13d07535-c59e-4157-a011-f8d2ef4e0cbb", 8945, "paid", "2023-06-03"),
    ("3958dc9e-742f-4377-85e9-fec4b6a6442a", 1000, "paid", "2022-06-05"),
];

// month, revenue
const REVENUE: &[(&str, i64)] = &[
    ("Jan", 2000),
    ("Feb", 1800),
    ("Mar", 2200),
    ("Apr", 2500),
    ("May", 2300),
    ("Jun", 3200),
    ("Jul", 3500),
    ("Aug", 3700),
    ("Sep", 2500),
    ("Oct", 2800),
    ("Nov", 3000),
    ("Dec", 4800),
];

/// Bulk-load the fixture data.
///
/// Phases run in a fixed order because invoices reference customers:
/// users, then customers, then invoices, then revenue. Within a phase every
/// row insert is issued concurrently and individual failures are logged
/// without halting the rest of the phase.
pub async fn run_seed(pool: &DbPool) -> AppResult<()> {
    seed_users(pool).await?;
    seed_customers(pool).await?;
    seed_invoices(pool).await?;
    seed_revenue(pool).await?;
    Ok(())
}

async fn seed_users(pool: &DbPool) -> AppResult<()> {
    // Resets the users table before the fixture inserts.
    sqlx::query("SELECT seed_users()").execute(pool).await?;

    let inserts = USERS.iter().map(|&(id, name, email, password)| async move {
        let insert = async {
            let password_hash = hash_password(password)?;
            sqlx::query(
                r#"
                INSERT INTO users (id, name, email, password)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(Uuid::parse_str(id)?)
            .bind(name)
            .bind(email)
            .bind(password_hash)
            .execute(pool)
            .await?;
            anyhow::Ok(())
        };
        if let Err(err) = insert.await {
            tracing::error!(error = %err, email, "error inserting user");
        }
    });
    join_all(inserts).await;

    Ok(())
}

async fn seed_customers(pool: &DbPool) -> AppResult<()> {
    let inserts = CUSTOMERS.iter().map(|&(id, name, email, image_url)| async move {
        let insert = async {
            sqlx::query(
                r#"
                INSERT INTO customers (id, name, email, image_url)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(Uuid::parse_str(id)?)
            .bind(name)
            .bind(email)
            .bind(image_url)
            .execute(pool)
            .await?;
            anyhow::Ok(())
        };
        if let Err(err) = insert.await {
            tracing::error!(error = %err, email, "error inserting customer");
        }
    });
    join_all(inserts).await;

    Ok(())
}

async fn seed_invoices(pool: &DbPool) -> AppResult<()> {
    let inserts = INVOICES
        .iter()
        .map(|&(customer_id, amount, status, date)| async move {
            let insert = async {
                let status = InvoiceStatus::parse(status)
                    .ok_or_else(|| anyhow::anyhow!("unknown invoice status {status}"))?;
                sqlx::query(
                    r#"
                    INSERT INTO invoices (customer_id, amount, status, date)
                    VALUES ($1, $2, $3, $4)
                    "#,
                )
                .bind(Uuid::parse_str(customer_id)?)
                .bind(amount)
                .bind(status)
                .bind(NaiveDate::parse_from_str(date, "%Y-%m-%d")?)
                .execute(pool)
                .await?;
                anyhow::Ok(())
            };
            if let Err(err) = insert.await {
                tracing::error!(error = %err, customer_id, "error inserting invoice");
            }
        });
    join_all(inserts).await;

    Ok(())
}

async fn seed_revenue(pool: &DbPool) -> AppResult<()> {
    let inserts = REVENUE.iter().map(|&(month, revenue)| async move {
        let result = sqlx::query(
            r#"
            INSERT INTO revenue (month, revenue)
            VALUES ($1, $2)
            "#,
        )
        .bind(month)
        .bind(revenue)
        .execute(pool)
        .await;
        if let Err(err) = result {
            tracing::error!(error = %err, month, "error inserting revenue");
        }
    });
    join_all(inserts).await;

    Ok(())
}

fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();
    Ok(password_hash)
}
