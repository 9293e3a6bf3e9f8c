use axum_invoicing_api::{config::AppConfig, db::create_pool, services::seed_service};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    seed_service::run_seed(&pool).await?;

    println!("Database seeded successfully");
    Ok(())
}
