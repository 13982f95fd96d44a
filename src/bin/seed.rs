use hotel_booking_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    seed::ensure_defaults,
    state::{AppState, AuthSettings},
    storage::Storage,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let database_url = config
        .database_url
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is not set, an in-memory seed would be lost"))?;

    let orm = create_orm_conn(database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm, &config.migrations_dir).await?;

    let state = AppState::new(Storage::database(orm), AuthSettings::from(&config));
    let report = ensure_defaults(&state, &config.admin_password).await?;

    println!(
        "Seed completed. Rooms created: {}, admin created: {}",
        report.rooms_created, report.admin_created
    );
    Ok(())
}
