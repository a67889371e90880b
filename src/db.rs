use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::auth::password;
use crate::errors::AppError;

pub async fn init_pool(database_url: &str) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(8)
        .connect(database_url)
        .await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    log::info!("Database migrations complete");
    Ok(())
}

/// Create the initial admin account if no admin exists yet. Idempotent.
pub async fn seed_admin(pool: &PgPool, username: &str, plain_password: &str) -> Result<(), AppError> {
    let admin_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = 'admin'")
            .fetch_one(pool)
            .await?;
    if admin_count > 0 {
        log::info!("Admin account already present, skipping seed");
        return Ok(());
    }

    let hash = password::hash_password(plain_password).map_err(AppError::Hash)?;
    sqlx::query("INSERT INTO users (username, password, role) VALUES ($1, $2, 'admin')")
        .bind(username)
        .bind(&hash)
        .execute(pool)
        .await?;
    log::info!("Seeded initial admin user '{username}'");
    Ok(())
}
