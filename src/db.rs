use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{error, warn};

use crate::config::Config;
use crate::utils::error::AppError;

pub async fn connect(config: &Config) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!().run(pool).await
}

/// Opens a read-only repeatable-read transaction, so several reads see one snapshot.
pub async fn read_snapshot(pool: &PgPool) -> Result<Transaction<'static, Postgres>, AppError> {
    let mut tx = pool.begin().await?;
    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
        .execute(&mut *tx)
        .await?;
    Ok(tx)
}

/// Ends a write transaction: commits when `result` is `Ok`, rolls back otherwise.
///
/// Callers run every statement of one logical write against `tx` and hand the
/// outcome here, so no exit path leaves a partial write behind.
pub async fn finish<T>(
    tx: Transaction<'_, Postgres>,
    result: Result<T, AppError>,
    operation: &'static str,
) -> Result<T, AppError> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                error!(operation, error = ?rollback_err, "Rollback failed");
            }
            warn!(operation, error = %err, "Transaction rolled back");
            Err(err)
        }
    }
}
