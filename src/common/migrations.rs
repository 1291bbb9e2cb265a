// src/common/migrations.rs
//! Database schema management

use sqlx::SqlitePool;
use tracing::{info, warn};

const TABLES: &[&str] = &["birds"];

/// Create the schema, optionally dropping existing tables first.
///
/// The `UNIQUE` index on `birds.name` is the authoritative write-time check
/// behind the uniqueness constraint evaluated during validation.
pub async fn run_migrations(pool: &SqlitePool, reset_db: bool) -> Result<(), sqlx::Error> {
    if reset_db {
        warn!("Dropping all tables and recreating schema");
        drop_all_tables(pool).await?;
    }

    create_bird_tables(pool).await?;

    info!("Database migration completed");
    Ok(())
}

async fn drop_all_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for table in TABLES {
        sqlx::query(&format!("DROP TABLE IF EXISTS {}", table))
            .execute(pool)
            .await?;
    }
    Ok(())
}

async fn create_bird_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS birds (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            species TEXT,
            wingspan_cm REAL,
            created_at TEXT DEFAULT (datetime('now')),
            updated_at TEXT DEFAULT (datetime('now'))
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_birds_species ON birds(species)")
        .execute(pool)
        .await?;

    Ok(())
}
