//! Database migrations for the records table

use sqlx::PgPool;

/// Run all migrations. Every statement is idempotent.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running record migrations...");

    // The UNIQUE constraint on external_code is the source of truth for
    // uniqueness; the service-level lookup is only a fast path.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS records (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL CHECK (name <> ''),
            external_code TEXT NOT NULL UNIQUE CHECK (external_code <> ''),
            category TEXT NOT NULL CHECK (category <> ''),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS records_created_at_idx
            ON records (created_at DESC, id DESC)
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Record migrations complete");
    Ok(())
}
