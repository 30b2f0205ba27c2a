//! Schema migrations, embedded in the binary and tracked in a version table.
//!
//! Each migration runs in its own transaction together with the insert into
//! the tracking table, so a failed migration leaves no partial schema behind.

use sqlx::PgPool;
use tracing::{debug, info};

struct Migration {
    version: &'static str,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: "20241115000000",
    name: "create_tarefas",
    sql: "CREATE TABLE tarefas (
            id BIGSERIAL PRIMARY KEY,
            nome TEXT NOT NULL,
            custo DOUBLE PRECISION NOT NULL,
            data_limite DATE NOT NULL,
            ordem INTEGER NOT NULL,
            CONSTRAINT tarefas_nome_key UNIQUE (nome),
            CONSTRAINT tarefas_ordem_key UNIQUE (ordem)
          )",
}];

pub struct DatabaseMigrations;

impl DatabaseMigrations {
    /// Apply all outstanding migrations in version order.
    pub async fn run_all(pool: &PgPool) -> Result<(), sqlx::Error> {
        Self::ensure_migration_table(pool).await?;

        for migration in MIGRATIONS {
            if Self::is_applied(pool, migration.version).await? {
                debug!(version = migration.version, "migration already applied");
                continue;
            }

            let mut tx = pool.begin().await?;
            sqlx::query(migration.sql).execute(&mut *tx).await?;
            sqlx::query(
                "INSERT INTO tarefas_schema_migrations (version, name) VALUES ($1, $2)",
            )
            .bind(migration.version)
            .bind(migration.name)
            .execute(&mut *tx)
            .await?;
            tx.commit().await?;

            info!(
                version = migration.version,
                name = migration.name,
                "applied migration"
            );
        }

        Ok(())
    }

    async fn ensure_migration_table(pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS tarefas_schema_migrations (
               version TEXT PRIMARY KEY,
               name TEXT NOT NULL,
               applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
             )",
        )
        .execute(pool)
        .await?;
        Ok(())
    }

    async fn is_applied(pool: &PgPool, version: &str) -> Result<bool, sqlx::Error> {
        let applied: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM tarefas_schema_migrations WHERE version = $1)",
        )
        .bind(version)
        .fetch_one(pool)
        .await?;
        Ok(applied)
    }
}
