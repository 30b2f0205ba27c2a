//! PostgreSQL task store backed by a sqlx connection pool.
//!
//! Uniqueness is carried by the `tarefas_nome_key` and `tarefas_ordem_key`
//! constraints on the table; violations come back as error code 23505 and are
//! decoded into [`StoreError::UniqueViolation`] by the `From<sqlx::Error>`
//! impl in the parent module.
//!
//! [`StoreError::UniqueViolation`]: super::StoreError::UniqueViolation

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use super::{StoreResult, StoreTransaction, TaskStore};
use crate::models::{NewTarefa, Tarefa, TarefaUpdate};

#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl TaskStore for PostgresStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_all(&self) -> StoreResult<Vec<Tarefa>> {
        let tarefas = sqlx::query_as::<_, Tarefa>(
            "SELECT id, nome, custo, data_limite, ordem FROM tarefas ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(tarefas)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Tarefa>> {
        let tarefa = sqlx::query_as::<_, Tarefa>(
            "SELECT id, nome, custo, data_limite, ordem FROM tarefas WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(tarefa)
    }

    async fn find_by_name(&self, nome: &str) -> StoreResult<Option<Tarefa>> {
        let tarefa = sqlx::query_as::<_, Tarefa>(
            "SELECT id, nome, custo, data_limite, ordem FROM tarefas WHERE nome = $1",
        )
        .bind(nome)
        .fetch_optional(&self.pool)
        .await?;
        Ok(tarefa)
    }

    async fn max_ordem(&self) -> StoreResult<Option<i32>> {
        let max: Option<i32> = sqlx::query_scalar("SELECT MAX(ordem) FROM tarefas")
            .fetch_one(&self.pool)
            .await?;
        Ok(max)
    }

    async fn insert(&self, new: NewTarefa) -> StoreResult<Tarefa> {
        let tarefa = sqlx::query_as::<_, Tarefa>(
            "INSERT INTO tarefas (nome, custo, data_limite, ordem) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, nome, custo, data_limite, ordem",
        )
        .bind(&new.nome)
        .bind(new.custo)
        .bind(new.data_limite)
        .bind(new.ordem)
        .fetch_one(&self.pool)
        .await?;
        Ok(tarefa)
    }

    async fn update_fields(&self, id: i64, update: TarefaUpdate) -> StoreResult<Option<Tarefa>> {
        let tarefa = sqlx::query_as::<_, Tarefa>(
            "UPDATE tarefas SET nome = $1, custo = $2, data_limite = $3 \
             WHERE id = $4 \
             RETURNING id, nome, custo, data_limite, ordem",
        )
        .bind(&update.nome)
        .bind(update.custo)
        .bind(update.data_limite)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(tarefa)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM tarefas WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn begin(&self) -> StoreResult<Box<dyn StoreTransaction>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PostgresTransaction { tx }))
    }
}

/// A live `BEGIN`-ed transaction. Dropping it without an explicit commit rolls
/// back, so an aborted caller never leaves a partial migration behind.
pub struct PostgresTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl StoreTransaction for PostgresTransaction {
    async fn set_ordem(&mut self, id: i64, ordem: i32) -> StoreResult<u64> {
        let result = sqlx::query("UPDATE tarefas SET ordem = $1 WHERE id = $2")
            .bind(ordem)
            .bind(id)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected())
    }

    async fn commit(self: Box<Self>) -> StoreResult<()> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> StoreResult<()> {
        self.tx.rollback().await?;
        Ok(())
    }
}
