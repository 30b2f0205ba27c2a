//! # Task Store
//!
//! The storage seam. A [`TaskStore`] owns the persisted task records and
//! enforces two uniqueness invariants at the statement level: one on `nome`,
//! one on `ordem`. It also hands out [`StoreTransaction`]s so the reorder
//! coordinator can batch order-key writes atomically.
//!
//! Two implementations: [`postgres::PostgresStore`] for production and
//! [`memory::MemoryStore`] for tests, which enforces the same per-statement
//! uniqueness checks so collision behavior can be exercised without a
//! database.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewTarefa, Tarefa, TarefaUpdate};

/// Constraint name for task-name uniqueness.
pub const NOME_CONSTRAINT: &str = "tarefas_nome_key";
/// Constraint name for order-key uniqueness.
pub const ORDEM_CONSTRAINT: &str = "tarefas_ordem_key";

#[derive(Debug, Error)]
pub enum StoreError {
    /// A write would break a uniqueness invariant; `constraint` names which.
    #[error("unique constraint {constraint} violated")]
    UniqueViolation { constraint: String },

    /// Connectivity or backend failure.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn unique(constraint: &str) -> Self {
        Self::UniqueViolation {
            constraint: constraint.to_string(),
        }
    }

    /// Whether this is a uniqueness violation on the named constraint.
    pub fn violates(&self, name: &str) -> bool {
        matches!(self, Self::UniqueViolation { constraint } if constraint == name)
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db) = err {
            // 23505: unique_violation
            if db.code().as_deref() == Some("23505") {
                return StoreError::UniqueViolation {
                    constraint: db.constraint().unwrap_or("unknown").to_string(),
                };
            }
        }
        StoreError::Unavailable(err.to_string())
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Connectivity probe.
    async fn ping(&self) -> StoreResult<()>;

    /// All tasks in insertion (id) order.
    async fn list_all(&self) -> StoreResult<Vec<Tarefa>>;

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Tarefa>>;

    /// Case-sensitive exact-match lookup by name.
    async fn find_by_name(&self, nome: &str) -> StoreResult<Option<Tarefa>>;

    /// Highest order key currently in use; `None` when the table is empty.
    async fn max_ordem(&self) -> StoreResult<Option<i32>>;

    async fn insert(&self, new: NewTarefa) -> StoreResult<Tarefa>;

    /// Overwrite the three editable fields; `None` when the id is unknown.
    async fn update_fields(&self, id: i64, update: TarefaUpdate) -> StoreResult<Option<Tarefa>>;

    /// Remove a task; `false` when the id is unknown.
    async fn delete(&self, id: i64) -> StoreResult<bool>;

    /// Begin a transaction for batched order-key writes. The transaction must
    /// be committed or rolled back on every exit path; implementations also
    /// roll back on drop.
    async fn begin(&self) -> StoreResult<Box<dyn StoreTransaction>>;
}

#[async_trait]
pub trait StoreTransaction: Send {
    /// Assign an order key to a task within this transaction. Returns the
    /// number of rows touched (0 when the id is unknown). Fails with
    /// [`StoreError::UniqueViolation`] if the key is already held by another
    /// task as of this statement.
    async fn set_ordem(&mut self, id: i64, ordem: i32) -> StoreResult<u64>;

    async fn commit(self: Box<Self>) -> StoreResult<()>;

    async fn rollback(self: Box<Self>) -> StoreResult<()>;
}
