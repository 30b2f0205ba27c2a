//! # Task Repository
//!
//! Typed CRUD over the task store. Translates [`StoreError`] into the domain
//! taxonomy and owns order-key assignment at creation time.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::{Result, TarefasError};
use crate::models::{NewTarefa, Tarefa, TarefaUpdate};
use crate::store::{StoreError, TaskStore, NOME_CONSTRAINT};

pub struct TarefaRepository {
    store: Arc<dyn TaskStore>,
}

impl TarefaRepository {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    /// All tasks in insertion order. Display sorting by order key is a caller
    /// concern.
    pub async fn list_all(&self) -> Result<Vec<Tarefa>> {
        let tarefas = self.store.list_all().await.map_err(translate)?;
        debug!(count = tarefas.len(), "listed tasks");
        Ok(tarefas)
    }

    /// Create a task with the next free order key: `max(ordem) + 1`, or 1 when
    /// the table is empty.
    ///
    /// The name pre-check gives a clean `DuplicateName` in the common case;
    /// the store's unique constraint is the backstop for the accepted
    /// create/create race on the computed order key and is translated the
    /// same way when it fires on the name.
    pub async fn create(&self, nome: &str, custo: f64, data_limite: NaiveDate) -> Result<Tarefa> {
        if nome.is_empty() {
            return Err(TarefasError::InvalidRequest(
                "task name must not be empty".to_string(),
            ));
        }

        if self
            .store
            .find_by_name(nome)
            .await
            .map_err(translate)?
            .is_some()
        {
            return Err(TarefasError::DuplicateName(nome.to_string()));
        }

        let ordem = self.store.max_ordem().await.map_err(translate)?.unwrap_or(0) + 1;
        let created = self
            .store
            .insert(NewTarefa {
                nome: nome.to_string(),
                custo,
                data_limite,
                ordem,
            })
            .await
            .map_err(|err| {
                if err.violates(NOME_CONSTRAINT) {
                    TarefasError::DuplicateName(nome.to_string())
                } else {
                    translate(err)
                }
            })?;

        info!(id = created.id, ordem = created.ordem, "task created");
        Ok(created)
    }

    /// Overwrite the three editable fields. Name uniqueness is not re-checked
    /// here; a colliding rename is rejected by the store's constraint and
    /// surfaces as `ConstraintViolation`.
    pub async fn update(&self, id: i64, update: TarefaUpdate) -> Result<Tarefa> {
        match self.store.update_fields(id, update).await.map_err(translate)? {
            Some(tarefa) => {
                info!(id, "task updated");
                Ok(tarefa)
            }
            None => Err(TarefasError::NotFound(id)),
        }
    }

    /// Remove a task. Remaining order keys are left as they are; the key
    /// space is never compacted.
    pub async fn delete(&self, id: i64) -> Result<()> {
        if self.store.delete(id).await.map_err(translate)? {
            info!(id, "task deleted");
            Ok(())
        } else {
            Err(TarefasError::NotFound(id))
        }
    }
}

pub(crate) fn translate(err: StoreError) -> TarefasError {
    match err {
        StoreError::UniqueViolation { constraint } => TarefasError::ConstraintViolation(constraint),
        StoreError::Unavailable(msg) => TarefasError::StoreUnavailable(msg),
    }
}
