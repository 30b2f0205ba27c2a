//! In-memory task store for tests.
//!
//! Enforces the same statement-level uniqueness checks as the PostgreSQL
//! schema, including inside transactions, so the reorder coordinator's
//! collision behavior can be exercised without a database. A transaction
//! stages writes on a private copy of the table and swaps it in on commit.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{StoreError, StoreResult, StoreTransaction, TaskStore, NOME_CONSTRAINT, ORDEM_CONSTRAINT};
use crate::models::{NewTarefa, Tarefa, TarefaUpdate};

#[derive(Debug, Default)]
struct Inner {
    tarefas: BTreeMap<i64, Tarefa>,
    last_id: i64,
}

impl Inner {
    fn nome_taken(&self, nome: &str, exclude: Option<i64>) -> bool {
        self.tarefas
            .values()
            .any(|t| Some(t.id) != exclude && t.nome == nome)
    }

    fn ordem_taken(&self, ordem: i32, exclude: Option<i64>) -> bool {
        self.tarefas
            .values()
            .any(|t| Some(t.id) != exclude && t.ordem == ordem)
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all order keys, keyed by task id. Handy for atomicity
    /// assertions in tests.
    pub fn ordem_snapshot(&self) -> BTreeMap<i64, i32> {
        self.inner
            .lock()
            .tarefas
            .values()
            .map(|t| (t.id, t.ordem))
            .collect()
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn list_all(&self) -> StoreResult<Vec<Tarefa>> {
        Ok(self.inner.lock().tarefas.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Tarefa>> {
        Ok(self.inner.lock().tarefas.get(&id).cloned())
    }

    async fn find_by_name(&self, nome: &str) -> StoreResult<Option<Tarefa>> {
        Ok(self
            .inner
            .lock()
            .tarefas
            .values()
            .find(|t| t.nome == nome)
            .cloned())
    }

    async fn max_ordem(&self) -> StoreResult<Option<i32>> {
        Ok(self.inner.lock().tarefas.values().map(|t| t.ordem).max())
    }

    async fn insert(&self, new: NewTarefa) -> StoreResult<Tarefa> {
        let mut inner = self.inner.lock();
        if inner.nome_taken(&new.nome, None) {
            return Err(StoreError::unique(NOME_CONSTRAINT));
        }
        if inner.ordem_taken(new.ordem, None) {
            return Err(StoreError::unique(ORDEM_CONSTRAINT));
        }
        inner.last_id += 1;
        let tarefa = Tarefa {
            id: inner.last_id,
            nome: new.nome,
            custo: new.custo,
            data_limite: new.data_limite,
            ordem: new.ordem,
        };
        inner.tarefas.insert(tarefa.id, tarefa.clone());
        Ok(tarefa)
    }

    async fn update_fields(&self, id: i64, update: TarefaUpdate) -> StoreResult<Option<Tarefa>> {
        let mut inner = self.inner.lock();
        if !inner.tarefas.contains_key(&id) {
            return Ok(None);
        }
        if inner.nome_taken(&update.nome, Some(id)) {
            return Err(StoreError::unique(NOME_CONSTRAINT));
        }
        let tarefa = inner.tarefas.get_mut(&id).map(|t| {
            t.nome = update.nome;
            t.custo = update.custo;
            t.data_limite = update.data_limite;
            t.clone()
        });
        Ok(tarefa)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        Ok(self.inner.lock().tarefas.remove(&id).is_some())
    }

    async fn begin(&self) -> StoreResult<Box<dyn StoreTransaction>> {
        let staged = self.inner.lock().tarefas.clone();
        Ok(Box::new(MemoryTransaction {
            store: Arc::clone(&self.inner),
            staged,
        }))
    }
}

/// Staged-copy transaction: writes land on a private copy of the table, each
/// one checked against the uniqueness invariants exactly as a constraint
/// would check it. Commit swaps the copy in; rollback (or drop) discards it.
///
/// This is snapshot-clobber, not read-committed: a commit replaces the whole
/// table with the staged copy, so rows inserted or deleted on the store after
/// `begin()` are silently overwritten. Single-writer test scenarios only.
struct MemoryTransaction {
    store: Arc<Mutex<Inner>>,
    staged: BTreeMap<i64, Tarefa>,
}

#[async_trait]
impl StoreTransaction for MemoryTransaction {
    async fn set_ordem(&mut self, id: i64, ordem: i32) -> StoreResult<u64> {
        if !self.staged.contains_key(&id) {
            return Ok(0);
        }
        let collision = self
            .staged
            .values()
            .any(|t| t.id != id && t.ordem == ordem);
        if collision {
            return Err(StoreError::unique(ORDEM_CONSTRAINT));
        }
        if let Some(tarefa) = self.staged.get_mut(&id) {
            tarefa.ordem = ordem;
        }
        Ok(1)
    }

    async fn commit(self: Box<Self>) -> StoreResult<()> {
        self.store.lock().tarefas = self.staged;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn new_tarefa(nome: &str, ordem: i32) -> NewTarefa {
        NewTarefa {
            nome: nome.to_string(),
            custo: 10.0,
            data_limite: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            ordem,
        }
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_nome() {
        let store = MemoryStore::new();
        store.insert(new_tarefa("relatório", 1)).await.unwrap();
        let err = store.insert(new_tarefa("relatório", 2)).await.unwrap_err();
        assert!(err.violates(NOME_CONSTRAINT));
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_ordem() {
        let store = MemoryStore::new();
        store.insert(new_tarefa("a", 1)).await.unwrap();
        let err = store.insert(new_tarefa("b", 1)).await.unwrap_err();
        assert!(err.violates(ORDEM_CONSTRAINT));
    }

    #[tokio::test]
    async fn transaction_writes_are_invisible_until_commit() {
        let store = MemoryStore::new();
        let a = store.insert(new_tarefa("a", 1)).await.unwrap();

        let mut tx = store.begin().await.unwrap();
        tx.set_ordem(a.id, 5).await.unwrap();
        assert_eq!(store.find_by_id(a.id).await.unwrap().unwrap().ordem, 1);

        tx.commit().await.unwrap();
        assert_eq!(store.find_by_id(a.id).await.unwrap().unwrap().ordem, 5);
    }

    #[tokio::test]
    async fn rollback_discards_staged_writes() {
        let store = MemoryStore::new();
        let a = store.insert(new_tarefa("a", 1)).await.unwrap();

        let mut tx = store.begin().await.unwrap();
        tx.set_ordem(a.id, 7).await.unwrap();
        tx.rollback().await.unwrap();

        assert_eq!(store.find_by_id(a.id).await.unwrap().unwrap().ordem, 1);
    }

    #[tokio::test]
    async fn commit_clobbers_writes_made_after_begin() {
        let store = MemoryStore::new();
        let a = store.insert(new_tarefa("a", 1)).await.unwrap();

        let mut tx = store.begin().await.unwrap();
        // Lands on the store after the snapshot was taken.
        store.insert(new_tarefa("b", 2)).await.unwrap();

        tx.set_ordem(a.id, 3).await.unwrap();
        tx.commit().await.unwrap();

        // Snapshot-clobber semantics: the commit replaced the table, "b" is
        // gone. Documented limitation of the test store.
        assert_eq!(store.list_all().await.unwrap().len(), 1);
        assert_eq!(store.find_by_id(a.id).await.unwrap().unwrap().ordem, 3);
    }

    #[tokio::test]
    async fn set_ordem_enforces_uniqueness_per_statement() {
        let store = MemoryStore::new();
        let a = store.insert(new_tarefa("a", 1)).await.unwrap();
        store.insert(new_tarefa("b", 2)).await.unwrap();

        // A direct swap attempt must collide on the first write.
        let mut tx = store.begin().await.unwrap();
        let err = tx.set_ordem(a.id, 2).await.unwrap_err();
        assert!(err.violates(ORDEM_CONSTRAINT));
    }
}
