//! # Reorder Coordinator
//!
//! Atomically rewrites the order keys of a caller-supplied set of tasks while
//! the store enforces order-key uniqueness at every statement.
//!
//! Writing the requested keys directly can collide with a key that has not
//! been moved out of the way yet: swapping A(1) and B(2) fails on the first
//! write, because `UPDATE ... SET ordem = 2` runs while B still holds 2. The
//! coordinator instead migrates keys in two phases inside one transaction:
//!
//! 1. **Displace**: every touched task is parked on `-(input position + 1)`.
//!    The temporaries are mutually distinct and disjoint from all real
//!    (non-negative) keys, so no write in this phase can collide.
//! 2. **Commit final**: every task gets its requested key. Touched rows all
//!    hold negatives by now, so the only remaining collision source is the
//!    caller's own key set (duplicates within the request, or a clash with an
//!    untouched task's key) — which the coordinator deliberately does not
//!    deduplicate.
//!
//! Any failure rolls the transaction back; the key set observable after the
//! call then equals the key set before it.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{Result, TarefasError};
use crate::repository::translate;
use crate::store::{StoreTransaction, TaskStore};

/// One entry of the target ordering: task `id` ends up with key `ordem`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderEntry {
    pub id: i64,
    pub ordem: i32,
}

pub struct ReorderCoordinator {
    store: Arc<dyn TaskStore>,
}

impl ReorderCoordinator {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    /// Apply the target ordering, all or nothing.
    ///
    /// Fails with `InvalidRequest` on an empty input, `NotFound` when an id
    /// does not exist, `ConstraintViolation` when the caller's target keys
    /// collide, and `StoreUnavailable` on transactional failure. Every
    /// failure path rolls back first.
    pub async fn apply(&self, entries: &[OrderEntry]) -> Result<()> {
        if entries.is_empty() {
            return Err(TarefasError::InvalidRequest(
                "target ordering must be a non-empty array".to_string(),
            ));
        }

        // Real keys are non-negative; phase 1 owns the negative range. A
        // negative target would let a committed key collide with a later
        // displacement write.
        if let Some(entry) = entries.iter().find(|entry| entry.ordem < 0) {
            return Err(TarefasError::InvalidRequest(format!(
                "ordem must be non-negative, got {} for task {}",
                entry.ordem, entry.id
            )));
        }

        let mut tx = self.store.begin().await.map_err(translate)?;

        if let Err(err) = run_phases(tx.as_mut(), entries).await {
            if let Err(rollback_err) = tx.rollback().await {
                warn!(error = %rollback_err, "rollback failed after reorder error");
            }
            return Err(err);
        }

        tx.commit().await.map_err(translate)?;
        info!(count = entries.len(), "order keys rewritten");
        Ok(())
    }
}

async fn run_phases(tx: &mut dyn StoreTransaction, entries: &[OrderEntry]) -> Result<()> {
    // Phase 1: park every touched task on a disjoint negative key. Must fully
    // complete before phase 2; its correctness is what makes phase 2
    // collision-free among touched rows.
    for (position, entry) in entries.iter().enumerate() {
        let temporary = -(position as i32 + 1);
        let touched = tx.set_ordem(entry.id, temporary).await.map_err(translate)?;
        if touched == 0 {
            return Err(TarefasError::NotFound(entry.id));
        }
        debug!(id = entry.id, temporary, "displaced order key");
    }

    // Phase 2: write the requested keys.
    for entry in entries {
        let touched = tx.set_ordem(entry.id, entry.ordem).await.map_err(translate)?;
        if touched == 0 {
            return Err(TarefasError::NotFound(entry.id));
        }
        debug!(id = entry.id, ordem = entry.ordem, "assigned final order key");
    }

    Ok(())
}
