//! Shared application state for the web layer.

use std::sync::Arc;

use crate::orchestration::ReorderCoordinator;
use crate::repository::TarefaRepository;
use crate::store::TaskStore;

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<TarefaRepository>,
    pub coordinator: Arc<ReorderCoordinator>,
    pub store: Arc<dyn TaskStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self {
            repository: Arc::new(TarefaRepository::new(Arc::clone(&store))),
            coordinator: Arc::new(ReorderCoordinator::new(Arc::clone(&store))),
            store,
        }
    }
}
