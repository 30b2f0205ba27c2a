//! Domain error taxonomy shared by the repository, the reorder coordinator,
//! and the web layer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TarefasError {
    /// Malformed or missing input; the client can fix and retry.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A task with this name already exists.
    #[error("a task named {0:?} already exists")]
    DuplicateName(String),

    /// No task with the given id.
    #[error("task {0} not found")]
    NotFound(i64),

    /// The store rejected a write that would break a uniqueness invariant.
    /// Not user-correctable through this API; surfaced as a server error.
    #[error("uniqueness constraint violated: {0}")]
    ConstraintViolation(String),

    /// Connectivity or transactional failure in the store.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

pub type Result<T> = std::result::Result<T, TarefasError>;
