//! Orchestration of multi-row operations over the task store.
//!
//! Only one lives here: the atomic reorder. Everything else in the crate is
//! single-row CRUD.

pub mod reorder;

pub use reorder::{OrderEntry, ReorderCoordinator};
