//! # Tarefas Core
//!
//! Backend for an ordered task list: create, list, edit, delete, and reorder
//! tasks persisted in PostgreSQL.
//!
//! Every task carries an integer order key (`ordem`) that is unique across the
//! whole table at every commit point. The interesting part of the crate is the
//! [`orchestration::ReorderCoordinator`], which rewrites the order keys of an
//! arbitrary permutation of tasks inside a single transaction using two-phase
//! key migration: touched rows are first parked on disjoint negative keys, then
//! assigned their final keys, so no intermediate write can trip the uniqueness
//! constraint.
//!
//! ## Module Organization
//!
//! - [`models`] - The `Tarefa` row type and its companions
//! - [`store`] - Task store seam: PostgreSQL and in-memory implementations
//! - [`repository`] - Typed CRUD over the store
//! - [`orchestration`] - The atomic reorder coordinator
//! - [`database`] - Connection management and migrations
//! - [`web`] - Axum handlers, routes, and error mapping
//! - [`config`] - Environment-derived configuration
//! - [`error`] - Domain error taxonomy

pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod models;
pub mod orchestration;
pub mod repository;
pub mod store;
pub mod web;

pub use config::TarefasConfig;
pub use error::{Result, TarefasError};
pub use models::{NewTarefa, Tarefa, TarefaUpdate};
pub use orchestration::{OrderEntry, ReorderCoordinator};
pub use repository::TarefaRepository;
