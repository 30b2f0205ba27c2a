//! # Web API Module
//!
//! Axum surface of the task list backend. Routes keep the wire names of the
//! original front-end contract.

pub mod errors;
pub mod handlers;
pub mod state;

use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the application router with all routes and middleware.
pub fn create_app(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health))
        .route("/getDados", get(handlers::tarefas::get_dados))
        .route("/addTarefa", post(handlers::tarefas::add_tarefa))
        .route("/editTarefa", put(handlers::tarefas::edit_tarefa))
        .route("/deletarTarefa/{id}", delete(handlers::tarefas::deletar_tarefa))
        .route("/atualizarOrdem", put(handlers::tarefas::atualizar_ordem))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
