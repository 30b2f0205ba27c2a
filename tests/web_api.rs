//! End-to-end tests of the HTTP surface, driven in-process over the
//! in-memory store.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{body_json, test_app};

#[tokio::test]
async fn root_greets() {
    let app = test_app();
    let response = app.request(Method::GET, "/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn health_reports_healthy() {
    let app = test_app();
    let response = app.request(Method::GET, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn add_tarefa_creates_with_sequential_ordem() {
    let app = test_app();
    let first = app.add_tarefa("comprar pão", 5.5, "2025-04-01").await;
    let second = app.add_tarefa("pagar contas", 120.0, "2025-04-02").await;

    assert_eq!(first["ordem"], 1);
    assert_eq!(second["ordem"], 2);
    assert_eq!(first["nome"], "comprar pão");
    // Due dates render display-formatted.
    assert_eq!(first["data_limite"], "01/04/2025");
}

#[tokio::test]
async fn add_tarefa_missing_field_is_400() {
    let app = test_app();
    let response = app
        .request(
            Method::POST,
            "/addTarefa",
            Some(json!({ "nomeTarefa": "x", "custo": 1.0 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "BAD_REQUEST");
}

#[tokio::test]
async fn add_tarefa_duplicate_name_is_400() {
    let app = test_app();
    app.add_tarefa("X", 1.0, "2025-04-01").await;

    let response = app
        .request(
            Method::POST,
            "/addTarefa",
            Some(json!({ "nomeTarefa": "X", "custo": 2.0, "dataLimite": "2025-04-02" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Exactly one "X" stored.
    let list = body_json(app.request(Method::GET, "/getDados", None).await).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn add_tarefa_invalid_date_is_400() {
    let app = test_app();
    let response = app
        .request(
            Method::POST,
            "/addTarefa",
            Some(json!({ "nomeTarefa": "x", "custo": 1.0, "dataLimite": "soon" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_dados_lists_all() {
    let app = test_app();
    app.add_tarefa("a", 1.0, "2025-04-01").await;
    app.add_tarefa("b", 2.0, "15/05/2025").await;

    let response = app.request(Method::GET, "/getDados", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let list = body_json(response).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 2);
    // Accepted display-format input round-trips to display format.
    assert_eq!(list[1]["data_limite"], "15/05/2025");
}

#[tokio::test]
async fn edit_tarefa_round_trip() {
    let app = test_app();
    let created = app.add_tarefa("a", 1.0, "2025-04-01").await;
    let id = created["id"].as_i64().unwrap();

    let response = app
        .request(
            Method::PUT,
            "/editTarefa",
            Some(json!({
                "id": id,
                "nomeTarefa": "a",
                "custo": 42.5,
                "dataLimite": "2026-01-31",
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], id);
    assert_eq!(body["custo"], 42.5);
    assert_eq!(body["data_limite"], "31/01/2026");
    assert_eq!(body["ordem"], created["ordem"]);
}

#[tokio::test]
async fn edit_tarefa_without_id_is_400() {
    let app = test_app();
    let response = app
        .request(
            Method::PUT,
            "/editTarefa",
            Some(json!({ "nomeTarefa": "a", "custo": 1.0, "dataLimite": "2025-04-01" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn edit_tarefa_unknown_id_is_404() {
    let app = test_app();
    let response = app
        .request(
            Method::PUT,
            "/editTarefa",
            Some(json!({
                "id": 999,
                "nomeTarefa": "a",
                "custo": 1.0,
                "dataLimite": "2025-04-01",
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deletar_tarefa_deletes_once() {
    let app = test_app();
    let created = app.add_tarefa("a", 1.0, "2025-04-01").await;
    let id = created["id"].as_i64().unwrap();

    let response = app
        .request(Method::DELETE, &format!("/deletarTarefa/{id}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .request(Method::DELETE, &format!("/deletarTarefa/{id}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn atualizar_ordem_swaps_tasks() {
    let app = test_app();
    let a = app.add_tarefa("a", 1.0, "2025-04-01").await;
    let b = app.add_tarefa("b", 2.0, "2025-04-02").await;

    let response = app
        .request(
            Method::PUT,
            "/atualizarOrdem",
            Some(json!({
                "novaOrdem": [
                    { "id": a["id"], "ordem": 2 },
                    { "id": b["id"], "ordem": 1 },
                ]
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let snapshot = app.store.ordem_snapshot();
    assert_eq!(snapshot[&a["id"].as_i64().unwrap()], 2);
    assert_eq!(snapshot[&b["id"].as_i64().unwrap()], 1);
}

#[tokio::test]
async fn atualizar_ordem_empty_array_is_400() {
    let app = test_app();
    let response = app
        .request(Method::PUT, "/atualizarOrdem", Some(json!({ "novaOrdem": [] })))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn atualizar_ordem_wrong_type_is_400() {
    let app = test_app();
    for bad in [json!("abc"), json!(7), json!({ "id": 1, "ordem": 1 })] {
        let response = app
            .request(
                Method::PUT,
                "/atualizarOrdem",
                Some(json!({ "novaOrdem": bad })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn atualizar_ordem_negative_ordem_is_400() {
    let app = test_app();
    let a = app.add_tarefa("a", 1.0, "2025-04-01").await;
    let response = app
        .request(
            Method::PUT,
            "/atualizarOrdem",
            Some(json!({ "novaOrdem": [{ "id": a["id"], "ordem": -1 }] })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn atualizar_ordem_entry_missing_ordem_is_400() {
    let app = test_app();
    let a = app.add_tarefa("a", 1.0, "2025-04-01").await;
    let response = app
        .request(
            Method::PUT,
            "/atualizarOrdem",
            Some(json!({ "novaOrdem": [{ "id": a["id"] }] })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn atualizar_ordem_unknown_id_is_404_and_rolls_back() {
    let app = test_app();
    let a = app.add_tarefa("a", 1.0, "2025-04-01").await;
    let before = app.store.ordem_snapshot();

    let response = app
        .request(
            Method::PUT,
            "/atualizarOrdem",
            Some(json!({
                "novaOrdem": [
                    { "id": a["id"], "ordem": 5 },
                    { "id": 9999, "ordem": 1 },
                ]
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.store.ordem_snapshot(), before);
}

#[tokio::test]
async fn atualizar_ordem_duplicate_targets_is_500() {
    let app = test_app();
    let a = app.add_tarefa("a", 1.0, "2025-04-01").await;
    let b = app.add_tarefa("b", 2.0, "2025-04-02").await;

    let response = app
        .request(
            Method::PUT,
            "/atualizarOrdem",
            Some(json!({
                "novaOrdem": [
                    { "id": a["id"], "ordem": 1 },
                    { "id": b["id"], "ordem": 1 },
                ]
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
