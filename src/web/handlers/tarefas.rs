//! Task endpoints.
//!
//! The wire format keeps the original field names (`nomeTarefa`, `custo`,
//! `dataLimite`, `novaOrdem`). Request fields are `Option` so a missing field
//! yields a 400 with a useful message instead of Axum's deserialization
//! rejection. Due dates are rendered as `DD/MM/YYYY` in responses.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::models::tarefa::{self, Tarefa, TarefaUpdate};
use crate::orchestration::OrderEntry;
use crate::web::errors::{ApiError, ApiResult};
use crate::web::state::AppState;

/// A task as rendered on the wire, due date display-formatted.
#[derive(Debug, Serialize)]
pub struct TarefaView {
    pub id: i64,
    pub nome: String,
    pub custo: f64,
    pub data_limite: String,
    pub ordem: i32,
}

impl From<Tarefa> for TarefaView {
    fn from(t: Tarefa) -> Self {
        Self {
            id: t.id,
            nome: t.nome,
            custo: t.custo,
            data_limite: tarefa::format_data_limite(t.data_limite),
            ordem: t.ordem,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddTarefaRequest {
    #[serde(rename = "nomeTarefa")]
    pub nome_tarefa: Option<String>,
    pub custo: Option<f64>,
    #[serde(rename = "dataLimite")]
    pub data_limite: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EditTarefaRequest {
    pub id: Option<i64>,
    #[serde(rename = "nomeTarefa")]
    pub nome_tarefa: Option<String>,
    pub custo: Option<f64>,
    #[serde(rename = "dataLimite")]
    pub data_limite: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AtualizarOrdemRequest {
    /// Raw value so that a wrong-typed `novaOrdem` (string, number, object)
    /// reaches the handler and gets a 400 instead of failing extraction.
    #[serde(rename = "novaOrdem")]
    pub nova_ordem: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct OrderEntryPayload {
    pub id: Option<i64>,
    pub ordem: Option<i32>,
}

/// GET /getDados
pub async fn get_dados(State(state): State<AppState>) -> ApiResult<Json<Vec<TarefaView>>> {
    let tarefas = state.repository.list_all().await?;
    Ok(Json(tarefas.into_iter().map(TarefaView::from).collect()))
}

/// POST /addTarefa
pub async fn add_tarefa(
    State(state): State<AppState>,
    Json(request): Json<AddTarefaRequest>,
) -> ApiResult<(StatusCode, Json<TarefaView>)> {
    let (nome, custo, raw_date) = match (request.nome_tarefa, request.custo, request.data_limite) {
        (Some(nome), Some(custo), Some(raw_date)) if !nome.is_empty() => (nome, custo, raw_date),
        _ => {
            return Err(ApiError::bad_request(
                "nomeTarefa, custo and dataLimite are required",
            ))
        }
    };

    let data_limite = parse_date(&raw_date)?;
    let created = state.repository.create(&nome, custo, data_limite).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// PUT /editTarefa
pub async fn edit_tarefa(
    State(state): State<AppState>,
    Json(request): Json<EditTarefaRequest>,
) -> ApiResult<Json<TarefaView>> {
    let id = request
        .id
        .ok_or_else(|| ApiError::bad_request("id is required"))?;
    let (nome, custo, raw_date) = match (request.nome_tarefa, request.custo, request.data_limite) {
        (Some(nome), Some(custo), Some(raw_date)) if !nome.is_empty() => (nome, custo, raw_date),
        _ => {
            return Err(ApiError::bad_request(
                "nomeTarefa, custo and dataLimite are required",
            ))
        }
    };

    let data_limite = parse_date(&raw_date)?;
    let updated = state
        .repository
        .update(
            id,
            TarefaUpdate {
                nome,
                custo,
                data_limite,
            },
        )
        .await?;
    Ok(Json(updated.into()))
}

/// DELETE /deletarTarefa/{id}
pub async fn deletar_tarefa(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    state.repository.delete(id).await?;
    Ok(Json(json!({ "message": "task deleted" })))
}

/// PUT /atualizarOrdem
pub async fn atualizar_ordem(
    State(state): State<AppState>,
    Json(request): Json<AtualizarOrdemRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let items = match request.nova_ordem {
        Some(serde_json::Value::Array(items)) if !items.is_empty() => items,
        _ => {
            return Err(ApiError::bad_request(
                "novaOrdem must be a non-empty array",
            ))
        }
    };

    let entries = items
        .into_iter()
        .map(|item| {
            let entry: OrderEntryPayload = serde_json::from_value(item)
                .map_err(|_| ApiError::bad_request("every novaOrdem entry needs id and ordem"))?;
            match (entry.id, entry.ordem) {
                (Some(id), Some(ordem)) => Ok(OrderEntry { id, ordem }),
                _ => Err(ApiError::bad_request(
                    "every novaOrdem entry needs id and ordem",
                )),
            }
        })
        .collect::<ApiResult<Vec<_>>>()?;

    state.coordinator.apply(&entries).await?;
    info!(count = entries.len(), "order updated");
    Ok(Json(json!({ "message": "order updated" })))
}

fn parse_date(raw: &str) -> ApiResult<chrono::NaiveDate> {
    tarefa::parse_data_limite(raw)
        .ok_or_else(|| ApiError::bad_request(format!("invalid dataLimite: {raw:?}")))
}
