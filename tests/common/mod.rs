//! Shared test harness: an application over the in-memory store, plus request
//! helpers for driving the router in-process.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use tarefas_core::store::memory::MemoryStore;
use tarefas_core::store::TaskStore;
use tarefas_core::web::create_app;
use tarefas_core::web::state::AppState;

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

pub fn test_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone() as Arc<dyn TaskStore>);
    TestApp {
        router: create_app(state),
        store,
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        self.router
            .clone()
            .oneshot(builder.body(body).expect("request build"))
            .await
            .expect("infallible")
    }

    pub async fn add_tarefa(&self, nome: &str, custo: f64, data_limite: &str) -> serde_json::Value {
        let response = self
            .request(
                Method::POST,
                "/addTarefa",
                Some(serde_json::json!({
                    "nomeTarefa": nome,
                    "custo": custo,
                    "dataLimite": data_limite,
                })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await
    }
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}
