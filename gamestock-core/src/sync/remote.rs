//! Remote collection endpoints.
//!
//! `Remote` is the seam between the coordinator and the transport. The
//! coordinator runs on a single logical thread, so implementations need not
//! be `Send`.

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde_json::Value;

use super::error::SyncError;
use crate::models::{EntityId, EntityKind};

/// LIST / CREATE / UPDATE / DELETE for each collection.
#[async_trait(?Send)]
pub trait Remote {
    /// Fetches the full collection.
    async fn list(&self, kind: EntityKind) -> Result<Vec<Value>, SyncError>;

    /// Creates an entity; returns it with its assigned identity.
    async fn create(&self, kind: EntityKind, payload: &Value) -> Result<Value, SyncError>;

    /// Updates an entity; returns the server's copy.
    async fn update(&self, kind: EntityKind, id: EntityId, payload: &Value)
        -> Result<Value, SyncError>;

    /// Deletes an entity. The acknowledgment carries no body.
    async fn delete(&self, kind: EntityKind, id: EntityId) -> Result<(), SyncError>;
}

/// JSON-over-HTTP remote.
///
/// Collections live at `{server_url}{api_prefix}/{collection}`, items at
/// `.../{collection}/{id}`. Updates use `PATCH`.
#[derive(Debug, Clone)]
pub struct HttpRemote {
    server_url: String,
    api_prefix: String,
    client: reqwest::Client,
}

impl HttpRemote {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            api_prefix: String::new(),
            client: reqwest::Client::new(),
        }
    }

    /// Sets a path prefix such as `/api`. Slashes are normalized; an empty
    /// prefix addresses the collections at the server root.
    pub fn with_api_prefix(mut self, prefix: &str) -> Self {
        let trimmed = prefix.trim().trim_matches('/');
        self.api_prefix = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{}", trimmed)
        };
        self
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn api_prefix(&self) -> &str {
        &self.api_prefix
    }

    pub fn collection_url(&self, kind: EntityKind) -> String {
        self.build_http_url(&format!("{}/{}", self.api_prefix, kind.collection()))
    }

    pub fn item_url(&self, kind: EntityKind, id: EntityId) -> String {
        format!("{}/{}", self.collection_url(kind), id)
    }

    fn build_http_url(&self, path: &str) -> String {
        let base_url = if self.server_url.starts_with("http://")
            || self.server_url.starts_with("https://")
        {
            self.server_url.clone()
        } else {
            format!("http://{}", self.server_url)
        };

        format!("{}{}", base_url.trim_end_matches('/'), path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, SyncError> {
        let response = request
            .send()
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SyncError::Rejected {
                status: response.status().as_u16(),
            });
        }

        Ok(response)
    }

    async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, SyncError> {
        self.send(request)
            .await?
            .json()
            .await
            .map_err(|e| SyncError::Decode(e.to_string()))
    }
}

#[async_trait(?Send)]
impl Remote for HttpRemote {
    async fn list(&self, kind: EntityKind) -> Result<Vec<Value>, SyncError> {
        self.send_json(self.client.get(self.collection_url(kind)))
            .await
    }

    async fn create(&self, kind: EntityKind, payload: &Value) -> Result<Value, SyncError> {
        self.send_json(self.client.post(self.collection_url(kind)).json(payload))
            .await
    }

    async fn update(
        &self,
        kind: EntityKind,
        id: EntityId,
        payload: &Value,
    ) -> Result<Value, SyncError> {
        self.send_json(self.client.patch(self.item_url(kind, id)).json(payload))
            .await
    }

    async fn delete(&self, kind: EntityKind, id: EntityId) -> Result<(), SyncError> {
        self.send(self.client.delete(self.item_url(kind, id)))
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Path, State},
        http::StatusCode,
        routing::{get, patch},
        Json, Router,
    };
    use serde_json::json;
    use std::sync::Arc;
    use tokio::{net::TcpListener, sync::Mutex};

    #[derive(Clone, Default)]
    struct ServerState {
        requests: Arc<Mutex<Vec<(String, Value)>>>,
    }

    async fn list_games() -> Json<Value> {
        Json(json!([
            {"id": 1, "title": "Mega Man", "rating": "E", "console": "nintendo switch"},
            {"id": 2, "title": "Halo", "rating": "M", "console": "xbox"}
        ]))
    }

    async fn create_game(
        State(state): State<ServerState>,
        Json(mut body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        state.requests.lock().await.push(("POST".into(), body.clone()));
        body["id"] = json!(7);
        (StatusCode::CREATED, Json(body))
    }

    async fn update_game(
        State(state): State<ServerState>,
        Path(id): Path<i64>,
        Json(mut body): Json<Value>,
    ) -> Result<Json<Value>, StatusCode> {
        state.requests.lock().await.push(("PATCH".into(), body.clone()));
        if id == 404 {
            return Err(StatusCode::NOT_FOUND);
        }
        body["id"] = json!(id);
        Ok(Json(body))
    }

    async fn delete_game(Path(id): Path<i64>) -> StatusCode {
        if id == 404 {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::NO_CONTENT
        }
    }

    async fn list_stores() -> Json<Value> {
        Json(json!([{"id": 2, "name": "GameStop"}]))
    }

    async fn broken_listings() -> &'static str {
        "this is not json"
    }

    async fn failing_listings() -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    async fn spawn_server() -> (String, ServerState) {
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = ServerState::default();
        let app = Router::new()
            .route("/games", get(list_games).post(create_game))
            .route("/games/{id}", patch(update_game).delete(delete_game))
            .route("/api/stores", get(list_stores))
            .route("/listings", get(broken_listings).post(failing_listings))
            .with_state(state.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        (format!("http://{addr}"), state)
    }

    #[test]
    fn test_build_http_url() {
        let remote = HttpRemote::new("http://localhost:5555/");
        assert_eq!(remote.collection_url(EntityKind::Games), "http://localhost:5555/games");

        let remote = HttpRemote::new("localhost:5555");
        assert_eq!(remote.item_url(EntityKind::Stores, 2), "http://localhost:5555/stores/2");

        let remote = HttpRemote::new("https://catalog.example.com").with_api_prefix("api/");
        assert_eq!(
            remote.collection_url(EntityKind::Listings),
            "https://catalog.example.com/api/listings"
        );
    }

    #[test]
    fn test_empty_prefix() {
        let remote = HttpRemote::new("http://localhost:5555").with_api_prefix(" / ");
        assert_eq!(remote.api_prefix(), "");
    }

    #[tokio::test]
    async fn test_list() {
        let (url, _) = spawn_server().await;
        let remote = HttpRemote::new(url);
        let games = remote.list(EntityKind::Games).await.unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(games[1]["title"], "Halo");
    }

    #[tokio::test]
    async fn test_list_with_prefix() {
        let (url, _) = spawn_server().await;
        let remote = HttpRemote::new(url).with_api_prefix("/api");
        let stores = remote.list(EntityKind::Stores).await.unwrap();
        assert_eq!(stores[0]["name"], "GameStop");
    }

    #[tokio::test]
    async fn test_create_posts_payload() {
        let (url, state) = spawn_server().await;
        let remote = HttpRemote::new(url);
        let created = remote
            .create(EntityKind::Games, &json!({"title": "Halo", "console": "xbox"}))
            .await
            .unwrap();
        assert_eq!(created["id"], 7);

        let requests = state.requests.lock().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, "POST");
        assert_eq!(requests[0].1["title"], "Halo");
    }

    #[tokio::test]
    async fn test_update_uses_patch() {
        let (url, state) = spawn_server().await;
        let remote = HttpRemote::new(url);
        let updated = remote
            .update(EntityKind::Games, 3, &json!({"title": "Halo 2"}))
            .await
            .unwrap();
        assert_eq!(updated["id"], 3);
        assert_eq!(state.requests.lock().await[0].0, "PATCH");
    }

    #[tokio::test]
    async fn test_non_success_status_is_rejected() {
        let (url, _) = spawn_server().await;
        let remote = HttpRemote::new(url);

        let err = remote
            .update(EntityKind::Games, 404, &json!({"title": "Gone"}))
            .await
            .unwrap_err();
        assert_eq!(err, SyncError::Rejected { status: 404 });

        let err = remote.delete(EntityKind::Games, 404).await.unwrap_err();
        assert_eq!(err, SyncError::Rejected { status: 404 });

        let err = remote
            .create(EntityKind::Listings, &json!({}))
            .await
            .unwrap_err();
        assert_eq!(err, SyncError::Rejected { status: 500 });
    }

    #[tokio::test]
    async fn test_delete_ignores_empty_body() {
        let (url, _) = spawn_server().await;
        let remote = HttpRemote::new(url);
        assert!(remote.delete(EntityKind::Games, 2).await.is_ok());
    }

    #[tokio::test]
    async fn test_undecodable_body() {
        let (url, _) = spawn_server().await;
        let remote = HttpRemote::new(url);
        let err = remote.list(EntityKind::Listings).await.unwrap_err();
        assert!(matches!(err, SyncError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let remote = HttpRemote::new(format!("http://{addr}"));
        let err = remote.list(EntityKind::Games).await.unwrap_err();
        assert!(matches!(err, SyncError::Transport(_)));
    }
}
