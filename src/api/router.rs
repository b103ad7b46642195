use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::health;
use super::state::AppState;
use super::users;

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .route("/users", post(users::sign_up))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header::CONTENT_TYPE, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::domain::user::UniqueField;
    use crate::infrastructure::user::InMemoryUserStore;

    fn router(store: &InMemoryUserStore) -> Router {
        create_router_with_state(AppState::from_store(Arc::new(store.clone())))
    }

    fn post_users(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/users")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn jane() -> Value {
        json!({
            "name": "Jane Doe",
            "username": "janedoe",
            "emailAddress": "jane@example.com"
        })
    }

    #[tokio::test]
    async fn test_sign_up_creates_user() {
        let store = InMemoryUserStore::new();

        let response = router(&store).oneshot(post_users(jane())).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "User registered");
        assert_eq!(body["user"]["username"], "janedoe");
        assert_eq!(body["user"]["emailAddress"], "jane@example.com");

        let id = body["user"]["id"].as_str().unwrap();
        assert!(uuid::Uuid::parse_str(id).is_ok());
        assert!(store.find(UniqueField::Id, id).await.is_some());
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let store = InMemoryUserStore::new();
        router(&store).oneshot(post_users(jane())).await.unwrap();

        let response = router(&store)
            .oneshot(post_users(json!({
                "name": "Jane Again",
                "username": "janedoe",
                "emailAddress": "other@example.com"
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "User with username janedoe already exists");
        assert_eq!(body["code"], "duplicate_username");
        assert_eq!(body["field"], "username");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_invalid_email_is_bad_request() {
        let store = InMemoryUserStore::new();

        let response = router(&store)
            .oneshot(post_users(json!({
                "name": "Jane Doe",
                "username": "janedoe",
                "emailAddress": "not-an-email"
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Email invalid");
        assert_eq!(body["field"], "emailAddress");
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_missing_field_is_rejected_as_json() {
        let store = InMemoryUserStore::new();

        let response = router(&store)
            .oneshot(post_users(json!({ "name": "Jane Doe" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "invalid_json");
    }

    #[tokio::test]
    async fn test_store_outage_is_unavailable() {
        let store = InMemoryUserStore::new();
        store.set_should_fail(true);

        let response = router(&store).oneshot(post_users(jane())).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = body_json(response).await;
        assert_eq!(body["code"], "store_unavailable");
        assert!(body.get("field").is_none());
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let store = InMemoryUserStore::new();

        let health = router(&store).oneshot(get_request("/health")).await.unwrap();
        assert_eq!(health.status(), StatusCode::OK);

        let live = router(&store).oneshot(get_request("/live")).await.unwrap();
        assert_eq!(live.status(), StatusCode::OK);

        let ready = router(&store).oneshot(get_request("/ready")).await.unwrap();
        assert_eq!(ready.status(), StatusCode::OK);
        assert_eq!(store.opened_connections(), 1);
        assert_eq!(store.released_connections(), 1);
    }

    #[tokio::test]
    async fn test_ready_reports_store_outage() {
        let store = InMemoryUserStore::new();
        store.set_should_fail(true);

        let response = router(&store).oneshot(get_request("/ready")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = body_json(response).await;
        assert_eq!(body["status"], "unhealthy");
        assert_eq!(body["checks"][0]["name"], "user_store");
    }
}
