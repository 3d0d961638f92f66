#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! Each test gets its own in-memory SQLite database and a router built
//! from the real application code, driven through `tower::ServiceExt`
//! without binding a socket.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, header};
use axum::response::Response;
use http_body_util::BodyExt;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use osserva::AppState;
use osserva::{db, routes};

/// Test harness wrapping the assembled router.
pub struct TestApp {
    router: Router,
}

impl TestApp {
    /// Build an app over a fresh in-memory database.
    pub async fn spawn() -> Self {
        // A single long-lived connection: in-memory SQLite exists only
        // as long as its connection does.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .expect("failed to open in-memory database");

        db::init_schema(&pool).await.expect("failed to init schema");

        let router = Router::new()
            .merge(routes::health::router())
            .merge(routes::event::router())
            .with_state(AppState::from_pool(pool));

        Self { router }
    }

    /// Send a request through the router.
    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed")
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.request(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> Response {
        self.request(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn delete(&self, uri: &str) -> Response {
        self.request(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Create an event and return its assigned id.
    pub async fn create_event(&self, body: serde_json::Value) -> i64 {
        let response = self.post_json("/events", body).await;
        assert_eq!(response.status(), 201, "event creation failed");
        body_json(response).await["id"].as_i64().unwrap()
    }
}

/// Collect a response body as a string.
pub async fn body_string(response: Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body is not UTF-8")
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).expect("body is not JSON")
}

/// Ids of the data rows in a CSV export body, in document order.
pub fn csv_row_ids(csv: &str) -> Vec<i64> {
    csv.lines()
        .skip(1)
        .filter(|line| !line.is_empty())
        .map(|line| line.split(',').next().unwrap().parse().unwrap())
        .collect()
}
