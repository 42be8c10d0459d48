//! Shared harness for the API tests: an in-memory data store behind the
//! real router.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::Value;
use storefront_backend::{
    config::{AdminConfig, Config},
    create_app,
    models::StoreRecord,
    repositories::{DataStores, MemoryDataStore},
    AppState,
};
use tower::ServiceExt;

pub const ADMIN_TOKEN: &str = "test-admin-token";

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryDataStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_token(ADMIN_TOKEN)
    }

    pub fn with_token(token: &str) -> Self {
        let store = Arc::new(MemoryDataStore::new());
        let config = Config {
            admin: AdminConfig {
                api_token: token.to_string(),
            },
            ..Config::default()
        };
        let state = AppState::new(DataStores::from_shared(store.clone()), config);

        Self {
            router: create_app(state),
            store,
        }
    }

    pub async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        self.router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }

    pub async fn admin_get(&self, uri: &str) -> Response {
        self.send(Method::GET, uri, Some(ADMIN_TOKEN), None).await
    }

    pub async fn admin_put(&self, uri: &str, body: Value) -> Response {
        self.send(Method::PUT, uri, Some(ADMIN_TOKEN), Some(body)).await
    }

    /// Save a complete, valid store through the admin API
    #[allow(dead_code)]
    pub async fn seed(&self, record: &StoreRecord) {
        let response = self
            .admin_put(
                &format!("/api/v1/admin/stores/{}", record.location),
                serde_json::to_value(record).unwrap(),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK, "seeding {}", record.location);
    }
}

pub async fn parse_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[allow(dead_code)]
pub fn store(location: &str, name: &str) -> StoreRecord {
    let mut record = StoreRecord::new(location);
    record.store_name = name.to_string();
    record.phone = "(615) 815-6734".to_string();
    record.email = "hello@example.com".to_string();
    record.address = "1004 US-70".to_string();
    record.city = name.to_string();
    record.state = "Tennessee".to_string();
    record.zip_code = "37185".to_string();
    record
}
