#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use hbnb::services::NewUser;
use hbnb::{AppState, Config, HbnbFacade, JwtService, create_router};
use serde_json::{Value, json};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test_secret";
pub const PASSWORD: &str = "password123";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

pub fn create_test_app() -> TestApp {
    let state = AppState::new(
        HbnbFacade::in_memory(),
        JwtService::new(TEST_SECRET, chrono::Duration::minutes(60)),
    );
    let router = create_router(state.clone(), &Config::default());
    TestApp { router, state }
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, token, None).await
    }

    /// Registers a regular user through the API and returns its id.
    pub async fn register(&self, email: &str) -> String {
        let (status, body) = self
            .post(
                "/api/v1/users/",
                None,
                json!({
                    "first_name": "Test",
                    "last_name": "User",
                    "email": email,
                    "password": PASSWORD,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
        body["id"].as_str().unwrap().to_string()
    }

    /// Admins can't be created through the public API, so seed one through the facade.
    pub async fn seed_admin(&self, email: &str) -> String {
        let admin = self
            .state
            .facade
            .create_user(NewUser {
                first_name: "Admin".to_string(),
                last_name: "User".to_string(),
                email: email.to_string(),
                password: PASSWORD.to_string(),
                is_admin: true,
            })
            .await
            .unwrap();
        admin.id().to_string()
    }

    pub async fn login(&self, email: &str) -> String {
        let (status, body) = self
            .post(
                "/api/v1/auth/login",
                None,
                json!({ "email": email, "password": PASSWORD }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body["access_token"].as_str().unwrap().to_string()
    }

    pub async fn create_place(&self, token: &str, title: &str) -> String {
        let (status, body) = self
            .post(
                "/api/v1/places/",
                Some(token),
                json!({
                    "title": title,
                    "description": "A nice place",
                    "price": 100.0,
                    "latitude": 37.77,
                    "longitude": -122.41,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create place failed: {}", body);
        body["id"].as_str().unwrap().to_string()
    }
}
