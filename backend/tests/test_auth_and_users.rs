mod common;

use axum::http::StatusCode;
use common::{PASSWORD, TEST_SECRET, create_test_app};
use hbnb::JwtService;
use rstest::*;
use serde_json::json;

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();
    let response = app.get("/health", None).await;
    // Body is plain text, not JSON
    assert_eq!(response.0, StatusCode::OK);
}

#[tokio::test]
async fn test_register_and_fetch_user() {
    let app = create_test_app();
    let user_id = app.register("john@example.com").await;

    let (status, body) = app.get(&format!("/api/v1/users/{}", user_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "john@example.com");
    assert_eq!(body["is_admin"], false);
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());

    let (status, body) = app.get("/api/v1/users/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_register_ignores_is_admin() {
    let app = create_test_app();
    let (status, body) = app
        .post(
            "/api/v1/users",
            None,
            json!({
                "first_name": "Eve",
                "last_name": "Sneaky",
                "email": "eve@example.com",
                "password": PASSWORD,
                "is_admin": true,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let id = body["id"].as_str().unwrap();
    let (_, user) = app.get(&format!("/api/v1/users/{}", id), None).await;
    assert_eq!(user["is_admin"], false);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = create_test_app();
    app.register("john@example.com").await;

    let (status, body) = app
        .post(
            "/api/v1/users/",
            None,
            json!({
                "first_name": "John",
                "last_name": "Again",
                "email": "john@example.com",
                "password": PASSWORD,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Email already registered");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_registration_same_email() {
    let app = std::sync::Arc::new(create_test_app());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                app.post(
                    "/api/v1/users/",
                    None,
                    json!({
                        "first_name": "Racer",
                        "last_name": format!("No{}", i),
                        "email": "dup@example.com",
                        "password": PASSWORD,
                    }),
                )
                .await
            })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        let (status, body) = handle.await.unwrap();
        match status {
            StatusCode::CREATED => created += 1,
            StatusCode::CONFLICT => assert_eq!(body["error"], "Email already registered"),
            other => panic!("unexpected status {}: {}", other, body),
        }
    }
    assert_eq!(created, 1);

    let (_, users) = app.get("/api/v1/users/", None).await;
    assert_eq!(users.as_array().unwrap().len(), 1);
}

#[rstest]
#[case(json!({"first_name": "", "last_name": "Doe", "email": "a@example.com", "password": PASSWORD}))]
#[case(json!({"first_name": "Jane", "last_name": "Doe", "email": "not-an-email", "password": PASSWORD}))]
#[case(json!({"first_name": "Jane", "last_name": "Doe", "email": "a@example.com", "password": "short"}))]
#[case(json!({"first_name": "Jane", "last_name": "Doe"}))]
#[tokio::test]
async fn test_register_invalid_payload(#[case] payload: serde_json::Value) {
    let app = create_test_app();
    let (status, body) = app.post("/api/v1/users/", None, payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    use axum::body::Body;
    use axum::http::{Request, header};
    use tower::ServiceExt;

    let app = create_test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/users/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_user_is_not_found() {
    let app = create_test_app();
    let (status, body) = app
        .get(&format!("/api/v1/users/{}", uuid::Uuid::new_v4()), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");

    let (status, _) = app.get("/api/v1/users/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_login_and_protected() {
    let app = create_test_app();
    let user_id = app.register("john@example.com").await;
    let token = app.login("john@example.com").await;

    let (status, body) = app.get("/api/v1/auth/protected", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["admin"], false);
    assert!(body["message"].as_str().unwrap().contains(&user_id));

    let (status, body) = app.get("/api/v1/users/check-admin/", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_admin"], false);

    let (status, _) = app.get("/api/v1/users/protected", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = create_test_app();
    app.register("john@example.com").await;

    let (status, body) = app
        .post(
            "/api/v1/auth/login",
            None,
            json!({"email": "john@example.com", "password": "wrong-password"}),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_missing_and_invalid_token() {
    let app = create_test_app();

    let (status, body) = app.get("/api/v1/auth/protected", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Missing authorization header");

    let (status, body) = app.get("/api/v1/auth/protected", Some("garbage")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid or expired token");

    let foreign = JwtService::new("another_secret", chrono::Duration::minutes(60))
        .generate_token(uuid::Uuid::new_v4(), true)
        .unwrap();
    let (status, _) = app.get("/api/v1/auth/protected", Some(&foreign)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let app = create_test_app();
    let user_id = app.register("john@example.com").await;
    let expired = JwtService::new(TEST_SECRET, chrono::Duration::minutes(-10))
        .generate_token(user_id.parse().unwrap(), false)
        .unwrap();

    let (status, body) = app.get("/api/v1/auth/protected", Some(&expired)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn test_user_updates_self_but_not_others() {
    let app = create_test_app();
    let john = app.register("john@example.com").await;
    let jane = app.register("jane@example.com").await;
    let token = app.login("john@example.com").await;

    let (status, body) = app
        .put(
            &format!("/api/v1/users/{}", john),
            Some(&token),
            json!({"first_name": "Johnny"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["first_name"], "Johnny");
    assert_eq!(body["message"], "User updated successfully");

    let (status, body) = app
        .put(
            &format!("/api/v1/users/{}", jane),
            Some(&token),
            json!({"first_name": "Hacked"}),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Unauthorized");

    let (status, _) = app
        .put(
            &format!("/api/v1/users/{}", jane),
            None,
            json!({"first_name": "Hacked"}),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_user_cannot_change_credentials() {
    let app = create_test_app();
    let john = app.register("john@example.com").await;
    let token = app.login("john@example.com").await;

    let (status, body) = app
        .put(
            &format!("/api/v1/users/{}", john),
            Some(&token),
            json!({"email": "new@example.com"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "You cannot modify email or password.");

    let (status, _) = app
        .put(
            &format!("/api/v1/users/{}", john),
            Some(&token),
            json!({"password": "new-password"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // old password still works
    app.login("john@example.com").await;
}

#[tokio::test]
async fn test_user_cannot_grant_self_admin() {
    let app = create_test_app();
    let john = app.register("john@example.com").await;
    let token = app.login("john@example.com").await;

    let (status, body) = app
        .put(
            &format!("/api/v1/users/{}", john),
            Some(&token),
            json!({"is_admin": true}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_admin"], false);
}

#[tokio::test]
async fn test_update_missing_user() {
    let app = create_test_app();
    app.register("john@example.com").await;
    let token = app.login("john@example.com").await;

    let (status, body) = app
        .put(
            &format!("/api/v1/users/{}", uuid::Uuid::new_v4()),
            Some(&token),
            json!({"first_name": "Ghost"}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn test_admin_updates_credentials() {
    let app = create_test_app();
    app.seed_admin("admin@example.com").await;
    let admin_token = app.login("admin@example.com").await;
    let john = app.register("john@example.com").await;
    app.register("taken@example.com").await;

    let (status, body) = app
        .put(
            &format!("/api/v1/users/{}", john),
            Some(&admin_token),
            json!({"email": "taken@example.com"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email already in use");

    let (status, body) = app
        .put(
            &format!("/api/v1/users/{}", john),
            Some(&admin_token),
            json!({"email": "johnny@example.com"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "johnny@example.com");

    let (status, body) = app
        .put(
            &format!("/api/v1/auth/users/{}", john),
            Some(&admin_token),
            json!({"password": "brand-new-password"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);

    let (status, _) = app
        .post(
            "/api/v1/auth/login",
            None,
            json!({"email": "johnny@example.com", "password": "brand-new-password"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_admin_update_route_requires_admin() {
    let app = create_test_app();
    let john = app.register("john@example.com").await;
    let token = app.login("john@example.com").await;

    let (status, body) = app
        .put(
            &format!("/api/v1/auth/users/{}", john),
            Some(&token),
            json!({"first_name": "Johnny"}),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Admin privileges required");
}

#[tokio::test]
async fn test_admin_creates_admin_user() {
    let app = create_test_app();
    app.seed_admin("admin@example.com").await;
    let admin_token = app.login("admin@example.com").await;

    let payload = json!({
        "first_name": "Second",
        "last_name": "Admin",
        "email": "second@example.com",
        "password": PASSWORD,
    });
    let (status, body) = app
        .post("/api/v1/users/admin/", Some(&admin_token), payload.clone())
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User created by admin");

    let second_token = app.login("second@example.com").await;
    let (_, body) = app.get("/api/v1/users/check-admin/", Some(&second_token)).await;
    assert_eq!(body["is_admin"], true);

    let (status, body) = app
        .post("/api/v1/users/admin/", Some(&admin_token), payload)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email already registered");
}

#[tokio::test]
async fn test_non_admin_cannot_create_admin_user() {
    let app = create_test_app();
    app.register("john@example.com").await;
    let token = app.login("john@example.com").await;

    let (status, body) = app
        .post(
            "/api/v1/users/admin/",
            Some(&token),
            json!({
                "first_name": "Evil",
                "last_name": "Admin",
                "email": "evil@example.com",
                "password": PASSWORD,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Admin privileges required");
}
