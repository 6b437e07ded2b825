//! Router-level tests: auth gating, validation ordering and error shapes,
//! driven through the real axum app over an in-memory database.

use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::util::ServiceExt;

use leafclutch_server::auth::JwtConfig;
use leafclutch_server::core::config::{Config, MediaSigningConfig, StorageConfig};
use leafclutch_server::db::DbService;
use leafclutch_server::db::models::AdminUser;
use leafclutch_server::db::repository::admin_user;
use leafclutch_server::{ServerState, build_app};

fn test_config() -> Config {
    Config {
        work_dir: "./data".to_string(),
        http_port: 0,
        database_path: ":memory:".to_string(),
        environment: "test".to_string(),
        jwt: JwtConfig {
            secret: "integration-test-secret-0123456789abcdef".to_string(),
            expiration_minutes: 60,
            issuer: "leafclutch-server".to_string(),
            audience: "leafclutch-admin".to_string(),
        },
        admin_username: "admin".to_string(),
        admin_password: None,
        storage: StorageConfig {
            endpoint: "http://127.0.0.1:1/v1".to_string(),
            project_id: "test".to_string(),
            api_key: "test".to_string(),
            bucket_id: "test".to_string(),
        },
        media_signing: MediaSigningConfig::default(),
    }
}

async fn test_state() -> ServerState {
    let db = DbService::new_in_memory().await.expect("in-memory database");
    ServerState::with_pool(test_config(), db.pool)
}

async fn seed_admin(state: &ServerState) -> i64 {
    let mut conn = state.pool.acquire().await.unwrap();
    let hash = AdminUser::hash_password("hunter2!").unwrap();
    admin_user::insert(&mut conn, "admin", "Site Admin", &hash)
        .await
        .unwrap()
}

fn bearer(state: &ServerState, id: i64) -> String {
    let token = state
        .jwt_service
        .generate_token(id, "admin", "Site Admin")
        .unwrap();
    format!("Bearer {token}")
}

async fn body_json(response: http::Response<axum::body::Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_endpoint_is_public() {
    let state = test_state().await;
    let app = build_app().with_state(state);

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn mutations_require_a_bearer_token() {
    let state = test_state().await;
    let app = build_app().with_state(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/admin/mentors")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"name":"ada"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_then_create_and_read_back_a_mentor() {
    let state = test_state().await;
    seed_admin(&state).await;
    let app = build_app().with_state(state.clone());

    // Login with the seeded credentials
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/admin/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"username":"admin","password":"hunter2!"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let login = body_json(response).await;
    let token = login["token"].as_str().unwrap().to_string();

    // Create a mentor with the issued token
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/admin/mentors")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::from(r#"{"name":" Ada Lovelace "}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["name"], "ada lovelace");

    // Read it back through the admin listing
    let response = app
        .oneshot(
            Request::builder()
                .uri("/admin/mentors")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn wrong_password_is_rejected_with_a_uniform_message() {
    let state = test_state().await;
    seed_admin(&state).await;
    let app = build_app().with_state(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/admin/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"username":"admin","password":"wrong"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Invalid username or password");
}

#[tokio::test]
async fn mismatched_opportunity_subtype_persists_nothing() {
    let state = test_state().await;
    let admin_id = seed_admin(&state).await;
    let auth = bearer(&state, admin_id);
    let app = build_app().with_state(state.clone());

    let payload = serde_json::json!({
        "title": "Backend Engineer",
        "type": "JOB",
        "job_details": { "employment_type": "Full-time", "salary_range": null },
        "internship_details": { "duration_months": 3, "stipend": null },
        "requirements": ["Rust"]
    });

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/admin/opportunities")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, &auth)
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // No partial opportunity row was created
    let mut conn = state.pool.acquire().await.unwrap();
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM opportunity")
        .fetch_one(&mut *conn)
        .await
        .unwrap();
    assert_eq!(count, 0);
    drop(conn);

    // The public listing agrees
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/admin/opportunities")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn guard_refusal_surfaces_as_bad_request_with_titles() {
    let state = test_state().await;
    let admin_id = seed_admin(&state).await;
    let auth = bearer(&state, admin_id);
    let app = build_app().with_state(state.clone());

    let mentor = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/admin/mentors")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, &auth)
                .body(Body::from(r#"{"name":"grace"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    let mentor = body_json(mentor).await;
    let mentor_id = mentor["id"].as_i64().unwrap();

    let training = serde_json::json!({
        "title": "Rust Bootcamp",
        "description": "Eight weeks of Rust",
        "base_price": 100.0,
        "benefits": ["Certificate"],
        "mentor_ids": [mentor_id]
    });
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/admin/trainings")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, &auth)
                .body(Body::from(training.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["effective_price"], 100.0);

    // Deleting the mentor is refused and names the training
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/admin/mentors/{mentor_id}"))
                .header(header::AUTHORIZATION, &auth)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("Rust Bootcamp"), "message: {message}");
    assert!(message.contains("1 training(s)"), "message: {message}");
}

#[tokio::test]
async fn signature_endpoint_reports_misconfiguration_distinctly() {
    let state = test_state().await;
    let admin_id = seed_admin(&state).await;
    let auth = bearer(&state, admin_id);
    let app = build_app().with_state(state);

    // media_signing is empty in the test config
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/admin/uploads/signature")
                .header(header::AUTHORIZATION, &auth)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["code"], "E9004");
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("Service not configured")
    );
}

#[tokio::test]
async fn training_listing_is_public_and_paginated() {
    let state = test_state().await;
    let app = build_app().with_state(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/admin/trainings?page=1&page_size=5")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["page"], 1);
    assert_eq!(body["page_size"], 5);
    assert_eq!(body["total"], 0);
}
