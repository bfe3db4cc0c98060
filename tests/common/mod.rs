#![allow(dead_code)]

use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    http::header,
    test, web,
};
use serde_json::{json, Value};
use taskdeck::{
    auth::{Claims, UserIdentity},
    config::AuthConfig,
    models::Task,
    state::AppState,
};
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration_test_secret";

pub fn test_state() -> web::Data<AppState> {
    web::Data::new(AppState::in_memory(AuthConfig::new(TEST_SECRET)))
}

/// A valid token for a random identity; tasks are not owned, so no account is needed.
pub fn token_for(state: &AppState) -> String {
    state
        .tokens
        .issue(&UserIdentity::new(Uuid::new_v4()))
        .expect("token should be issued")
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

/// Signs arbitrary claims with `secret`, for expired or foreign tokens.
pub fn sign_claims(claims: &Claims, secret: &str) -> String {
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        claims,
        &jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("claims should encode")
}

pub async fn create_task<S, B>(app: &S, token: &str, body: Value) -> Task
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/task/new")
        .insert_header(bearer(token))
        .set_json(&body)
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(
        resp.status(),
        actix_web::http::StatusCode::CREATED,
        "creating {} failed",
        body
    );
    test::read_body_json(resp).await
}

pub async fn create_named<S, B>(app: &S, token: &str, name: &str, is_completed: bool) -> Task
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    create_task(app, token, json!({ "name": name, "isCompleted": is_completed })).await
}

pub async fn list<S, B>(app: &S, path: &str) -> Vec<Task>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::get().uri(path).to_request();
    let resp = test::call_service(app, req).await;
    assert!(resp.status().is_success(), "GET {} failed: {}", path, resp.status());
    test::read_body_json(resp).await
}

pub fn names(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|task| task.name.as_str()).collect()
}
