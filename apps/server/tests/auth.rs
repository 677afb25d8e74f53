mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{build_test_app, get_json, post_json, register_user};

#[tokio::test]
async fn register_returns_user_and_working_token() {
    let (app, _guard) = build_test_app().await;

    let (status, body) = post_json(
        &app,
        "/api/auth/register",
        json!({ "name": "João Silva", "email": "joao@exemplo.com", "password": "123456" }),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "joao@exemplo.com");
    assert_eq!(body["user"]["name"], "João Silva");
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("passwordHash").is_none());
    assert_eq!(body["message"], "Usuário criado com sucesso");

    // The issued token grants access to protected routes.
    let token = body["token"].as_str().unwrap();
    let (status, _) = get_json(&app, "/api/portfolio", Some(token)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn register_rejects_missing_fields_and_short_password() {
    let (app, _guard) = build_test_app().await;

    let (status, body) = post_json(
        &app,
        "/api/auth/register",
        json!({ "email": "joao@exemplo.com", "password": "123456" }),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Nome, email e senha são obrigatórios");

    let (status, body) = post_json(
        &app,
        "/api/auth/register",
        json!({ "name": "João", "email": "joao@exemplo.com", "password": "12345" }),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Senha deve ter pelo menos 6 caracteres");
}

#[tokio::test]
async fn duplicate_email_fails_and_first_registration_survives() {
    let (app, _guard) = build_test_app().await;
    register_user(&app, "joao@exemplo.com").await;

    let (status, body) = post_json(
        &app,
        "/api/auth/register",
        json!({ "name": "Outro", "email": "joao@exemplo.com", "password": "abcdef" }),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email já está em uso");

    // First registration is unaffected: the original password still logs in.
    let (status, body) = post_json(
        &app,
        "/api/auth/login",
        json!({ "email": "joao@exemplo.com", "password": "123456" }),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].is_string());
}

#[tokio::test]
async fn login_rejects_wrong_credentials() {
    let (app, _guard) = build_test_app().await;
    register_user(&app, "joao@exemplo.com").await;

    let (status, body) = post_json(
        &app,
        "/api/auth/login",
        json!({ "email": "joao@exemplo.com", "password": "errada" }),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Credenciais inválidas");

    let (status, _) = post_json(
        &app,
        "/api/auth/login",
        json!({ "email": "ninguem@exemplo.com", "password": "123456" }),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_routes_fail_closed() {
    let (app, _guard) = build_test_app().await;

    // No token
    let (status, body) = get_json(&app, "/api/portfolio", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Não autorizado");

    // Garbage token
    let (status, _) = get_json(&app, "/api/portfolio", Some("nonsense")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Empty token
    let (status, _) = get_json(&app, "/api/portfolio", Some("")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn healthz_is_public() {
    let (app, _guard) = build_test_app().await;
    let (status, _) = get_json(&app, "/api/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
}
