//! Integration tests for JWT authentication middleware

#[macro_use]
mod common;

use actix_web::{http::header, http::StatusCode, test, web, App, HttpResponse};
use serde_json::{json, Value};

use kloom_api::middleware::auth::{AuthContext, JwtAuth};
use common::{token_with, SECRET};

async fn whoami(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(json!({ "user_id": auth.user_id }))
}

#[actix_web::test]
async fn test_middleware_requires_auth_header() {
    let app = test::init_service(
        App::new().route(
            "/protected",
            web::get().to(whoami).wrap(JwtAuth::with_secret(SECRET)),
        ),
    )
    .await;

    let req = test::TestRequest::get().uri("/protected").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[actix_web::test]
async fn test_middleware_rejects_bad_tokens() {
    let app = test::init_service(
        App::new().route(
            "/protected",
            web::get().to(whoami).wrap(JwtAuth::with_secret(SECRET)),
        ),
    )
    .await;

    let cases = [
        "Bearer invalid-token".to_string(),
        format!("Bearer {}", token_with(1, "some-other-secret", 3600)),
        format!("Bearer {}", token_with(1, SECRET, -3600)),
        format!("Basic {}", token_with(1, SECRET, 3600)),
    ];

    for value in cases {
        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header((header::AUTHORIZATION, value.clone()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{}", value);
    }
}

#[actix_web::test]
async fn test_middleware_injects_caller() {
    let app = test::init_service(
        App::new().route(
            "/protected",
            web::get().to(whoami).wrap(JwtAuth::with_secret(SECRET)),
        ),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/protected")
        .insert_header((
            header::AUTHORIZATION,
            format!("Bearer {}", token_with(42, SECRET, 3600)),
        ))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["user_id"], 42);
}

#[actix_web::test]
async fn test_auth_context_extractor_without_middleware() {
    let app = test::init_service(App::new().route("/protected", web::get().to(whoami))).await;

    let req = test::TestRequest::get().uri("/protected").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_public_routes_skip_authentication() {
    let app = init_app!();

    let req = test::TestRequest::get().uri("/properties").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/properties")
        .insert_header((header::AUTHORIZATION, "Bearer garbage"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/properties")
        .insert_header((header::AUTHORIZATION, "Bearer garbage"))
        .set_json(json!({ "title": "Flat", "address": "Seoul" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );
}
