//! Shared fixtures for the API integration tests
//!
//! The app under test runs the production route table over the in-memory
//! repositories. Tokens are signed here with the same secret the
//! middleware verifies.

#![allow(dead_code)]

use actix_web::{http::header, test::TestRequest, web};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};

use kloom_api::app::{configure, AppState};
use kloom_api::middleware::auth::Claims;
use kloom_core::repositories::{
    MockPropertyRepository, MockPropertyRequestRepository, MockUserRepository,
};
use kloom_core::services::UserServiceConfig;
use kloom_shared::config::JwtConfig;

pub const SECRET: &str = "integration-test-secret";

pub type TestState =
    AppState<MockUserRepository, MockPropertyRepository, MockPropertyRequestRepository>;

/// Fresh in-memory state; bcrypt cost 4 keeps hashing fast
pub fn state() -> web::Data<TestState> {
    web::Data::new(AppState::new(
        std::sync::Arc::new(MockUserRepository::new()),
        std::sync::Arc::new(MockPropertyRepository::new()),
        std::sync::Arc::new(MockPropertyRequestRepository::new()),
        UserServiceConfig::with_bcrypt_cost(4),
    ))
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    configure::<MockUserRepository, MockPropertyRepository, MockPropertyRequestRepository>(
        cfg,
        &JwtConfig::new(SECRET),
        64 * 1024,
    );
}

/// Build the app with fresh state; needs `#[macro_use] mod common;`
macro_rules! init_app {
    () => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(common::state())
                .configure(common::routes),
        )
        .await
    };
}

pub fn token_with(user_id: i64, secret: &str, exp_offset: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + exp_offset,
        iat: Some(now),
        iss: None,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub fn token_for(user_id: i64) -> String {
    token_with(user_id, SECRET, 3600)
}

/// Attach a valid bearer token for `user_id`
pub fn authed(request: TestRequest, user_id: i64) -> TestRequest {
    request.insert_header((
        header::AUTHORIZATION,
        format!("Bearer {}", token_for(user_id)),
    ))
}

pub fn new_user(email: &str, role: &str) -> TestRequest {
    TestRequest::post().uri("/users").set_json(json!({
        "email": email,
        "password": "correct-horse",
        "name": "Kim Minji",
        "phone": "010-1234-5678",
        "role": role,
    }))
}

pub fn new_property(agent_id: i64, title: &str) -> TestRequest {
    authed(TestRequest::post().uri("/properties"), agent_id).set_json(json!({
        "title": title,
        "address": "Seoul Mapo-gu",
        "area_m2": 33.06,
        "deposit": 10000000,
        "monthly_rent": 800000,
    }))
}

pub fn new_request(franchise_id: i64, preferences: Value) -> TestRequest {
    authed(TestRequest::post().uri("/property-requests"), franchise_id).set_json(json!({
        "title": "Cafe near Hongdae station",
        "region_preference": "Mapo-gu",
        "contact_name": "Lee",
        "contact_phone": "010-0000-0000",
        "preferences": preferences,
    }))
}

/// `data.id` of an envelope
pub fn id_of(body: &Value) -> i64 {
    body["data"]["id"].as_i64().expect("response should carry data.id")
}
