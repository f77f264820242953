//! JWT authentication middleware for protecting API endpoints.
//!
//! This middleware extracts the bearer token from the Authorization header,
//! verifies its HS256 signature and expiry, and injects the caller's
//! identity into the request. Tokens are issued by an external identity
//! provider; the API never signs them.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use kloom_core::domain::entities::UserId;
use kloom_shared::config::JwtConfig;
use kloom_shared::errors::{error_codes, ErrorResponse};
use serde::{Deserialize, Serialize};
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

/// Claims carried by access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id, as a decimal string
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Issuer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// User authentication context injected into requests
#[derive(Debug, Clone, PartialEq)]
pub struct AuthContext {
    /// User ID extracted from the `sub` claim
    pub user_id: UserId,
}

impl AuthContext {
    /// Creates a new authentication context from JWT claims
    pub fn from_claims(claims: Claims) -> Result<Self, String> {
        let user_id = claims
            .sub
            .parse::<UserId>()
            .map_err(|_| format!("Subject is not a user id: {}", claims.sub))?;
        Ok(Self { user_id })
    }
}

/// JWT authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    config: Arc<JwtConfig>,
}

impl JwtAuth {
    /// Creates a new JWT authentication middleware
    pub fn new(config: JwtConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Creates a new JWT authentication middleware with a specific secret
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self::new(JwtConfig::new(secret))
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            config: Arc::clone(&self.config),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    config: Arc<JwtConfig>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let config = Arc::clone(&self.config);

        Box::pin(async move {
            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => {
                    return Ok(reject(req, "Missing or invalid Authorization header"));
                }
            };

            let auth_context = match verify_token(&token, &config) {
                Ok(context) => context,
                Err(e) => {
                    log::warn!("Rejected bearer token on {}: {}", req.path(), e);
                    return Ok(reject(req, "Invalid or expired token"));
                }
            };

            req.extensions_mut().insert(auth_context);
            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}

/// Short-circuit with a 401 carrying the standard JSON error body
fn reject<B>(req: ServiceRequest, message: &str) -> ServiceResponse<EitherBody<B>> {
    let body = ErrorResponse::new(error_codes::UNAUTHORIZED, message);
    req.into_response(HttpResponse::Unauthorized().json(body))
        .map_into_right_body()
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Verify signature, expiry and (when configured) issuer
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<AuthContext, String> {
    let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = config.leeway;
    if let Some(issuer) = &config.issuer {
        validation.set_issuer(&[issuer]);
        validation.set_required_spec_claims(&["exp", "iss"]);
    }

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| format!("Token decode error: {}", e))?;

    AuthContext::from_claims(token_data.claims)
}

/// 401 with the standard JSON error body
fn unauthorized(message: &'static str) -> Error {
    let body = ErrorResponse::new(error_codes::UNAUTHORIZED, message);
    InternalError::from_response(message, HttpResponse::Unauthorized().json(body)).into()
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| unauthorized("Authentication required"));

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token(secret: &str, claims: &Claims) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims(sub: &str, exp_offset: i64) -> Claims {
        Claims {
            sub: sub.to_string(),
            exp: chrono::Utc::now().timestamp() + exp_offset,
            iat: None,
            iss: None,
        }
    }

    #[test]
    fn test_extract_bearer_token() {
        use actix_web::test;

        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_srv_request();

        assert_eq!(extract_bearer_token(&req), Some("test_token_123".to_string()));

        let req_no_bearer = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_srv_request();

        assert_eq!(extract_bearer_token(&req_no_bearer), None);

        let req_no_header = test::TestRequest::default().to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_header), None);
    }

    #[test]
    fn test_verify_token() {
        let config = JwtConfig::new("secret");

        let context = verify_token(&token("secret", &claims("42", 600)), &config).unwrap();
        assert_eq!(context.user_id, 42);

        assert!(verify_token(&token("other", &claims("42", 600)), &config).is_err());
        assert!(verify_token(&token("secret", &claims("42", -3600)), &config).is_err());
        assert!(verify_token(&token("secret", &claims("alice", 600)), &config).is_err());
    }

    #[test]
    fn test_verify_token_checks_issuer() {
        let config = JwtConfig::new("secret").with_issuer("kloom-idp");

        let mut issued = claims("7", 600);
        assert!(verify_token(&token("secret", &issued), &config).is_err());

        issued.iss = Some("someone-else".to_string());
        assert!(verify_token(&token("secret", &issued), &config).is_err());

        issued.iss = Some("kloom-idp".to_string());
        assert_eq!(
            verify_token(&token("secret", &issued), &config)
                .unwrap()
                .user_id,
            7
        );
    }
}
