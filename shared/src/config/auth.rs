//! Authentication configuration
//!
//! Kloom does not issue tokens itself; an external identity provider signs
//! access tokens and the API only verifies them. Passwords are hashed with
//! bcrypt before they reach the store.

use serde::{Deserialize, Serialize};

/// JWT verification configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct JwtConfig {
    /// Shared secret used to verify HS256 signatures
    pub secret: String,

    /// Expected issuer claim, if any
    pub issuer: Option<String>,

    /// Allowed clock skew in seconds when checking `exp`
    pub leeway: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            issuer: None,
            leeway: 60,
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Require a specific issuer claim
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// bcrypt work factor for password hashes (4..=31)
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_SECRET.to_string());
        let issuer = std::env::var("JWT_ISSUER").ok();
        let bcrypt_cost = std::env::var("BCRYPT_COST")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_BCRYPT_COST);

        Self {
            jwt: JwtConfig {
                secret,
                issuer,
                ..Default::default()
            },
            bcrypt_cost,
        }
    }

    /// Get JWT secret
    pub fn jwt_secret(&self) -> &str {
        &self.jwt.secret
    }
}

const DEFAULT_SECRET: &str = "development-secret-please-change-in-production";
const DEFAULT_BCRYPT_COST: u32 = 12;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.leeway, 60);
        assert!(config.issuer.is_none());
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("my-secret").with_issuer("kloom-idp");

        assert_eq!(config.issuer.as_deref(), Some("kloom-idp"));
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_auth_config_default_cost() {
        let config = AuthConfig::default();
        assert_eq!(config.bcrypt_cost, 12);
        assert_eq!(config.jwt_secret(), DEFAULT_SECRET);
    }
}
