//! Session token implementation.
//!
//! A session is an HS256-signed claims blob carried by the browser in an
//! HttpOnly cookie. The secret is process-wide, set once at startup.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quill_core::ports::{AuthError, SessionClaims, SessionService};

const DEFAULT_SECRET: &str = "change-me-in-production";

/// Session signing configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub secret: String,
    pub ttl_hours: i64,
    pub issuer: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
            ttl_hours: 24,
            issuer: "quill".to_string(),
        }
    }
}

/// Internal claims structure for serialization.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // user_id
    name: String,
    role: String,
    exp: i64,    // expiration timestamp
    iat: i64,    // issued at
    iss: String, // issuer
}

/// Signed-token session service.
pub struct TokenSessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: SessionConfig,
}

impl TokenSessionService {
    pub fn new(config: SessionConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            encoding_key,
            decoding_key,
            config,
        }
    }
}

impl SessionService for TokenSessionService {
    fn issue(&self, user_id: Uuid, name: &str, role: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + TimeDelta::hours(self.config.ttl_hours);

        let claims = Claims {
            sub: user_id.to_string(),
            name: name.to_string(),
            role: role.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidSession(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::SessionExpired,
                _ => AuthError::InvalidSession(e.to_string()),
            }
        })?;

        let user_id = Uuid::parse_str(&token_data.claims.sub)
            .map_err(|e| AuthError::InvalidSession(e.to_string()))?;

        Ok(SessionClaims {
            user_id,
            name: token_data.claims.name,
            role: token_data.claims.role,
            exp: token_data.claims.exp,
        })
    }

    fn ttl_seconds(&self) -> i64 {
        self.config.ttl_hours * 3600
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SessionConfig {
        SessionConfig {
            secret: "test-secret-key".to_string(),
            ttl_hours: 1,
            issuer: "test-issuer".to_string(),
        }
    }

    #[test]
    fn issue_and_verify() {
        let service = TokenSessionService::new(test_config());
        let user_id = Uuid::new_v4();

        let token = service.issue(user_id, "Ada", "blogger").unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.name, "Ada");
        assert_eq!(claims.role, "blogger");
    }

    #[test]
    fn verify_rejects_garbage() {
        let service = TokenSessionService::new(test_config());

        let result = service.verify("not-a-token");

        assert!(matches!(result, Err(AuthError::InvalidSession(_))));
    }

    #[test]
    fn verify_rejects_foreign_secret() {
        let issuer = TokenSessionService::new(SessionConfig {
            secret: "secret-one".to_string(),
            ..test_config()
        });
        let verifier = TokenSessionService::new(SessionConfig {
            secret: "secret-two".to_string(),
            ..test_config()
        });

        let token = issuer.issue(Uuid::new_v4(), "Ada", "blogger").unwrap();
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn ttl_seconds_matches_config() {
        let service = TokenSessionService::new(SessionConfig {
            ttl_hours: 24,
            ..test_config()
        });
        assert_eq!(service.ttl_seconds(), 86400);
    }
}
