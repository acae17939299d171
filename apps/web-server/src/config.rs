//! Application configuration loaded from environment variables.
//!
//! Loaded once at startup and immutable for the process lifetime.

use std::env;

use quill_infra::database::DatabaseConfig;
use quill_infra::SessionConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub session: SessionConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2),
        });

        let session = SessionConfig {
            secret: session_secret(),
            ttl_hours: env::var("SESSION_TTL_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(24),
            ..SessionConfig::default()
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            session,
        }
    }
}

/// Session signing secret. Anyone who knows the secret can mint sessions, so
/// running on the built-in default gets a loud warning.
fn session_secret() -> String {
    let default = SessionConfig::default().secret;
    match env::var("SESSION_SECRET") {
        Ok(secret) if secret != default => secret,
        _ => {
            tracing::warn!(
                "SESSION_SECRET is not set; session tokens are signed with the \
                 built-in default and can be forged. Set SESSION_SECRET for \
                 production use."
            );
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env mutation is process-global, so both directions live in one test.
    #[test]
    fn session_secret_prefers_env_and_falls_back_to_default() {
        unsafe { env::set_var("SESSION_SECRET", "from-the-environment") };
        assert_eq!(AppConfig::from_env().session.secret, "from-the-environment");

        unsafe { env::remove_var("SESSION_SECRET") };
        assert_eq!(
            AppConfig::from_env().session.secret,
            SessionConfig::default().secret
        );
    }
}
