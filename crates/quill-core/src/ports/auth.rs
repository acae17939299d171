//! Authentication ports: password hashing and session tokens.

use uuid::Uuid;

/// Claims carried by a session token.
#[derive(Debug, Clone)]
pub struct SessionClaims {
    pub user_id: Uuid,
    pub name: String,
    pub role: String,
    pub exp: i64,
}

/// Session token service: binds an opaque client-held token to a user
/// identity. Issued at login/registration, verified on every request,
/// discarded at logout.
pub trait SessionService: Send + Sync {
    /// Issue a session token for a user.
    fn issue(&self, user_id: Uuid, name: &str, role: &str) -> Result<String, AuthError>;

    /// Verify a token and recover the identity bound to it.
    fn verify(&self, token: &str) -> Result<SessionClaims, AuthError>;

    /// Lifetime of issued tokens, in seconds.
    fn ttl_seconds(&self) -> i64;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a stored hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Session expired")]
    SessionExpired,

    #[error("Invalid session token: {0}")]
    InvalidSession(String),

    #[error("No session")]
    NoSession,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
