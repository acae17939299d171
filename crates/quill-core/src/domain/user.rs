use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role tag every self-registered user receives.
pub const ROLE_BLOGGER: &str = "blogger";

/// User entity - an account that can author posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new blogger with generated ID and creation timestamp.
    pub fn register(name: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            role: ROLE_BLOGGER.to_string(),
            created_at: Utc::now(),
        }
    }
}
