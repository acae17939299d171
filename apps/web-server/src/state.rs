//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{CommentRepository, PostRepository, UserRepository};
use quill_infra::database::{self, DatabaseConfig};
use quill_infra::{
    MemoryCommentRepository, MemoryPostRepository, MemoryStore, MemoryUserRepository,
    PgCommentRepository, PgPostRepository, PgUserRepository,
};

/// Shared application state: one repository per entity.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// Without a configured (or reachable) database the server still comes
    /// up on in-memory repositories, loudly.
    pub async fn from_config(db_config: Option<&DatabaseConfig>) -> Self {
        match db_config {
            Some(config) => match database::connect(config).await {
                Ok(conn) => Self {
                    users: Arc::new(PgUserRepository::new(conn.clone())),
                    posts: Arc::new(PgPostRepository::new(conn.clone())),
                    comments: Arc::new(PgCommentRepository::new(conn)),
                },
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory repositories.",
                        e
                    );
                    Self::in_memory()
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory()
            }
        }
    }

    /// In-memory repositories over one shared store.
    pub fn in_memory() -> Self {
        let store = MemoryStore::new();
        Self {
            users: Arc::new(MemoryUserRepository::new(store.clone())),
            posts: Arc::new(MemoryPostRepository::new(store.clone())),
            comments: Arc::new(MemoryCommentRepository::new(store)),
        }
    }
}
