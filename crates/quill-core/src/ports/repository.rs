use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, Post, User};
use crate::error::RepoError;

/// User repository.
///
/// Users are created at registration and never destroyed; there is no delete.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. A taken email surfaces as `RepoError::Conflict`.
    async fn insert(&self, user: User) -> Result<User, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;

    /// Find a user by their email address (login lookup).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a new post. A taken title surfaces as `RepoError::Conflict`.
    async fn insert(&self, post: Post) -> Result<Post, RepoError>;

    /// Update an existing post in place.
    async fn update(&self, post: Post) -> Result<Post, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// All posts in creation order, oldest first.
    async fn find_all(&self) -> Result<Vec<Post>, RepoError>;

    /// Delete a post together with all of its comments, atomically.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

/// Comment repository. Comments are only ever created and listed; they go
/// away through the post cascade, never individually.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Insert a comment. The referenced post must exist.
    async fn insert(&self, comment: Comment) -> Result<Comment, RepoError>;

    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;
}
