//! In-memory repositories.
//!
//! Used when no database is configured (the server still comes up, with a
//! startup warning) and by the web tests. Data is lost on process restart.
//!
//! One `MemoryStore` backs all three repositories so the post-delete cascade
//! can reach the comments, mirroring what the schema does with its foreign
//! keys.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Comment, Post, User};
use quill_core::error::RepoError;
use quill_core::ports::{CommentRepository, PostRepository, UserRepository};

/// Shared backing store. Posts and comments are kept in insertion order,
/// which is creation order, so listing pages come out the same as from the
/// database adapter.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    posts: RwLock<Vec<Post>>,
    comments: RwLock<Vec<Comment>>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

/// In-memory user repository.
pub struct MemoryUserRepository {
    store: Arc<MemoryStore>,
}

impl MemoryUserRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.store.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(RepoError::Conflict("users.email".to_string()));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.store.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .store
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }
}

/// In-memory post repository.
pub struct MemoryPostRepository {
    store: Arc<MemoryStore>,
}

impl MemoryPostRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.store.posts.write().await;

        if posts.iter().any(|p| p.title == post.title) {
            return Err(RepoError::Conflict("blog_posts.title".to_string()));
        }

        posts.push(post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.store.posts.write().await;

        if posts
            .iter()
            .any(|p| p.id != post.id && p.title == post.title)
        {
            return Err(RepoError::Conflict("blog_posts.title".to_string()));
        }

        let slot = posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or(RepoError::NotFound)?;
        *slot = post.clone();
        Ok(post)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self
            .store
            .posts
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.store.posts.read().await.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        // Lock order: posts before comments, same as every other path.
        let mut posts = self.store.posts.write().await;
        let mut comments = self.store.comments.write().await;

        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(RepoError::NotFound);
        }

        comments.retain(|c| c.post_id != id);
        Ok(())
    }
}

/// In-memory comment repository.
pub struct MemoryCommentRepository {
    store: Arc<MemoryStore>,
}

impl MemoryCommentRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CommentRepository for MemoryCommentRepository {
    async fn insert(&self, comment: Comment) -> Result<Comment, RepoError> {
        let posts = self.store.posts.write().await;
        let mut comments = self.store.comments.write().await;

        if !posts.iter().any(|p| p.id == comment.post_id) {
            return Err(RepoError::NotFound);
        }

        comments.push(comment.clone());
        Ok(comment)
    }

    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        Ok(self
            .store
            .comments
            .read()
            .await
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }
}
