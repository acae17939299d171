use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::display_date_now;

/// Comment entity - visitor feedback attached to a post.
///
/// Deliberately carries no author reference: anyone may comment, logged in
/// or not. Comments die with their post (cascade) and are never edited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub content: String,
    pub date: String,
}

impl Comment {
    /// Create a new comment on a post, dated today.
    pub fn new(post_id: Uuid, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id,
            content,
            date: display_date_now(),
        }
    }
}
