use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::display_date_now;

/// Post entity - a blog article owned by exactly one user.
///
/// `date` is the human-readable creation date; it is fixed at creation and
/// survives edits unchanged, as do `author_id` and `created_at`. The listing
/// pages sort on `created_at`, never on the display string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub img_url: String,
    pub date: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post dated today.
    pub fn new(
        author_id: Uuid,
        title: String,
        subtitle: String,
        body: String,
        img_url: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            title,
            subtitle,
            body,
            img_url,
            date: display_date_now(),
            created_at: Utc::now(),
        }
    }

    /// Apply an edit. The author and creation date are not part of the edit
    /// form and stay as they were.
    pub fn edited(mut self, title: String, subtitle: String, body: String, img_url: String) -> Self {
        self.title = title;
        self.subtitle = subtitle;
        self.body = body;
        self.img_url = img_url;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_preserves_author_and_date() {
        let author = Uuid::new_v4();
        let post = Post::new(
            author,
            "T1".into(),
            "S1".into(),
            "B1".into(),
            "https://example.com/a.jpg".into(),
        );
        let date = post.date.clone();
        let created_at = post.created_at;
        let id = post.id;

        let edited = post.edited(
            "T2".into(),
            "S2".into(),
            "B2".into(),
            "https://example.com/b.jpg".into(),
        );

        assert_eq!(edited.id, id);
        assert_eq!(edited.author_id, author);
        assert_eq!(edited.date, date);
        assert_eq!(edited.created_at, created_at);
        assert_eq!(edited.title, "T2");
    }

    #[test]
    fn new_post_date_is_display_formatted() {
        let post = Post::new(
            Uuid::new_v4(),
            "T".into(),
            "S".into(),
            "B".into(),
            "https://example.com/a.jpg".into(),
        );
        // "August 30, 2026" style: month name, space, day, comma, year.
        assert!(post.date.contains(", "));
        assert!(post.date.chars().next().unwrap().is_ascii_alphabetic());
    }
}
