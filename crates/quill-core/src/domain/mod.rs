//! Domain entities - the core business objects.

mod comment;
mod post;
mod user;

pub use comment::Comment;
pub use post::Post;
pub use user::User;

/// Display format used for post and comment dates ("August 30, 2026").
///
/// The blog stores dates pre-formatted; they are never parsed back.
pub const DISPLAY_DATE_FORMAT: &str = "%B %d, %Y";

/// Today's date in the blog's display format.
pub fn display_date_now() -> String {
    chrono::Utc::now().format(DISPLAY_DATE_FORMAT).to_string()
}
