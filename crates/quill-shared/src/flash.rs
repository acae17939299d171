//! One-shot flash messages.
//!
//! Flash messages travel between a redirect and the next render in a
//! short-lived cookie. The cookie holds a token from this closed vocabulary,
//! never free text, so cookie values stay plain ASCII identifiers.

/// Everything the app ever flashes at the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    LoggedIn,
    CredentialsIncorrect,
    EmailTaken,
    TitleTaken,
    CommentFailed,
    LoginRequired,
    StorageError,
}

impl Flash {
    /// Cookie-safe token.
    pub fn token(self) -> &'static str {
        match self {
            Flash::LoggedIn => "logged-in",
            Flash::CredentialsIncorrect => "credentials-incorrect",
            Flash::EmailTaken => "email-taken",
            Flash::TitleTaken => "title-taken",
            Flash::CommentFailed => "comment-failed",
            Flash::LoginRequired => "login-required",
            Flash::StorageError => "storage-error",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "logged-in" => Flash::LoggedIn,
            "credentials-incorrect" => Flash::CredentialsIncorrect,
            "email-taken" => Flash::EmailTaken,
            "title-taken" => Flash::TitleTaken,
            "comment-failed" => Flash::CommentFailed,
            "login-required" => Flash::LoginRequired,
            "storage-error" => Flash::StorageError,
            _ => return None,
        })
    }

    /// User-facing message text.
    pub fn message(self) -> &'static str {
        match self {
            Flash::LoggedIn => "Logged in successfully.",
            Flash::CredentialsIncorrect => {
                "User name or password entered incorrectly, please try again"
            }
            Flash::EmailTaken => "Email already registered. Please login.",
            Flash::TitleTaken => "A post with that title already exists.",
            Flash::CommentFailed => "Error occurred adding comment. Try again",
            Flash::LoginRequired => "Please log in to continue.",
            Flash::StorageError => "Something went wrong, please try again.",
        }
    }

    /// Whether this renders as an error or a notice.
    pub fn is_error(self) -> bool {
        !matches!(self, Flash::LoggedIn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Flash; 7] = [
        Flash::LoggedIn,
        Flash::CredentialsIncorrect,
        Flash::EmailTaken,
        Flash::TitleTaken,
        Flash::CommentFailed,
        Flash::LoginRequired,
        Flash::StorageError,
    ];

    #[test]
    fn tokens_round_trip() {
        for flash in ALL {
            assert_eq!(Flash::from_token(flash.token()), Some(flash));
        }
        assert_eq!(Flash::from_token("garbage"), None);
    }

    #[test]
    fn tokens_are_cookie_safe() {
        for flash in ALL {
            assert!(
                flash
                    .token()
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-')
            );
        }
    }
}
