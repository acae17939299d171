//! Form DTOs and their validation.
//!
//! Every POST body in the app deserializes into one of these structs, and
//! every struct validates field by field *before* any storage mutation is
//! attempted. A non-empty `FieldErrors` means the handler re-renders the
//! form with per-field messages and touches nothing.

use serde::{Deserialize, Serialize};

/// Per-field validation messages, in form order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<(&'static str, &'static str)>,
}

impl FieldErrors {
    pub fn push(&mut self, field: &'static str, message: &'static str) {
        self.errors.push((field, message));
    }

    /// Message for a field, if it failed validation.
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| *m)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

fn require(errors: &mut FieldErrors, field: &'static str, value: &str) -> bool {
    if value.trim().is_empty() {
        errors.push(field, "This field is required.");
        false
    } else {
        true
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.ends_with('.'),
        None => false,
    }
}

fn looks_like_url(value: &str) -> bool {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    matches!(rest, Some(host) if !host.is_empty())
}

/// Create/edit post form. The author is never part of this form; it comes
/// from the session on create and is left untouched on edit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostForm {
    pub title: String,
    pub subtitle: String,
    pub img_url: String,
    pub body: String,
}

impl PostForm {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        require(&mut errors, "title", &self.title);
        require(&mut errors, "subtitle", &self.subtitle);
        if require(&mut errors, "img_url", &self.img_url) && !looks_like_url(&self.img_url) {
            errors.push("img_url", "Not a valid URL.");
        }
        require(&mut errors, "body", &self.body);
        errors
    }
}

/// Registration form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        require(&mut errors, "name", &self.name);
        if require(&mut errors, "email", &self.email) && !looks_like_email(&self.email) {
            errors.push("email", "Not a valid email address.");
        }
        if require(&mut errors, "password", &self.password) && self.password.len() < 8 {
            errors.push("password", "Password must be at least 8 characters.");
        }
        errors
    }
}

/// Login form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        require(&mut errors, "email", &self.email);
        require(&mut errors, "password", &self.password);
        errors
    }
}

/// Comment form on the post page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentForm {
    pub comment: String,
}

impl CommentForm {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        require(&mut errors, "comment", &self.comment);
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_form_requires_every_field() {
        let errors = PostForm::default().validate();
        assert!(errors.get("title").is_some());
        assert!(errors.get("subtitle").is_some());
        assert!(errors.get("img_url").is_some());
        assert!(errors.get("body").is_some());
    }

    #[test]
    fn post_form_rejects_non_url_image() {
        let form = PostForm {
            title: "T".into(),
            subtitle: "S".into(),
            img_url: "not-a-url".into(),
            body: "B".into(),
        };
        let errors = form.validate();
        assert_eq!(errors.get("img_url"), Some("Not a valid URL."));
        assert!(errors.get("title").is_none());
    }

    #[test]
    fn post_form_accepts_http_and_https() {
        for url in ["https://example.com/a.jpg", "http://example.com/a.jpg"] {
            let form = PostForm {
                title: "T".into(),
                subtitle: "S".into(),
                img_url: url.into(),
                body: "B".into(),
            };
            assert!(form.validate().is_empty(), "{url} should validate");
        }
    }

    #[test]
    fn register_form_checks_email_shape_and_password_length() {
        let form = RegisterForm {
            name: "Ada".into(),
            email: "ada-at-example.com".into(),
            password: "short".into(),
        };
        let errors = form.validate();
        assert_eq!(errors.get("email"), Some("Not a valid email address."));
        assert_eq!(
            errors.get("password"),
            Some("Password must be at least 8 characters.")
        );
    }

    #[test]
    fn register_form_accepts_valid_input() {
        let form = RegisterForm {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "longenough".into(),
        };
        assert!(form.validate().is_empty());
    }

    #[test]
    fn comment_form_rejects_whitespace_only() {
        let form = CommentForm {
            comment: "   ".into(),
        };
        assert!(!form.validate().is_empty());
    }
}
