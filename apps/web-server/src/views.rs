//! Server-rendered pages.
//!
//! Plain `format!` HTML, one function per page. Each page goes through
//! `layout` for the shared chrome; anything user-supplied passes through
//! `esc` on its way into markup.

use quill_core::domain::{Comment, Post};
use quill_shared::forms::{CommentForm, FieldErrors, LoginForm, PostForm, RegisterForm};
use quill_shared::Flash;

use crate::middleware::auth::Identity;

/// Minimal HTML escaping for user-supplied text.
fn esc(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn nav(user: Option<&Identity>) -> String {
    match user {
        Some(identity) => format!(
            r#"<nav>
  <a href="/">Home</a>
  <a href="/add_new_post">New Post</a>
  <a href="/about">About</a>
  <a href="/contact">Contact</a>
  <span class="nav-user">Signed in as {name}</span>
  <a href="/logout">Log Out</a>
</nav>"#,
            name = esc(&identity.name)
        ),
        None => r#"<nav>
  <a href="/">Home</a>
  <a href="/about">About</a>
  <a href="/contact">Contact</a>
  <a href="/login">Log In</a>
  <a href="/register">Register</a>
</nav>"#
            .to_string(),
    }
}

fn flash_banner(flash: Option<Flash>) -> String {
    match flash {
        Some(f) => format!(
            r#"<div class="flash {class}">{message}</div>"#,
            class = if f.is_error() { "flash-error" } else { "flash-info" },
            message = f.message()
        ),
        None => String::new(),
    }
}

fn field_error(errors: &FieldErrors, field: &str) -> String {
    match errors.get(field) {
        Some(message) => format!(r#"<p class="field-error">{message}</p>"#),
        None => String::new(),
    }
}

fn layout(title: &str, user: Option<&Identity>, flash: Option<Flash>, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Quill</title>
    <style>
        body {{ font-family: Georgia, serif; max-width: 720px; margin: 0 auto; padding: 0 16px; color: #222; }}
        nav {{ padding: 12px 0; border-bottom: 1px solid #ddd; }}
        nav a {{ margin-right: 12px; }}
        .nav-user {{ color: #666; margin-right: 12px; }}
        .flash {{ padding: 8px 12px; margin: 12px 0; border-radius: 4px; }}
        .flash-info {{ background: #e7f4e4; }}
        .flash-error {{ background: #f8e1e1; }}
        .field-error {{ color: #a33; margin: 2px 0; }}
        .post-meta {{ color: #666; font-style: italic; }}
        label {{ display: block; margin-top: 12px; }}
        input, textarea {{ width: 100%; padding: 6px; }}
        textarea {{ min-height: 140px; }}
        button {{ margin-top: 16px; padding: 8px 16px; }}
        .comment {{ border-top: 1px solid #eee; padding: 8px 0; }}
    </style>
</head>
<body>
{nav}
{flash}
{body}
</body>
</html>"#,
        title = esc(title),
        nav = nav(user),
        flash = flash_banner(flash),
        body = body
    )
}

/// GET / - every post, newest last.
pub fn index_page(posts: &[Post], user: Option<&Identity>, flash: Option<Flash>) -> String {
    let mut items = String::new();
    if posts.is_empty() {
        items.push_str("<p>No posts yet.</p>");
    }
    for post in posts {
        items.push_str(&format!(
            r#"<article>
  <h2><a href="/{id}">{title}</a></h2>
  <p>{subtitle}</p>
  <p class="post-meta">{date}</p>
</article>
"#,
            id = post.id,
            title = esc(&post.title),
            subtitle = esc(&post.subtitle),
            date = esc(&post.date),
        ));
    }

    layout(
        "All Posts",
        user,
        flash,
        &format!("<h1>Quill</h1>\n{items}"),
    )
}

/// GET|POST /{post_id} - the post, its comments, and the comment form.
pub fn post_page(
    post: &Post,
    author_name: &str,
    comments: &[Comment],
    form: &CommentForm,
    errors: &FieldErrors,
    user: Option<&Identity>,
    flash: Option<Flash>,
) -> String {
    let mut comment_items = String::new();
    for comment in comments {
        comment_items.push_str(&format!(
            r#"<div class="comment"><p>{content}</p><p class="post-meta">{date}</p></div>
"#,
            content = esc(&comment.content),
            date = esc(&comment.date),
        ));
    }

    let body = format!(
        r#"<article>
  <h1>{title}</h1>
  <h3>{subtitle}</h3>
  <p class="post-meta">By {author} on {date}</p>
  <img src="{img_url}" alt="" width="100%">
  <div>{post_body}</div>
</article>
<section>
  <h2>Comments</h2>
{comments}
  <form method="post" action="/{id}">
    <label for="comment">Leave a comment (no account needed)</label>
    {comment_error}
    <textarea id="comment" name="comment">{comment_value}</textarea>
    <button type="submit">Submit Comment</button>
  </form>
</section>"#,
        title = esc(&post.title),
        subtitle = esc(&post.subtitle),
        author = esc(author_name),
        date = esc(&post.date),
        img_url = esc(&post.img_url),
        post_body = esc(&post.body),
        comments = comment_items,
        id = post.id,
        comment_error = field_error(errors, "comment"),
        comment_value = esc(&form.comment),
    );

    layout(&post.title, user, flash, &body)
}

/// GET|POST /add_new_post and /edit_post/{post_id}.
pub fn post_form_page(
    form: &PostForm,
    errors: &FieldErrors,
    action: &str,
    editing: bool,
    user: Option<&Identity>,
    flash: Option<Flash>,
) -> String {
    let heading = if editing { "Edit Post" } else { "New Post" };

    let body = format!(
        r#"<h1>{heading}</h1>
<form method="post" action="{action}">
  <label for="title">Blog Post Title</label>
  {title_error}
  <input id="title" name="title" value="{title}">
  <label for="subtitle">Subtitle</label>
  {subtitle_error}
  <input id="subtitle" name="subtitle" value="{subtitle}">
  <label for="img_url">Blog Image URL</label>
  {img_url_error}
  <input id="img_url" name="img_url" value="{img_url}">
  <label for="body">Blog Content</label>
  {body_error}
  <textarea id="body" name="body">{body}</textarea>
  <button type="submit">Submit Post</button>
</form>"#,
        heading = heading,
        action = esc(action),
        title_error = field_error(errors, "title"),
        title = esc(&form.title),
        subtitle_error = field_error(errors, "subtitle"),
        subtitle = esc(&form.subtitle),
        img_url_error = field_error(errors, "img_url"),
        img_url = esc(&form.img_url),
        body_error = field_error(errors, "body"),
        body = esc(&form.body),
    );

    layout(heading, user, flash, &body)
}

/// GET|POST /register.
pub fn register_page(form: &RegisterForm, errors: &FieldErrors, flash: Option<Flash>) -> String {
    let body = format!(
        r#"<h1>Register</h1>
<form method="post" action="/register">
  <label for="name">Name</label>
  {name_error}
  <input id="name" name="name" value="{name}">
  <label for="email">Email</label>
  {email_error}
  <input id="email" name="email" type="email" value="{email}">
  <label for="password">Password</label>
  {password_error}
  <input id="password" name="password" type="password">
  <button type="submit">Sign me up!</button>
</form>"#,
        name_error = field_error(errors, "name"),
        name = esc(&form.name),
        email_error = field_error(errors, "email"),
        email = esc(&form.email),
        password_error = field_error(errors, "password"),
    );

    layout("Register", None, flash, &body)
}

/// GET|POST /login.
pub fn login_page(form: &LoginForm, errors: &FieldErrors, flash: Option<Flash>) -> String {
    let body = format!(
        r#"<h1>Log In</h1>
<form method="post" action="/login">
  <label for="email">Email</label>
  {email_error}
  <input id="email" name="email" type="email" value="{email}">
  <label for="password">Password</label>
  {password_error}
  <input id="password" name="password" type="password">
  <button type="submit">Let me in.</button>
</form>"#,
        email_error = field_error(errors, "email"),
        email = esc(&form.email),
        password_error = field_error(errors, "password"),
    );

    layout("Log In", None, flash, &body)
}

/// GET /about.
pub fn about_page(user: Option<&Identity>, flash: Option<Flash>) -> String {
    layout(
        "About",
        user,
        flash,
        "<h1>About</h1>\n<p>Quill is a small shared blog. Registered writers post; anyone reads and comments.</p>",
    )
}

/// GET /contact.
pub fn contact_page(user: Option<&Identity>, flash: Option<Flash>) -> String {
    layout(
        "Contact",
        user,
        flash,
        "<h1>Contact</h1>\n<p>Write to us at <a href=\"mailto:hello@quill.example\">hello@quill.example</a>.</p>",
    )
}

/// Any dangling id.
pub fn not_found_page() -> String {
    layout(
        "Not Found",
        None,
        None,
        "<h1>404</h1>\n<p>That page does not exist. <a href=\"/\">Back to the front page.</a></p>",
    )
}
