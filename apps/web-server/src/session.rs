//! Session and flash cookie plumbing.
//!
//! The session cookie holds a signed token from `TokenSessionService`; the
//! flash cookie holds a one-shot `Flash` vocabulary token that the next
//! rendered page consumes.

use actix_web::HttpRequest;
use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, HttpResponseBuilder};

use quill_shared::Flash;

pub const SESSION_COOKIE: &str = "quill_session";
pub const FLASH_COOKIE: &str = "quill_flash";

pub fn session_cookie(token: String, ttl_seconds: i64) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(ttl_seconds))
        .finish()
}

pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::ZERO)
        .finish()
}

pub fn flash_cookie(flash: Flash) -> Cookie<'static> {
    Cookie::build(FLASH_COOKIE, flash.token())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

pub fn clear_flash_cookie() -> Cookie<'static> {
    Cookie::build(FLASH_COOKIE, "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::ZERO)
        .finish()
}

/// Flash waiting in the request, if any. The render helpers below clear the
/// cookie so a flash shows exactly once.
pub fn peek_flash(req: &HttpRequest) -> Option<Flash> {
    req.cookie(FLASH_COOKIE)
        .and_then(|c| Flash::from_token(c.value()))
}

/// Render an HTML page, consuming any pending flash cookie.
pub fn render(req: &HttpRequest, html: String) -> HttpResponse {
    let mut builder = HttpResponse::Ok();
    builder.content_type(ContentType::html());
    if req.cookie(FLASH_COOKIE).is_some() {
        builder.cookie(clear_flash_cookie());
    }
    builder.body(html)
}

/// 303 redirect (POST/redirect/GET).
pub fn redirect(location: &str) -> HttpResponse {
    see_other(location).finish()
}

/// 303 redirect carrying a flash for the next page.
pub fn redirect_with_flash(location: &str, flash: Flash) -> HttpResponse {
    see_other(location).cookie(flash_cookie(flash)).finish()
}

fn see_other(location: &str) -> HttpResponseBuilder {
    let mut builder = HttpResponse::SeeOther();
    builder.insert_header((actix_web::http::header::LOCATION, location.to_string()));
    builder
}
