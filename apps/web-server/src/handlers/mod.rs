//! HTTP handlers and route configuration.

mod auth;
mod health;
mod pages;
mod posts;

use actix_web::web;

/// Configure all application routes.
///
/// Literal routes go first; the bare `/{post_id}` capture has to be last or
/// it would swallow them.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(posts::list_posts))
        .route("/healthz", web::get().to(health::healthz))
        .route("/about", web::get().to(pages::about))
        .route("/contact", web::get().to(pages::contact))
        .route("/register", web::get().to(auth::register_form))
        .route("/register", web::post().to(auth::register))
        .route("/login", web::get().to(auth::login_form))
        .route("/login", web::post().to(auth::login))
        .route("/logout", web::get().to(auth::logout))
        .route("/add_new_post", web::get().to(posts::new_post_form))
        .route("/add_new_post", web::post().to(posts::create_post))
        .route("/edit_post/{post_id}", web::get().to(posts::edit_post_form))
        .route("/edit_post/{post_id}", web::post().to(posts::update_post))
        .route("/delete_post/{post_id}", web::get().to(posts::delete_post))
        .route("/{post_id}", web::get().to(posts::show_post))
        .route("/{post_id}", web::post().to(posts::add_comment));
}
