//! Full-router tests over in-memory repositories.

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};

use quill_core::ports::{PasswordService, SessionService};
use quill_infra::{Argon2PasswordService, SessionConfig, TokenSessionService};
use quill_shared::Flash;
use quill_shared::forms::{CommentForm, LoginForm, PostForm, RegisterForm};

use crate::handlers::configure_routes;
use crate::session::SESSION_COOKIE;
use crate::state::AppState;

fn services() -> (Arc<dyn SessionService>, Arc<dyn PasswordService>) {
    let sessions: Arc<dyn SessionService> = Arc::new(TokenSessionService::new(SessionConfig {
        secret: "test-only-secret".to_string(),
        ttl_hours: 1,
        issuer: "quill".to_string(),
    }));
    let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());
    (sessions, passwords)
}

macro_rules! test_app {
    ($state:expr) => {{
        let (sessions, passwords) = services();
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .app_data(web::Data::new(sessions))
                .app_data(web::Data::new(passwords))
                .configure(configure_routes),
        )
        .await
    }};
}

fn session_cookie_of<B>(resp: &actix_web::dev::ServiceResponse<B>) -> Cookie<'static> {
    resp.response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .expect("response should set a session cookie")
        .into_owned()
}

fn location_of<B>(resp: &actix_web::dev::ServiceResponse<B>) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .expect("response should redirect")
        .to_str()
        .unwrap()
}

fn register_form(name: &str, email: &str) -> RegisterForm {
    RegisterForm {
        name: name.to_string(),
        email: email.to_string(),
        password: "a-long-password".to_string(),
    }
}

fn post_form(title: &str) -> PostForm {
    PostForm {
        title: title.to_string(),
        subtitle: "A subtitle".to_string(),
        img_url: "https://example.com/img.jpg".to_string(),
        body: "Body text.".to_string(),
    }
}

#[actix_web::test]
async fn healthz_is_public() {
    let state = AppState::in_memory();
    let app = test_app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/healthz").to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn duplicate_registration_is_rejected_without_a_row() {
    let state = AppState::in_memory();
    let app = test_app!(state.clone());

    let first = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/register")
            .set_form(register_form("Ada", "ada@example.com"))
            .to_request(),
    )
    .await;
    assert_eq!(first.status(), StatusCode::SEE_OTHER);
    session_cookie_of(&first); // registration logs the user straight in

    let second = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/register")
            .set_form(register_form("Imposter", "ada@example.com"))
            .to_request(),
    )
    .await;
    assert_eq!(second.status(), StatusCode::OK);
    let body = test::read_body(second).await;
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains(Flash::EmailTaken.message()));

    // The existing account is untouched and no second row appeared.
    let stored = state
        .users
        .find_by_email("ada@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.name, "Ada");
}

#[actix_web::test]
async fn login_failures_are_indistinguishable() {
    let state = AppState::in_memory();
    let app = test_app!(state);

    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/register")
            .set_form(register_form("Ada", "ada@example.com"))
            .to_request(),
    )
    .await;

    let wrong_password = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .set_form(LoginForm {
                email: "ada@example.com".to_string(),
                password: "wrong-password".to_string(),
            })
            .to_request(),
    )
    .await;
    let unknown_email = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .set_form(LoginForm {
                email: "nobody@example.com".to_string(),
                password: "wrong-password".to_string(),
            })
            .to_request(),
    )
    .await;

    assert_eq!(wrong_password.status(), StatusCode::OK);
    assert_eq!(unknown_email.status(), StatusCode::OK);

    let text_a = String::from_utf8(test::read_body(wrong_password).await.to_vec()).unwrap();
    let text_b = String::from_utf8(test::read_body(unknown_email).await.to_vec()).unwrap();
    assert!(text_a.contains(Flash::CredentialsIncorrect.message()));
    assert!(text_b.contains(Flash::CredentialsIncorrect.message()));
    // Same message, same page; only the echoed form input differs.
    assert_eq!(
        text_a.replace("ada@example.com", ""),
        text_b.replace("nobody@example.com", "")
    );
}

#[actix_web::test]
async fn anonymous_post_creation_redirects_to_login_and_creates_nothing() {
    let state = AppState::in_memory();
    let app = test_app!(state.clone());

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/add_new_post")
            .set_form(post_form("T1"))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_of(&resp), "/login");
    assert!(state.posts.find_all().await.unwrap().is_empty());
}

#[actix_web::test]
async fn gated_routes_redirect_anonymous_callers() {
    let state = AppState::in_memory();
    let app = test_app!(state);

    for uri in [
        "/add_new_post",
        &format!("/edit_post/{}", uuid::Uuid::new_v4()),
        &format!("/delete_post/{}", uuid::Uuid::new_v4()),
    ] {
        let resp =
            test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location_of(&resp), "/login", "{uri}");
    }
}

#[actix_web::test]
async fn deleting_a_post_cascades_its_comments() {
    let state = AppState::in_memory();
    let app = test_app!(state.clone());

    let registered = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/register")
            .set_form(register_form("Ada", "ada@example.com"))
            .to_request(),
    )
    .await;
    let cookie = session_cookie_of(&registered);

    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/add_new_post")
            .cookie(cookie.clone())
            .set_form(post_form("Cascade Me"))
            .to_request(),
    )
    .await;
    let post_id = state.posts.find_all().await.unwrap()[0].id;

    for i in 0..3 {
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/{post_id}"))
                .set_form(CommentForm {
                    comment: format!("comment {i}"),
                })
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    }
    assert_eq!(state.comments.find_by_post(post_id).await.unwrap().len(), 3);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/delete_post/{post_id}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    assert!(state.posts.find_by_id(post_id).await.unwrap().is_none());
    assert!(state.comments.find_by_post(post_id).await.unwrap().is_empty());
}

#[actix_web::test]
async fn editing_preserves_the_original_author() {
    let state = AppState::in_memory();
    let app = test_app!(state.clone());

    let registered = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/register")
            .set_form(register_form("Ada", "ada@example.com"))
            .to_request(),
    )
    .await;
    let cookie = session_cookie_of(&registered);
    let author_id = state
        .users
        .find_by_email("ada@example.com")
        .await
        .unwrap()
        .unwrap()
        .id;

    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/add_new_post")
            .cookie(cookie.clone())
            .set_form(post_form("Original Title"))
            .to_request(),
    )
    .await;
    let post = state.posts.find_all().await.unwrap().remove(0);
    let original_date = post.date.clone();

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/edit_post/{}", post.id))
            .cookie(cookie)
            .set_form(post_form("Edited Title"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_of(&resp), format!("/{}", post.id));

    let edited = state.posts.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(edited.title, "Edited Title");
    assert_eq!(edited.author_id, author_id);
    assert_eq!(edited.date, original_date);
}

#[actix_web::test]
async fn empty_comment_re_renders_without_mutation() {
    let state = AppState::in_memory();
    let app = test_app!(state.clone());

    let registered = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/register")
            .set_form(register_form("Ada", "ada@example.com"))
            .to_request(),
    )
    .await;
    let cookie = session_cookie_of(&registered);

    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/add_new_post")
            .cookie(cookie)
            .set_form(post_form("Quiet Post"))
            .to_request(),
    )
    .await;
    let post_id = state.posts.find_all().await.unwrap()[0].id;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/{post_id}"))
            .set_form(CommentForm {
                comment: "   ".to_string(),
            })
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let text = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(text.contains("This field is required."));
    assert!(state.comments.find_by_post(post_id).await.unwrap().is_empty());
}

#[actix_web::test]
async fn commenting_on_a_missing_post_is_not_found() {
    let state = AppState::in_memory();
    let app = test_app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/{}", uuid::Uuid::new_v4()))
            .set_form(CommentForm {
                comment: "hello?".to_string(),
            })
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn full_visitor_flow() {
    let state = AppState::in_memory();
    let app = test_app!(state.clone());

    // Register A (logs in as part of registration).
    let registered = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/register")
            .set_form(register_form("Ada", "ada@example.com"))
            .to_request(),
    )
    .await;
    let cookie = session_cookie_of(&registered);

    // Create post P as A.
    let created = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/add_new_post")
            .cookie(cookie.clone())
            .set_form(post_form("T1"))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_of(&created), "/");
    let post_id = state.posts.find_all().await.unwrap()[0].id;

    // Log out.
    let logout =
        test::call_service(&app, test::TestRequest::get().uri("/logout").to_request()).await;
    assert_eq!(logout.status(), StatusCode::SEE_OTHER);

    // View P anonymously.
    let view = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/{post_id}"))
            .to_request(),
    )
    .await;
    assert_eq!(view.status(), StatusCode::OK);
    let text = String::from_utf8(test::read_body(view).await.to_vec()).unwrap();
    assert!(text.contains("T1"));

    // Submit comment C anonymously.
    let commented = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/{post_id}"))
            .set_form(CommentForm {
                comment: "Great post!".to_string(),
            })
            .to_request(),
    )
    .await;
    assert_eq!(commented.status(), StatusCode::SEE_OTHER);

    // View P again: C appears, associated with P.
    let view = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/{post_id}"))
            .to_request(),
    )
    .await;
    let text = String::from_utf8(test::read_body(view).await.to_vec()).unwrap();
    assert!(text.contains("Great post!"));

    let comments = state.comments.find_by_post(post_id).await.unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].post_id, post_id);
}

#[actix_web::test]
async fn login_sets_a_session_and_flashes_once() {
    let state = AppState::in_memory();
    let app = test_app!(state);

    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/register")
            .set_form(register_form("Ada", "ada@example.com"))
            .to_request(),
    )
    .await;

    let login = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .set_form(LoginForm {
                email: "ada@example.com".to_string(),
                password: "a-long-password".to_string(),
            })
            .to_request(),
    )
    .await;
    assert_eq!(login.status(), StatusCode::SEE_OTHER);
    let session = session_cookie_of(&login);
    let flash = login
        .response()
        .cookies()
        .find(|c| c.name() == crate::session::FLASH_COOKIE)
        .expect("login should flash")
        .into_owned();

    // Next page shows the flash and clears the cookie.
    let home = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/")
            .cookie(session)
            .cookie(flash)
            .to_request(),
    )
    .await;
    let cleared = home
        .response()
        .cookies()
        .find(|c| c.name() == crate::session::FLASH_COOKIE)
        .expect("flash cookie should be cleared");
    assert!(cleared.value().is_empty());
    let text = String::from_utf8(test::read_body(home).await.to_vec()).unwrap();
    assert!(text.contains(Flash::LoggedIn.message()));
}
