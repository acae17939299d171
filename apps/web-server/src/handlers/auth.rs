//! Registration, login, and logout.

use std::sync::Arc;

use actix_web::http::header::LOCATION;
use actix_web::{HttpRequest, HttpResponse, web};

use quill_core::domain::User;
use quill_core::error::RepoError;
use quill_core::ports::{PasswordService, SessionService};
use quill_shared::Flash;
use quill_shared::forms::{FieldErrors, LoginForm, RegisterForm};

use crate::middleware::error::{PageError, PageResult};
use crate::session;
use crate::state::AppState;
use crate::views;

/// GET /register
pub async fn register_form(req: HttpRequest) -> HttpResponse {
    session::render(
        &req,
        views::register_page(
            &RegisterForm::default(),
            &FieldErrors::default(),
            session::peek_flash(&req),
        ),
    )
}

/// POST /register
///
/// A new account gets the "blogger" role and an immediate session. On a
/// duplicate email nothing is created and the form comes back with a flash.
pub async fn register(
    req: HttpRequest,
    state: web::Data<AppState>,
    sessions: web::Data<Arc<dyn SessionService>>,
    passwords: web::Data<Arc<dyn PasswordService>>,
    form: web::Form<RegisterForm>,
) -> PageResult<HttpResponse> {
    let form = form.into_inner();

    let errors = form.validate();
    if !errors.is_empty() {
        return Ok(session::render(
            &req,
            views::register_page(&form, &errors, None),
        ));
    }

    let password_hash = passwords
        .hash(&form.password)
        .map_err(|e| PageError::Internal(e.to_string()))?;

    let user = User::register(
        form.name.trim().to_string(),
        form.email.trim().to_string(),
        password_hash,
    );

    match state.users.insert(user).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "New user registered");
            let token = sessions
                .issue(user.id, &user.name, &user.role)
                .map_err(|e| PageError::Internal(e.to_string()))?;

            Ok(HttpResponse::SeeOther()
                .insert_header((LOCATION, "/"))
                .cookie(session::session_cookie(token, sessions.ttl_seconds()))
                .finish())
        }
        Err(RepoError::Conflict(_)) => Ok(session::render(
            &req,
            views::register_page(&form, &FieldErrors::default(), Some(Flash::EmailTaken)),
        )),
        Err(e) => Err(e.into()),
    }
}

/// GET /login
pub async fn login_form(req: HttpRequest) -> HttpResponse {
    session::render(
        &req,
        views::login_page(
            &LoginForm::default(),
            &FieldErrors::default(),
            session::peek_flash(&req),
        ),
    )
}

/// POST /login
///
/// An unknown email and a wrong password produce the same response, so the
/// login form never confirms whether an address is registered.
pub async fn login(
    req: HttpRequest,
    state: web::Data<AppState>,
    sessions: web::Data<Arc<dyn SessionService>>,
    passwords: web::Data<Arc<dyn PasswordService>>,
    form: web::Form<LoginForm>,
) -> PageResult<HttpResponse> {
    let form = form.into_inner();

    let errors = form.validate();
    if !errors.is_empty() {
        return Ok(session::render(&req, views::login_page(&form, &errors, None)));
    }

    if let Some(user) = state.users.find_by_email(form.email.trim()).await? {
        let verified = passwords
            .verify(&form.password, &user.password_hash)
            .map_err(|e| PageError::Internal(e.to_string()))?;

        if verified {
            let token = sessions
                .issue(user.id, &user.name, &user.role)
                .map_err(|e| PageError::Internal(e.to_string()))?;

            return Ok(HttpResponse::SeeOther()
                .insert_header((LOCATION, "/"))
                .cookie(session::session_cookie(token, sessions.ttl_seconds()))
                .cookie(session::flash_cookie(Flash::LoggedIn))
                .finish());
        }
    }

    // Unknown email and wrong password fall through to the same render.
    Ok(session::render(
        &req,
        views::login_page(
            &form,
            &FieldErrors::default(),
            Some(Flash::CredentialsIncorrect),
        ),
    ))
}

/// GET /logout - tear down the session, back to anonymous.
pub async fn logout() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, "/"))
        .cookie(session::clear_session_cookie())
        .finish()
}
