//! Authentication extractors.
//!
//! `Identity` is the gate on write routes: if the request carries no valid
//! session cookie the extractor short-circuits to a login redirect and the
//! handler body never runs. `MaybeIdentity` never fails and is used by pages
//! that render for both audiences.

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use std::future::{Ready, ready};
use std::sync::Arc;

use quill_core::ports::{SessionClaims, SessionService};
use quill_shared::Flash;

use crate::session;

/// Authenticated user identity.
///
/// Use this in handlers to require a logged-in user:
/// ```ignore
/// async fn new_post_form(identity: Identity) -> HttpResponse { ... }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: uuid::Uuid,
    pub name: String,
    pub role: String,
}

impl From<SessionClaims> for Identity {
    fn from(claims: SessionClaims) -> Self {
        Self {
            user_id: claims.user_id,
            name: claims.name,
            role: claims.role,
        }
    }
}

/// Extractor failure: anonymous caller on a gated route.
///
/// Not a hard error for a browser app; the response is a redirect to the
/// login page, with the stale session cookie (if any) cleared.
#[derive(Debug)]
pub struct LoginRedirect;

impl std::fmt::Display for LoginRedirect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "authentication required, redirecting to login")
    }
}

impl actix_web::ResponseError for LoginRedirect {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::SEE_OTHER
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::SeeOther()
            .insert_header((actix_web::http::header::LOCATION, "/login"))
            .cookie(session::clear_session_cookie())
            .cookie(session::flash_cookie(Flash::LoginRequired))
            .finish()
    }
}

fn identity_from_request(req: &HttpRequest) -> Result<Identity, LoginRedirect> {
    let session_service = req
        .app_data::<actix_web::web::Data<Arc<dyn SessionService>>>()
        .ok_or_else(|| {
            tracing::error!("SessionService not found in app data");
            LoginRedirect
        })?;

    let cookie = req.cookie(session::SESSION_COOKIE).ok_or(LoginRedirect)?;

    match session_service.verify(cookie.value()) {
        Ok(claims) => Ok(Identity::from(claims)),
        Err(e) => {
            tracing::debug!("Rejecting session cookie: {}", e);
            Err(LoginRedirect)
        }
    }
}

impl FromRequest for Identity {
    type Error = LoginRedirect;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(identity_from_request(req))
    }
}

/// Optional identity extractor - yields `None` instead of redirecting.
pub struct MaybeIdentity(pub Option<Identity>);

impl FromRequest for MaybeIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(MaybeIdentity(identity_from_request(req).ok())))
    }
}
