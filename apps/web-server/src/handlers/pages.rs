//! Static info pages - render without model interaction.

use actix_web::{HttpRequest, HttpResponse};

use crate::middleware::auth::MaybeIdentity;
use crate::session;
use crate::views;

/// GET /about
pub async fn about(req: HttpRequest, MaybeIdentity(user): MaybeIdentity) -> HttpResponse {
    session::render(
        &req,
        views::about_page(user.as_ref(), session::peek_flash(&req)),
    )
}

/// GET /contact
pub async fn contact(req: HttpRequest, MaybeIdentity(user): MaybeIdentity) -> HttpResponse {
    session::render(
        &req,
        views::contact_page(user.as_ref(), session::peek_flash(&req)),
    )
}
