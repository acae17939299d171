//! Post and comment handlers.

use actix_web::{HttpRequest, HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::{Comment, Post};
use quill_core::error::RepoError;
use quill_shared::Flash;
use quill_shared::forms::{CommentForm, FieldErrors, PostForm};

use crate::middleware::auth::{Identity, MaybeIdentity};
use crate::middleware::error::{PageError, PageResult};
use crate::session;
use crate::state::AppState;
use crate::views;

/// A malformed id in the path is indistinguishable from a missing post.
fn parse_post_id(raw: &str) -> PageResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| PageError::NotFound)
}

async fn author_name(state: &AppState, post: &Post) -> PageResult<String> {
    Ok(state
        .users
        .find_by_id(post.author_id)
        .await?
        .map(|u| u.name)
        .unwrap_or_else(|| "Unknown".to_string()))
}

/// GET /
pub async fn list_posts(
    req: HttpRequest,
    state: web::Data<AppState>,
    MaybeIdentity(user): MaybeIdentity,
) -> PageResult<HttpResponse> {
    let posts = state.posts.find_all().await?;

    Ok(session::render(
        &req,
        views::index_page(&posts, user.as_ref(), session::peek_flash(&req)),
    ))
}

/// GET /{post_id}
pub async fn show_post(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
    MaybeIdentity(user): MaybeIdentity,
) -> PageResult<HttpResponse> {
    let post_id = parse_post_id(&path)?;
    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or(PageError::NotFound)?;
    let author = author_name(&state, &post).await?;
    let comments = state.comments.find_by_post(post_id).await?;

    Ok(session::render(
        &req,
        views::post_page(
            &post,
            &author,
            &comments,
            &CommentForm::default(),
            &FieldErrors::default(),
            user.as_ref(),
            session::peek_flash(&req),
        ),
    ))
}

/// POST /{post_id} - anonymous comment submission.
pub async fn add_comment(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
    MaybeIdentity(user): MaybeIdentity,
    form: web::Form<CommentForm>,
) -> PageResult<HttpResponse> {
    let post_id = parse_post_id(&path)?;
    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or(PageError::NotFound)?;
    let form = form.into_inner();

    let errors = form.validate();
    if !errors.is_empty() {
        let author = author_name(&state, &post).await?;
        let comments = state.comments.find_by_post(post_id).await?;
        return Ok(session::render(
            &req,
            views::post_page(&post, &author, &comments, &form, &errors, user.as_ref(), None),
        ));
    }

    let comment = Comment::new(post_id, form.comment.trim().to_string());
    match state.comments.insert(comment).await {
        Ok(_) => Ok(session::redirect(&format!("/{post_id}"))),
        Err(RepoError::NotFound) => Err(PageError::NotFound),
        Err(e) => {
            tracing::warn!("Comment insert failed: {}", e);
            Ok(session::redirect_with_flash(
                &format!("/{post_id}"),
                Flash::CommentFailed,
            ))
        }
    }
}

/// GET /add_new_post
pub async fn new_post_form(req: HttpRequest, identity: Identity) -> HttpResponse {
    session::render(
        &req,
        views::post_form_page(
            &PostForm::default(),
            &FieldErrors::default(),
            "/add_new_post",
            false,
            Some(&identity),
            session::peek_flash(&req),
        ),
    )
}

/// POST /add_new_post - the new post belongs to the session's user.
pub async fn create_post(
    req: HttpRequest,
    state: web::Data<AppState>,
    identity: Identity,
    form: web::Form<PostForm>,
) -> PageResult<HttpResponse> {
    let form = form.into_inner();

    let errors = form.validate();
    if !errors.is_empty() {
        return Ok(session::render(
            &req,
            views::post_form_page(&form, &errors, "/add_new_post", false, Some(&identity), None),
        ));
    }

    let post = Post::new(
        identity.user_id,
        form.title.trim().to_string(),
        form.subtitle.trim().to_string(),
        form.body.clone(),
        form.img_url.trim().to_string(),
    );

    match state.posts.insert(post).await {
        Ok(post) => {
            tracing::info!(post_id = %post.id, "Post created");
            Ok(session::redirect("/"))
        }
        Err(RepoError::Conflict(_)) => Ok(session::render(
            &req,
            views::post_form_page(
                &form,
                &FieldErrors::default(),
                "/add_new_post",
                false,
                Some(&identity),
                Some(Flash::TitleTaken),
            ),
        )),
        Err(e) => Err(e.into()),
    }
}

/// GET /edit_post/{post_id} - form pre-filled from the stored post.
pub async fn edit_post_form(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
    identity: Identity,
) -> PageResult<HttpResponse> {
    let post_id = parse_post_id(&path)?;
    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or(PageError::NotFound)?;

    let form = PostForm {
        title: post.title,
        subtitle: post.subtitle,
        img_url: post.img_url,
        body: post.body,
    };

    Ok(session::render(
        &req,
        views::post_form_page(
            &form,
            &FieldErrors::default(),
            &format!("/edit_post/{post_id}"),
            true,
            Some(&identity),
            session::peek_flash(&req),
        ),
    ))
}

/// POST /edit_post/{post_id}
///
/// The form carries no author field; the stored author and date come
/// through the edit untouched.
pub async fn update_post(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
    identity: Identity,
    form: web::Form<PostForm>,
) -> PageResult<HttpResponse> {
    let post_id = parse_post_id(&path)?;
    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or(PageError::NotFound)?;
    let form = form.into_inner();
    let action = format!("/edit_post/{post_id}");

    let errors = form.validate();
    if !errors.is_empty() {
        return Ok(session::render(
            &req,
            views::post_form_page(&form, &errors, &action, true, Some(&identity), None),
        ));
    }

    let edited = post.edited(
        form.title.trim().to_string(),
        form.subtitle.trim().to_string(),
        form.body.clone(),
        form.img_url.trim().to_string(),
    );

    match state.posts.update(edited).await {
        Ok(_) => Ok(session::redirect(&format!("/{post_id}"))),
        Err(RepoError::Conflict(_)) => Ok(session::render(
            &req,
            views::post_form_page(
                &form,
                &FieldErrors::default(),
                &action,
                true,
                Some(&identity),
                Some(Flash::TitleTaken),
            ),
        )),
        Err(e) => Err(e.into()),
    }
}

/// GET /delete_post/{post_id} - removes the post and all of its comments.
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    _identity: Identity,
) -> PageResult<HttpResponse> {
    let post_id = parse_post_id(&path)?;

    state.posts.delete(post_id).await?;
    tracing::info!(post_id = %post_id, "Post deleted");

    Ok(session::redirect("/"))
}
