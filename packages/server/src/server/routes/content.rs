//! Post and course routes.
//!
//! One router serves both kinds; the mount point decides which. The kind is
//! layered in as an extension so every handler scopes its queries without a
//! path parameter.

use axum::extract::{Extension, Multipart, Path};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::common::{CommentId, ContentId, Error, Result, UserId};
use crate::domains::content::actions::{self as content, CreateContentInput};
use crate::domains::content::engine::ReactionKind;
use crate::domains::content::models::{ContentItem, ContentKind};
use crate::server::app::AxumAppState;
use crate::server::middleware::{require_user, AuthUser};
use crate::server::routes::multipart::collect_multipart;
use crate::server::routes::MessageResponse;

/// Routes shared by posts and courses, plus the course-only roster routes.
pub fn router(kind: ContentKind) -> Router {
    let mut router = Router::new()
        .route("/", post(create).get(list))
        .route("/mine", get(list_mine))
        .route("/:id", get(get_one).delete(delete_one))
        .route("/:id/attachments", post(attach))
        .route("/:id/comments", post(comment))
        .route("/:id/comments/:comment_id/replies", post(reply))
        .route("/:id/like", post(like))
        .route("/:id/dislike", post(dislike));

    if kind == ContentKind::Course {
        router = router
            .route("/enrolled", get(list_enrolled))
            .route("/:id/enroll", post(enroll))
            .route("/:id/lecturers/:user_id", post(add_lecturer));
    }

    router.layer(Extension(kind))
}

async fn create(
    Extension(state): Extension<AxumAppState>,
    Extension(kind): Extension<ContentKind>,
    user: Option<Extension<AuthUser>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ContentItem>)> {
    let user = require_user(user)?;
    let form = collect_multipart(multipart).await?;

    let input = CreateContentInput {
        title: form.text("title").unwrap_or_default().to_string(),
        description: form.text("description").unwrap_or_default().to_string(),
        code: form.text("code").unwrap_or_default().to_string(),
    };

    let item = content::create_content(kind, user.user_id, input, form.file, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn list(
    Extension(state): Extension<AxumAppState>,
    Extension(kind): Extension<ContentKind>,
    user: Option<Extension<AuthUser>>,
) -> Result<Json<Vec<ContentItem>>> {
    require_user(user)?;
    let items = content::list_content(kind, &state.deps).await?;
    Ok(Json(items))
}

async fn list_mine(
    Extension(state): Extension<AxumAppState>,
    Extension(kind): Extension<ContentKind>,
    user: Option<Extension<AuthUser>>,
) -> Result<Json<Vec<ContentItem>>> {
    let user = require_user(user)?;
    let items = content::list_own_content(kind, user.user_id, &state.deps).await?;
    Ok(Json(items))
}

async fn get_one(
    Extension(state): Extension<AxumAppState>,
    Extension(kind): Extension<ContentKind>,
    user: Option<Extension<AuthUser>>,
    Path(id): Path<ContentId>,
) -> Result<Json<ContentItem>> {
    require_user(user)?;
    let item = content::get_content(kind, id, &state.deps).await?;
    Ok(Json(item))
}

async fn delete_one(
    Extension(state): Extension<AxumAppState>,
    Extension(kind): Extension<ContentKind>,
    user: Option<Extension<AuthUser>>,
    Path(id): Path<ContentId>,
) -> Result<Json<MessageResponse>> {
    let user = require_user(user)?;
    content::delete_content(kind, id, user.user_id, user.is_admin, &state.deps).await?;
    Ok(Json(MessageResponse::new("deleted")))
}

async fn attach(
    Extension(state): Extension<AxumAppState>,
    Extension(kind): Extension<ContentKind>,
    user: Option<Extension<AuthUser>>,
    Path(id): Path<ContentId>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ContentItem>)> {
    let user = require_user(user)?;
    let mut form = collect_multipart(multipart).await?;

    let mut file = form
        .file
        .take()
        .ok_or_else(|| Error::validation("file is required"))?;

    // An explicit display name wins over the part's filename
    if let Some(name) = form.text("file_name") {
        if !name.trim().is_empty() {
            file.file_name = name.trim().to_string();
        }
    }

    let item = content::attach_file(kind, id, user.user_id, file, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn comment(
    Extension(state): Extension<AxumAppState>,
    Extension(kind): Extension<ContentKind>,
    user: Option<Extension<AuthUser>>,
    Path(id): Path<ContentId>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ContentItem>)> {
    let user = require_user(user)?;
    let form = collect_multipart(multipart).await?;

    let text = form.text("text").unwrap_or_default().to_string();
    let item =
        content::add_comment(kind, id, user.user_id, &text, form.file, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[derive(Deserialize)]
struct ReplyRequest {
    text: String,
}

async fn reply(
    Extension(state): Extension<AxumAppState>,
    Extension(kind): Extension<ContentKind>,
    user: Option<Extension<AuthUser>>,
    Path((id, comment_id)): Path<(ContentId, CommentId)>,
    Json(body): Json<ReplyRequest>,
) -> Result<(StatusCode, Json<ContentItem>)> {
    let user = require_user(user)?;
    let item =
        content::add_reply(kind, id, comment_id, user.user_id, &body.text, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn like(
    Extension(state): Extension<AxumAppState>,
    Extension(kind): Extension<ContentKind>,
    user: Option<Extension<AuthUser>>,
    Path(id): Path<ContentId>,
) -> Result<Json<ContentItem>> {
    react(state, kind, user, id, ReactionKind::Like).await
}

async fn dislike(
    Extension(state): Extension<AxumAppState>,
    Extension(kind): Extension<ContentKind>,
    user: Option<Extension<AuthUser>>,
    Path(id): Path<ContentId>,
) -> Result<Json<ContentItem>> {
    react(state, kind, user, id, ReactionKind::Dislike).await
}

async fn react(
    state: AxumAppState,
    kind: ContentKind,
    user: Option<Extension<AuthUser>>,
    id: ContentId,
    reaction: ReactionKind,
) -> Result<Json<ContentItem>> {
    let user = require_user(user)?;
    let item = content::react(kind, id, user.user_id, reaction, &state.deps).await?;
    Ok(Json(item))
}

async fn list_enrolled(
    Extension(state): Extension<AxumAppState>,
    user: Option<Extension<AuthUser>>,
) -> Result<Json<Vec<ContentItem>>> {
    let user = require_user(user)?;
    let items = content::list_enrolled_courses(user.user_id, &state.deps).await?;
    Ok(Json(items))
}

async fn enroll(
    Extension(state): Extension<AxumAppState>,
    user: Option<Extension<AuthUser>>,
    Path(id): Path<ContentId>,
) -> Result<Json<ContentItem>> {
    let user = require_user(user)?;
    let item = content::enroll_student(id, user.user_id, &state.deps).await?;
    Ok(Json(item))
}

async fn add_lecturer(
    Extension(state): Extension<AxumAppState>,
    user: Option<Extension<AuthUser>>,
    Path((id, lecturer_id)): Path<(ContentId, UserId)>,
) -> Result<Json<ContentItem>> {
    let user = require_user(user)?;
    let item = content::assign_lecturer(id, lecturer_id, user.is_admin, &state.deps).await?;
    Ok(Json(item))
}
