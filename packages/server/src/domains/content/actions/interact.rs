//! Reactions, comments, and replies.
//!
//! These are the operations that run concurrently in practice, so each one
//! is an engine transition wrapped in the bounded retry cycle.

use tracing::info;

use crate::common::{CommentId, ContentId, Error, Result, UserId};
use crate::domains::content::engine::{self, ReactionKind};
use crate::domains::content::models::{ContentItem, ContentKind};
use crate::kernel::{FileUpload, ServerDeps};

/// Toggle a like or dislike for `user_id` on the item.
pub async fn react(
    kind: ContentKind,
    id: ContentId,
    user_id: UserId,
    reaction: ReactionKind,
    deps: &ServerDeps,
) -> Result<ContentItem> {
    let item = super::update_aggregate(id, kind, &deps.db_pool, |item| {
        engine::apply_reaction(item, user_id, reaction);
        Ok(())
    })
    .await?;

    info!(
        "User {} reacted {} on {} {} (likes {}, dislikes {})",
        user_id, reaction, kind, id, item.likes_count, item.dislikes_count
    );
    Ok(item)
}

/// Append a comment, uploading its optional attachment first.
pub async fn add_comment(
    kind: ContentKind,
    id: ContentId,
    author_id: UserId,
    text: &str,
    attachment: Option<FileUpload>,
    deps: &ServerDeps,
) -> Result<ContentItem> {
    // Empty text and a missing item are both rejected before the provider
    // is involved
    if text.trim().is_empty() {
        return Err(Error::validation("comment text is required"));
    }
    ContentItem::load(id, kind, &deps.db_pool).await?;

    let attachment_url = match attachment {
        Some(file) => {
            let stored = deps
                .uploader
                .store(file)
                .await
                .map_err(|e| Error::UploadFailed(e.to_string()))?;
            Some(stored.url)
        }
        None => None,
    };

    let item = super::update_aggregate(id, kind, &deps.db_pool, |item| {
        engine::add_comment(item, author_id, text, attachment_url.clone()).map(|_| ())
    })
    .await?;

    info!("User {} commented on {} {}", author_id, kind, id);
    Ok(item)
}

/// Append a reply under an existing comment.
pub async fn add_reply(
    kind: ContentKind,
    id: ContentId,
    comment_id: CommentId,
    author_id: UserId,
    text: &str,
    deps: &ServerDeps,
) -> Result<ContentItem> {
    let item = super::update_aggregate(id, kind, &deps.db_pool, |item| {
        engine::add_reply(item, comment_id, author_id, text).map(|_| ())
    })
    .await?;

    info!(
        "User {} replied to comment {} on {} {}",
        author_id, comment_id, kind, id
    );
    Ok(item)
}
