//! Read-side queries for content items.

use tracing::info;

use crate::common::{ContentId, Result, UserId};
use crate::domains::content::models::{ContentItem, ContentKind};
use crate::kernel::ServerDeps;

/// All items of one kind, newest first.
pub async fn list_content(kind: ContentKind, deps: &ServerDeps) -> Result<Vec<ContentItem>> {
    info!("Listing all {}s", kind);
    ContentItem::list(kind, &deps.db_pool).await
}

/// A single item by ID.
pub async fn get_content(
    kind: ContentKind,
    id: ContentId,
    deps: &ServerDeps,
) -> Result<ContentItem> {
    ContentItem::load(id, kind, &deps.db_pool).await
}

/// The caller's own items, newest first.
pub async fn list_own_content(
    kind: ContentKind,
    author_id: UserId,
    deps: &ServerDeps,
) -> Result<Vec<ContentItem>> {
    info!("Listing {}s authored by {}", kind, author_id);
    ContentItem::list_by_author(kind, author_id, &deps.db_pool).await
}

/// Courses whose student roster contains the caller, newest first.
pub async fn list_enrolled_courses(
    user_id: UserId,
    deps: &ServerDeps,
) -> Result<Vec<ContentItem>> {
    info!("Listing courses {} is enrolled in", user_id);
    ContentItem::list_enrolled(user_id, &deps.db_pool).await
}
