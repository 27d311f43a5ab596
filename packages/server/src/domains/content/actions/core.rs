//! Create, delete, and attach files to content items.

use tracing::info;

use crate::common::{ContentId, Error, Result, UserId};
use crate::domains::content::engine;
use crate::domains::content::models::{ContentItem, ContentKind};
use crate::domains::users::models::User;
use crate::kernel::{FileUpload, ServerDeps};

pub struct CreateContentInput {
    pub title: String,
    pub description: String,
    pub code: String,
}

/// Publish a new post or course.
///
/// The author's display name is denormalized onto the item at creation time
/// so listings never join back to the users table.
pub async fn create_content(
    kind: ContentKind,
    author_id: UserId,
    input: CreateContentInput,
    image: Option<FileUpload>,
    deps: &ServerDeps,
) -> Result<ContentItem> {
    let title = input.title.trim().to_string();
    let description = input.description.trim().to_string();
    let code = input.code.trim().to_string();

    if title.is_empty() || description.is_empty() || code.is_empty() {
        return Err(Error::validation("title, description and code are required"));
    }

    let author = User::find_by_id(author_id, &deps.db_pool).await?;

    let image_url = match image {
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

    let item = ContentItem::new(
        kind,
        author.id,
        author.full_name,
        title,
        expand_newlines(&description),
        code,
        image_url,
    )
    .insert(&deps.db_pool)
    .await?;

    info!("Created {} {} by user {}", kind, item.id, author_id);
    Ok(item)
}

/// Delete an item. Only the author or an admin may do this.
pub async fn delete_content(
    kind: ContentKind,
    id: ContentId,
    actor_id: UserId,
    actor_is_admin: bool,
    deps: &ServerDeps,
) -> Result<()> {
    let item = ContentItem::load(id, kind, &deps.db_pool).await?;

    if item.author_id != actor_id && !actor_is_admin {
        return Err(Error::unauthorized(
            "only the author or an admin can delete this",
        ));
    }

    ContentItem::delete(item.id, kind, &deps.db_pool).await?;

    info!("Deleted {} {}", kind, id);
    Ok(())
}

/// Store a file with the provider and link it to the item.
///
/// The item is checked before the provider is called; a failed upload leaves
/// the aggregate untouched.
pub async fn attach_file(
    kind: ContentKind,
    id: ContentId,
    uploader_id: UserId,
    file: FileUpload,
    deps: &ServerDeps,
) -> Result<ContentItem> {
    if file.file_name.trim().is_empty() {
        return Err(Error::validation("file name is required"));
    }
    if file.bytes.is_empty() {
        return Err(Error::validation("file is required"));
    }

    ContentItem::load(id, kind, &deps.db_pool).await?;

    let file_name = file.file_name.clone();
    let stored = deps
        .uploader
        .store(file)
        .await
        .map_err(|e| Error::UploadFailed(e.to_string()))?;

    let item = super::update_aggregate(id, kind, &deps.db_pool, |item| {
        engine::add_attachment(item, uploader_id, &file_name, stored.url.clone()).map(|_| ())
    })
    .await?;

    info!("Attached {} to {} {}", file_name, kind, id);
    Ok(item)
}

/// Descriptions are rendered as HTML by the clients, so stored text carries
/// explicit line breaks.
fn expand_newlines(text: &str) -> String {
    text.replace("\r\n", "<br/>").replace(['\r', '\n'], "<br/>")
}

// =====================================================
// Tests
// =====================================================
