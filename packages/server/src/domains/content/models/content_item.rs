use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::common::{AttachmentId, CommentId, ContentId, Error, ReplyId, Result, UserId};

/// Discriminator for the two publishable item kinds. Posts and courses share
/// one table and one set of interaction rules; courses additionally carry
/// enrollment rosters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Post,
    Course,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Post => "post",
            ContentKind::Course => "course",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ContentKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "post" => Ok(ContentKind::Post),
            "course" => Ok(ContentKind::Course),
            _ => Err(anyhow::anyhow!("Invalid content kind: {}", s)),
        }
    }
}

// =============================================================================
// Embedded documents
// =============================================================================

/// A reply nested under a comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub id: ReplyId,
    pub author_id: UserId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A comment on a content item, with its nested replies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub author_id: UserId,
    pub text: String,
    pub attachment_url: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub replies: Vec<Reply>,
}

/// A file stored with the upload provider and linked to the item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: AttachmentId,
    pub uploader_id: UserId,
    pub file_name: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Aggregate
// =============================================================================

/// ContentItem model - SQL persistence layer
///
/// One row per post or course. Reactions, comments, attachments and rosters
/// are embedded as jsonb so the whole aggregate loads and saves as a unit;
/// `revision` guards saves against concurrent writers. The `likes_count` and
/// `dislikes_count` columns are maintained by the engine transitions and
/// always equal the length of the corresponding set.
#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Serialize)]
pub struct ContentItem {
    pub id: ContentId,
    pub kind: ContentKind,
    pub author_id: UserId,
    pub author_name: String,
    pub title: String,
    pub description: String,
    pub code: String,
    pub image_url: Option<String>,

    // Reactions
    pub likes: Json<Vec<UserId>>,
    pub dislikes: Json<Vec<UserId>>,
    pub likes_count: i32,
    pub dislikes_count: i32,

    // Embedded documents
    pub comments: Json<Vec<Comment>>,
    pub attachments: Json<Vec<Attachment>>,

    // Course rosters (stay empty for posts)
    pub students: Json<Vec<UserId>>,
    pub lecturers: Json<Vec<UserId>>,

    // Bumped by one on every successful save
    pub revision: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentItem {
    /// Build a fresh aggregate with no interactions yet.
    pub fn new(
        kind: ContentKind,
        author_id: UserId,
        author_name: String,
        title: String,
        description: String,
        code: String,
        image_url: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ContentId::new(),
            kind,
            author_id,
            author_name,
            title,
            description,
            code,
            image_url,
            likes: Json(Vec::new()),
            dislikes: Json(Vec::new()),
            likes_count: 0,
            dislikes_count: 0,
            comments: Json(Vec::new()),
            attachments: Json(Vec::new()),
            students: Json(Vec::new()),
            lecturers: Json(Vec::new()),
            revision: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl ContentItem {
    /// Load the aggregate by ID within a kind
    pub async fn load(id: ContentId, kind: ContentKind, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>("SELECT * FROM content_items WHERE id = $1 AND kind = $2")
            .bind(id)
            .bind(kind)
            .fetch_optional(pool)
            .await?
            .ok_or(Error::NotFound(kind.as_str()))
    }

    /// Load the aggregate by ID regardless of kind
    pub async fn find_any(id: ContentId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM content_items WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// All items of a kind, newest first
    pub async fn list(kind: ContentKind, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM content_items WHERE kind = $1 ORDER BY created_at DESC",
        )
        .bind(kind)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Items of a kind authored by one user, newest first
    pub async fn list_by_author(
        kind: ContentKind,
        author_id: UserId,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM content_items
             WHERE kind = $1 AND author_id = $2
             ORDER BY created_at DESC",
        )
        .bind(kind)
        .bind(author_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Courses whose student roster contains the user, newest first
    pub async fn list_enrolled(user_id: UserId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM content_items
             WHERE kind = $1 AND students @> $2
             ORDER BY created_at DESC",
        )
        .bind(ContentKind::Course)
        .bind(Json(vec![user_id]))
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Insert the aggregate as a new row
    pub async fn insert(&self, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO content_items (
                id,
                kind,
                author_id,
                author_name,
                title,
                description,
                code,
                image_url,
                likes,
                dislikes,
                likes_count,
                dislikes_count,
                comments,
                attachments,
                students,
                lecturers,
                revision
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
             RETURNING *",
        )
        .bind(self.id)
        .bind(self.kind)
        .bind(self.author_id)
        .bind(&self.author_name)
        .bind(&self.title)
        .bind(&self.description)
        .bind(&self.code)
        .bind(&self.image_url)
        .bind(&self.likes)
        .bind(&self.dislikes)
        .bind(self.likes_count)
        .bind(self.dislikes_count)
        .bind(&self.comments)
        .bind(&self.attachments)
        .bind(&self.students)
        .bind(&self.lecturers)
        .bind(self.revision)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Persist the aggregate if nobody else saved it since this copy was
    /// loaded.
    ///
    /// The stored revision must still equal the one on this copy; a
    /// successful save advances it by one and returns the stored row. A
    /// revision mismatch surfaces as [`Error::Conflict`] so the caller can
    /// reload and retry; a vanished row surfaces as `NotFound`.
    pub async fn save(&self, pool: &PgPool) -> Result<Self> {
        let updated = sqlx::query_as::<_, Self>(
            "UPDATE content_items
             SET title = $3,
                 description = $4,
                 code = $5,
                 image_url = $6,
                 likes = $7,
                 dislikes = $8,
                 likes_count = $9,
                 dislikes_count = $10,
                 comments = $11,
                 attachments = $12,
                 students = $13,
                 lecturers = $14,
                 revision = revision + 1,
                 updated_at = now()
             WHERE id = $1 AND revision = $2
             RETURNING *",
        )
        .bind(self.id)
        .bind(self.revision)
        .bind(&self.title)
        .bind(&self.description)
        .bind(&self.code)
        .bind(&self.image_url)
        .bind(&self.likes)
        .bind(&self.dislikes)
        .bind(self.likes_count)
        .bind(self.dislikes_count)
        .bind(&self.comments)
        .bind(&self.attachments)
        .bind(&self.students)
        .bind(&self.lecturers)
        .fetch_optional(pool)
        .await?;

        match updated {
            Some(item) => Ok(item),
            None => {
                if Self::exists(self.id, pool).await? {
                    Err(Error::Conflict)
                } else {
                    Err(Error::NotFound(self.kind.as_str()))
                }
            }
        }
    }

    /// Check whether a row with this ID is present at all
    pub async fn exists(id: ContentId, pool: &PgPool) -> Result<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM content_items WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    /// Delete the item row
    pub async fn delete(id: ContentId, kind: ContentKind, pool: &PgPool) -> Result<()> {
        let result = sqlx::query("DELETE FROM content_items WHERE id = $1 AND kind = $2")
            .bind(id)
            .bind(kind)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(kind.as_str()));
        }
        Ok(())
    }
}

// =============================================================================
// sqlx support for ContentKind (stored as text)
// =============================================================================

use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef, Postgres};
use sqlx::{Decode, Encode, Type};

impl Type<Postgres> for ContentKind {
    fn type_info() -> PgTypeInfo {
        <&str as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <&str as Type<Postgres>>::compatible(ty)
    }
}

impl Encode<'_, Postgres> for ContentKind {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> std::result::Result<IsNull, BoxDynError> {
        <&str as Encode<Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

impl Decode<'_, Postgres> for ContentKind {
    fn decode(value: PgValueRef<'_>) -> std::result::Result<Self, BoxDynError> {
        let s = <&str as Decode<Postgres>>::decode(value)?;
        s.parse().map_err(Into::into)
    }
}

// =============================================================================
// Tests
// =============================================================================
