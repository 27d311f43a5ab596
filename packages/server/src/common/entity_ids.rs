//! Typed ID definitions for all domain entities.
//!
//! This module defines type aliases for each domain entity, providing
//! compile-time type safety for ID usage throughout the application.
//!
//! # Example
//!
//! ```rust
//! use server_core::common::{ContentId, UserId};
//!
//! // These are incompatible types - compiler prevents mixing them up
//! let user_id: UserId = UserId::new();
//! let content_id: ContentId = ContentId::new();
//!
//! // This would be a compile error:
//! // let wrong: ContentId = user_id;
//! ```

// Re-export the core Id type
pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for User entities (accounts).
pub struct User;

/// Marker type for ContentItem entities (posts and courses).
pub struct Content;

/// Marker type for Comment entities (embedded in content items).
pub struct Comment;

/// Marker type for Reply entities (embedded in comments).
pub struct Reply;

/// Marker type for Attachment entities (embedded in content items).
pub struct Attachment;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for User entities.
pub type UserId = Id<User>;

/// Typed ID for ContentItem entities.
pub type ContentId = Id<Content>;

/// Typed ID for Comment entities.
pub type CommentId = Id<Comment>;

/// Typed ID for Reply entities.
pub type ReplyId = Id<Reply>;

/// Typed ID for Attachment entities.
pub type AttachmentId = Id<Attachment>;
