pub mod content_item;

pub use content_item::{Attachment, Comment, ContentItem, ContentKind, Reply};
