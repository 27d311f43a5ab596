// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (like "attach a file to a course") should be domain
// functions that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseUploader, BaseMailer)

use anyhow::Result;
use async_trait::async_trait;

// =============================================================================
// File Upload Trait (Infrastructure)
// =============================================================================

/// A file received from a client, ready to hand to the upload provider.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Location of a file after the provider accepted it.
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Public HTTPS URL clients can fetch.
    pub url: String,
    /// Provider-side identifier, kept for bookkeeping.
    pub provider_id: String,
}

#[async_trait]
pub trait BaseUploader: Send + Sync {
    /// Store a file with the third-party provider and return where it landed
    async fn store(&self, file: FileUpload) -> Result<StoredFile>;
}

// =============================================================================
// Mailer Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseMailer: Send + Sync {
    /// Send a single HTML email
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<()>;
}
