//! Server dependencies for actions (using traits for testability)
//!
//! This module provides the central dependency container used by all domain
//! actions. External services sit behind trait abstractions so tests can
//! swap in mocks.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use cloudinary::CloudinaryService;
use sqlx::PgPool;

use crate::domains::auth::JwtService;
use crate::kernel::{BaseMailer, BaseUploader, FileUpload, StoredFile};

// =============================================================================
// CloudinaryService Adapter (implements BaseUploader trait)
// =============================================================================

/// Wrapper around CloudinaryService that implements the BaseUploader trait
pub struct CloudinaryAdapter(pub Arc<CloudinaryService>);

impl CloudinaryAdapter {
    pub fn new(service: Arc<CloudinaryService>) -> Self {
        Self(service)
    }
}

#[async_trait]
impl BaseUploader for CloudinaryAdapter {
    async fn store(&self, file: FileUpload) -> Result<StoredFile> {
        let response = self
            .0
            .upload(file.bytes, &file.file_name)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))?;

        Ok(StoredFile {
            url: response.secure_url,
            provider_id: response.public_id,
        })
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to actions (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    pub uploader: Arc<dyn BaseUploader>,
    pub mailer: Arc<dyn BaseMailer>,
    /// JWT service for token creation
    pub jwt_service: Arc<JwtService>,
    /// Emails granted the admin flag at registration
    pub admin_emails: Vec<String>,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    pub fn new(
        db_pool: PgPool,
        uploader: Arc<dyn BaseUploader>,
        mailer: Arc<dyn BaseMailer>,
        jwt_service: Arc<JwtService>,
        admin_emails: Vec<String>,
    ) -> Self {
        Self {
            db_pool,
            uploader,
            mailer,
            jwt_service,
            admin_emails,
        }
    }

    /// Case-insensitive admin allowlist check
    pub fn is_admin_email(&self, email: &str) -> bool {
        self.admin_emails
            .iter()
            .any(|admin| admin.eq_ignore_ascii_case(email))
    }
}
