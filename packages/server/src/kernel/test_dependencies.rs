// Mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

use super::{BaseMailer, BaseUploader, FileUpload, ServerDeps, StoredFile};
use crate::domains::auth::JwtService;

// =============================================================================
// Mock Uploader
// =============================================================================

/// Arguments captured from a store call
#[derive(Debug, Clone)]
pub struct UploadCallArgs {
    pub file_name: String,
    pub content_type: Option<String>,
    pub byte_count: usize,
}

pub struct MockUploader {
    calls: Arc<Mutex<Vec<UploadCallArgs>>>,
    fail_with: Arc<Mutex<Option<String>>>,
}

impl MockUploader {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Arc::new(Mutex::new(None)),
        }
    }

    /// Make every subsequent store call fail with this message
    pub fn with_failure(self, message: &str) -> Self {
        *self.fail_with.lock().unwrap() = Some(message.to_string());
        self
    }

    /// Get all captured store calls
    pub fn calls(&self) -> Vec<UploadCallArgs> {
        self.calls.lock().unwrap().clone()
    }

    /// Check if a file with this name was handed to the uploader
    pub fn was_uploaded(&self, file_name: &str) -> bool {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .any(|call| call.file_name == file_name)
    }
}

impl Default for MockUploader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseUploader for MockUploader {
    async fn store(&self, file: FileUpload) -> Result<StoredFile> {
        // Record the call, even when configured to fail
        self.calls.lock().unwrap().push(UploadCallArgs {
            file_name: file.file_name.clone(),
            content_type: file.content_type.clone(),
            byte_count: file.bytes.len(),
        });

        if let Some(message) = self.fail_with.lock().unwrap().clone() {
            anyhow::bail!("{}", message);
        }

        Ok(StoredFile {
            url: format!("https://cdn.test/{}", file.file_name),
            provider_id: format!("mock_{}", file.file_name),
        })
    }
}

// =============================================================================
// Mock Mailer
// =============================================================================

/// A message captured by the mock mailer
#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

pub struct MockMailer {
    sent: Arc<Mutex<Vec<SentMail>>>,
    fail_with: Arc<Mutex<Option<String>>>,
}

impl MockMailer {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail_with: Arc::new(Mutex::new(None)),
        }
    }

    /// Make every subsequent send call fail with this message
    pub fn with_failure(self, message: &str) -> Self {
        *self.fail_with.lock().unwrap() = Some(message.to_string());
        self
    }

    /// Get all captured messages
    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }

    /// Check if a message was addressed to this recipient
    pub fn sent_to(&self, to: &str) -> bool {
        self.sent.lock().unwrap().iter().any(|mail| mail.to == to)
    }
}

impl Default for MockMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseMailer for MockMailer {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<()> {
        // Record the attempt, even when configured to fail
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            html: html.to_string(),
        });

        if let Some(message) = self.fail_with.lock().unwrap().clone() {
            anyhow::bail!("{}", message);
        }

        Ok(())
    }
}

// =============================================================================
// Test ServerDeps builder
// =============================================================================

/// ServerDeps wired to mocks, with the mock handles kept for assertions
pub struct TestDeps {
    pub deps: ServerDeps,
    pub uploader: Arc<MockUploader>,
    pub mailer: Arc<MockMailer>,
}

/// Build ServerDeps around fresh mocks
pub fn test_deps(db_pool: PgPool) -> TestDeps {
    test_deps_with(db_pool, MockUploader::new(), MockMailer::new())
}

/// Build ServerDeps around pre-configured mocks
pub fn test_deps_with(db_pool: PgPool, uploader: MockUploader, mailer: MockMailer) -> TestDeps {
    let uploader = Arc::new(uploader);
    let mailer = Arc::new(mailer);
    let jwt_service = Arc::new(JwtService::new("test_secret_key", "test_issuer".to_string()));

    let deps = ServerDeps::new(
        db_pool,
        uploader.clone(),
        mailer.clone(),
        jwt_service,
        vec!["dean@university.edu".to_string()],
    );

    TestDeps {
        deps,
        uploader,
        mailer,
    }
}
