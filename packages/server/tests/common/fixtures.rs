//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods directly to create test data.

use anyhow::Result;
use server_core::domains::auth::password;
use server_core::domains::content::models::{ContentItem, ContentKind};
use server_core::domains::users::models::User;
use sqlx::PgPool;

/// Password every fixture account can log in with
pub const TEST_PASSWORD: &str = "password123";

/// Unique email per call so tests sharing the database never collide
pub fn unique_email(prefix: &str) -> String {
    format!("{}_{}@university.edu", prefix, uuid::Uuid::new_v4().simple())
}

/// Create a test user with the fixture password
pub async fn create_test_user(
    pool: &PgPool,
    full_name: &str,
    email: &str,
    is_admin: bool,
) -> Result<User> {
    let hash = password::hash_password(TEST_PASSWORD)?;
    let user = User::new(full_name.to_string(), email.to_string(), hash, is_admin)
        .insert(pool)
        .await?;
    Ok(user)
}

/// Create a post authored by the given user
pub async fn create_test_post(pool: &PgPool, author: &User, title: &str) -> Result<ContentItem> {
    let item = ContentItem::new(
        ContentKind::Post,
        author.id,
        author.full_name.clone(),
        title.to_string(),
        "A post used by the integration tests".to_string(),
        "GEN-100".to_string(),
        None,
    )
    .insert(pool)
    .await?;
    Ok(item)
}

/// Create a course authored by the given user
pub async fn create_test_course(pool: &PgPool, author: &User, title: &str) -> Result<ContentItem> {
    let item = ContentItem::new(
        ContentKind::Course,
        author.id,
        author.full_name.clone(),
        title.to_string(),
        "A course used by the integration tests".to_string(),
        "CS-340".to_string(),
        None,
    )
    .insert(pool)
    .await?;
    Ok(item)
}
