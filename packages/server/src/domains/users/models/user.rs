use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use crate::common::{Error, Result, UserId};

/// User model - SQL persistence layer
///
/// Holds the credential hash alongside profile fields. Anything returned to
/// clients goes through `UserData`, which never carries the hash.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,

    // Profile
    pub photo_url: Option<String>,
    pub title: Option<String>,
    pub semester: Option<String>,
    pub department: Option<String>,
    pub date_of_birth: Option<NaiveDate>,

    // Password reset
    pub reset_code: Option<String>,
    pub reset_code_expires_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a fresh user with an app-generated time-ordered ID.
    pub fn new(full_name: String, email: String, password_hash: String, is_admin: bool) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            full_name,
            email,
            password_hash,
            is_admin,
            photo_url: None,
            title: None,
            semester: None,
            department: None,
            date_of_birth: None,
            reset_code: None,
            reset_code_expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Find user by ID
    pub async fn find_by_id(id: UserId, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or(Error::NotFound("user"))
    }

    /// Find user by email. Emails are stored lowercased.
    pub async fn find_by_email(email: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Check whether an email is already registered
    pub async fn email_exists(email: &str, pool: &PgPool) -> Result<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    /// Insert new user
    pub async fn insert(&self, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO users (
                id,
                full_name,
                email,
                password_hash,
                is_admin,
                photo_url,
                title,
                semester,
                department,
                date_of_birth
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING *",
        )
        .bind(self.id)
        .bind(&self.full_name)
        .bind(&self.email)
        .bind(&self.password_hash)
        .bind(self.is_admin)
        .bind(&self.photo_url)
        .bind(&self.title)
        .bind(&self.semester)
        .bind(&self.department)
        .bind(self.date_of_birth)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Replace the profile section of the user row.
    ///
    /// The photo only changes when a new URL is provided; the other fields
    /// are overwritten with whatever the caller sends, absent meaning
    /// cleared.
    pub async fn update_profile(
        id: UserId,
        title: Option<String>,
        semester: Option<String>,
        department: Option<String>,
        date_of_birth: Option<NaiveDate>,
        photo_url: Option<String>,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE users
             SET title = $2,
                 semester = $3,
                 department = $4,
                 date_of_birth = $5,
                 photo_url = COALESCE($6, photo_url),
                 updated_at = now()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(title)
        .bind(semester)
        .bind(department)
        .bind(date_of_birth)
        .bind(photo_url)
        .fetch_optional(pool)
        .await?
        .ok_or(Error::NotFound("user"))
    }

    /// Store a new password hash
    pub async fn update_password(id: UserId, password_hash: &str, pool: &PgPool) -> Result<()> {
        let result =
            sqlx::query("UPDATE users SET password_hash = $2, updated_at = now() WHERE id = $1")
                .bind(id)
                .bind(password_hash)
                .execute(pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound("user"));
        }
        Ok(())
    }

    /// Attach a pending reset code to the account
    pub async fn set_reset_code(
        id: UserId,
        code: &str,
        expires_at: DateTime<Utc>,
        pool: &PgPool,
    ) -> Result<()> {
        let result = sqlx::query(
            "UPDATE users
             SET reset_code = $2, reset_code_expires_at = $3, updated_at = now()
             WHERE id = $1",
        )
        .bind(id)
        .bind(code)
        .bind(expires_at)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound("user"));
        }
        Ok(())
    }

    /// Store the new hash and clear the consumed reset code in one statement
    pub async fn complete_password_reset(
        id: UserId,
        password_hash: &str,
        pool: &PgPool,
    ) -> Result<()> {
        let result = sqlx::query(
            "UPDATE users
             SET password_hash = $2,
                 reset_code = NULL,
                 reset_code_expires_at = NULL,
                 updated_at = now()
             WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound("user"));
        }
        Ok(())
    }
}
