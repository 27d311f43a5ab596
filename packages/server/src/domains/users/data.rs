//! Client-facing user representation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::common::UserId;
use crate::domains::users::models::User;

/// Profile data returned to clients. Never includes the password hash or any
/// pending reset code.
#[derive(Debug, Clone, Serialize)]
pub struct UserData {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    pub is_admin: bool,
    pub photo_url: Option<String>,
    pub title: Option<String>,
    pub semester: Option<String>,
    pub department: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserData {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            is_admin: user.is_admin,
            photo_url: user.photo_url,
            title: user.title,
            semester: user.semester,
            department: user.department,
            date_of_birth: user.date_of_birth,
            created_at: user.created_at,
        }
    }
}
