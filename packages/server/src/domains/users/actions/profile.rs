//! Profile queries and updates.

use chrono::NaiveDate;
use tracing::info;

use crate::common::{Error, Result, UserId};
use crate::domains::users::data::UserData;
use crate::domains::users::models::User;
use crate::kernel::{FileUpload, ServerDeps};

/// Fetch a profile by ID
pub async fn get_profile(user_id: UserId, deps: &ServerDeps) -> Result<UserData> {
    let user = User::find_by_id(user_id, &deps.db_pool).await?;
    Ok(UserData::from(user))
}

/// Input for the update-profile action
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileInput {
    pub title: Option<String>,
    pub semester: Option<String>,
    pub department: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

/// Replace the caller's profile fields, optionally storing a new photo.
///
/// The upload completes before the row is touched; a rejected upload leaves
/// the profile unchanged.
pub async fn update_profile(
    user_id: UserId,
    input: UpdateProfileInput,
    photo: Option<FileUpload>,
    deps: &ServerDeps,
) -> Result<UserData> {
    let user = User::find_by_id(user_id, &deps.db_pool).await?;

    let photo_url = match photo {
        Some(file) => Some(
            deps.uploader
                .store(file)
                .await
                .map_err(|e| Error::UploadFailed(e.to_string()))?
                .url,
        ),
        None => None,
    };

    let updated = User::update_profile(
        user.id,
        input.title,
        input.semester,
        input.department,
        input.date_of_birth,
        photo_url,
        &deps.db_pool,
    )
    .await?;

    info!("User {} updated profile", updated.id);
    Ok(UserData::from(updated))
}
