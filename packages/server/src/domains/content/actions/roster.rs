//! Course rosters: student enrollment and lecturer assignment.
//!
//! Both operations look the item up by ID alone and let the engine reject
//! non-course kinds, so pointing them at a post answers with a validation
//! error rather than a counterfeit not-found.

use tracing::info;

use crate::common::{ContentId, Error, Result, UserId};
use crate::domains::content::engine;
use crate::domains::content::models::ContentItem;
use crate::domains::users::models::User;
use crate::kernel::ServerDeps;

/// Add the caller to a course's student roster.
///
/// Enrolling twice is a no-op, not an error.
pub async fn enroll_student(
    course_id: ContentId,
    user_id: UserId,
    deps: &ServerDeps,
) -> Result<ContentItem> {
    let current = ContentItem::find_any(course_id, &deps.db_pool)
        .await?
        .ok_or(Error::NotFound("course"))?;

    let item = super::update_aggregate(course_id, current.kind, &deps.db_pool, |item| {
        engine::enroll_student(item, user_id)
    })
    .await?;

    info!("User {} enrolled in course {}", user_id, course_id);
    Ok(item)
}

/// Add a lecturer to a course roster. Admins only.
///
/// The target must be an existing account; assigning twice is a no-op.
pub async fn assign_lecturer(
    course_id: ContentId,
    lecturer_id: UserId,
    actor_is_admin: bool,
    deps: &ServerDeps,
) -> Result<ContentItem> {
    if !actor_is_admin {
        return Err(Error::unauthorized("admin access required"));
    }

    User::find_by_id(lecturer_id, &deps.db_pool).await?;

    let current = ContentItem::find_any(course_id, &deps.db_pool)
        .await?
        .ok_or(Error::NotFound("course"))?;

    let item = super::update_aggregate(course_id, current.kind, &deps.db_pool, |item| {
        engine::assign_lecturer(item, lecturer_id)
    })
    .await?;

    info!("Assigned lecturer {} to course {}", lecturer_id, course_id);
    Ok(item)
}
