//! Content domain actions - entry-point business logic
//!
//! Called directly from the HTTP route handlers. Mutating actions follow one
//! shape: load the aggregate, apply an engine transition in memory, save
//! with the revision check, and redo the whole cycle when a concurrent save
//! wins the race.

pub mod core;
pub mod interact;
pub mod queries;
pub mod roster;

// Re-export for convenience
pub use core::*;
pub use interact::*;
pub use queries::*;
pub use roster::*;

use sqlx::PgPool;

use crate::common::{ContentId, Error, Result};
use crate::domains::content::models::{ContentItem, ContentKind};

/// How many times a mutating action reloads and reapplies after losing a
/// save race.
const MAX_SAVE_ATTEMPTS: usize = 3;

/// Load-mutate-save cycle with bounded conflict retries.
///
/// `mutate` must be repeatable: it runs once per attempt against a freshly
/// loaded copy. Validation and not-found errors from the transition abort
/// immediately; only [`Error::Conflict`] from the save triggers a reload.
pub(crate) async fn update_aggregate<F>(
    id: ContentId,
    kind: ContentKind,
    pool: &PgPool,
    mutate: F,
) -> Result<ContentItem>
where
    F: Fn(&mut ContentItem) -> Result<()>,
{
    for _ in 0..MAX_SAVE_ATTEMPTS {
        let mut item = ContentItem::load(id, kind, pool).await?;
        mutate(&mut item)?;

        match item.save(pool).await {
            Ok(saved) => return Ok(saved),
            Err(Error::Conflict) => {
                tracing::debug!("Concurrent save of {} {}, retrying", kind, id);
                continue;
            }
            Err(e) => return Err(e),
        }
    }

    Err(Error::Conflict)
}
