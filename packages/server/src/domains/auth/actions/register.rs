//! Account registration.

use tracing::{info, warn};

use crate::common::{Error, Result};
use crate::domains::auth::data::AuthResponse;
use crate::domains::auth::{emails, password};
use crate::domains::users::data::UserData;
use crate::domains::users::models::User;
use crate::kernel::ServerDeps;

/// Input for the register action
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Create an account and sign the first token.
///
/// The admin flag comes from the configured allowlist, never from the
/// request body. The welcome mail is best-effort: a delivery failure is
/// logged but the registration still succeeds.
pub async fn register_user(input: RegisterInput, deps: &ServerDeps) -> Result<AuthResponse> {
    let full_name = input.full_name.trim().to_string();
    let email = input.email.trim().to_lowercase();

    if full_name.is_empty() || email.is_empty() || input.password.is_empty() {
        return Err(Error::validation("name, email and password are required"));
    }
    if !is_plausible_email(&email) {
        return Err(Error::validation("please enter a valid email"));
    }
    password::validate_password(&input.password)?;

    if User::email_exists(&email, &deps.db_pool).await? {
        return Err(Error::validation("email has already been registered"));
    }

    let password_hash = password::hash_password(&input.password)?;
    let is_admin = deps.is_admin_email(&email);

    let user = match User::new(full_name, email, password_hash, is_admin)
        .insert(&deps.db_pool)
        .await
    {
        Ok(user) => user,
        // The unique index backs up the pre-check under concurrent registration
        Err(Error::Database(sqlx::Error::Database(db))) if db.is_unique_violation() => {
            return Err(Error::validation("email has already been registered"));
        }
        Err(e) => return Err(e),
    };

    info!("Registered user {} ({})", user.id, user.email);

    let (subject, html) = emails::welcome_email(&user.full_name);
    if let Err(e) = deps.mailer.send(&user.email, &subject, &html).await {
        warn!(user_id = %user.id, error = %e, "Failed to send welcome email");
    }

    let token = deps
        .jwt_service
        .create_token(user.id, user.email.clone(), user.is_admin)?;

    Ok(AuthResponse {
        user: UserData::from(user),
        token,
    })
}

/// Cheap shape check; the only real email verification is delivery.
fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_plausibility() {
        assert!(is_plausible_email("ada@university.edu"));
        assert!(is_plausible_email("first.last@sub.university.edu"));

        assert!(!is_plausible_email("not-an-email"));
        assert!(!is_plausible_email("@university.edu"));
        assert!(!is_plausible_email("ada@"));
        assert!(!is_plausible_email("ada@nodot"));
        assert!(!is_plausible_email("ada@.edu"));
        assert!(!is_plausible_email("ada@edu."));
    }
}
