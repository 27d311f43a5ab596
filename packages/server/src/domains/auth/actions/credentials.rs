//! Password maintenance: change, forgot, verify code, reset.

use chrono::Utc;
use tracing::info;

use crate::common::{Error, Result, UserId};
use crate::domains::auth::{emails, password, reset};
use crate::domains::users::models::User;
use crate::kernel::ServerDeps;

/// Input for the change-password action
#[derive(Debug, Clone)]
pub struct ChangePasswordInput {
    pub old_password: String,
    pub new_password: String,
}

/// Change an authenticated user's password after confirming the old one.
pub async fn change_password(
    user_id: UserId,
    input: ChangePasswordInput,
    deps: &ServerDeps,
) -> Result<()> {
    if input.old_password.is_empty() || input.new_password.is_empty() {
        return Err(Error::validation("old and new password are required"));
    }

    let user = User::find_by_id(user_id, &deps.db_pool).await?;

    if !password::verify_password(&input.old_password, &user.password_hash)? {
        return Err(Error::validation("old password is incorrect"));
    }

    password::validate_password(&input.new_password)?;
    let password_hash = password::hash_password(&input.new_password)?;
    User::update_password(user.id, &password_hash, &deps.db_pool).await?;

    info!("User {} changed password", user.id);
    Ok(())
}

/// Issue a reset code and email it to the account holder.
///
/// A mail delivery failure fails the whole request.
pub async fn forgot_password(email: &str, deps: &ServerDeps) -> Result<()> {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return Err(Error::validation("email is required"));
    }

    let user = User::find_by_email(&email, &deps.db_pool)
        .await?
        .ok_or(Error::NotFound("account"))?;

    let code = reset::generate_code();
    let expires_at = reset::code_expiry(Utc::now());
    User::set_reset_code(user.id, &code, expires_at, &deps.db_pool).await?;

    let (subject, html) = emails::reset_email(&user.full_name, &code);
    deps.mailer.send(&user.email, &subject, &html).await?;

    info!("Issued password reset code for user {}", user.id);
    Ok(())
}

/// Check a presented reset code without consuming it.
///
/// Clients call this after the user types the code from the email, before
/// showing the new-password form.
pub async fn verify_reset_code(email: &str, code: &str, deps: &ServerDeps) -> Result<()> {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return Err(Error::validation("email is required"));
    }

    let user = User::find_by_email(&email, &deps.db_pool)
        .await?
        .ok_or(Error::NotFound("account"))?;

    let stored = user.reset_code.as_deref().zip(user.reset_code_expires_at);
    reset::verify_code(stored, code, Utc::now())
}

/// Input for the reset-password action
#[derive(Debug, Clone)]
pub struct ResetPasswordInput {
    pub email: String,
    pub code: String,
    pub new_password: String,
}

/// Set a new password using an emailed reset code, consuming the code.
pub async fn reset_password(input: ResetPasswordInput, deps: &ServerDeps) -> Result<()> {
    let email = input.email.trim().to_lowercase();
    if email.is_empty() {
        return Err(Error::validation("email is required"));
    }

    let user = User::find_by_email(&email, &deps.db_pool)
        .await?
        .ok_or(Error::NotFound("account"))?;

    let stored = user.reset_code.as_deref().zip(user.reset_code_expires_at);
    reset::verify_code(stored, &input.code, Utc::now())?;

    password::validate_password(&input.new_password)?;
    let password_hash = password::hash_password(&input.new_password)?;
    User::complete_password_reset(user.id, &password_hash, &deps.db_pool).await?;

    info!("User {} reset password", user.id);
    Ok(())
}
