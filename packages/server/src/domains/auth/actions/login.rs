//! Credential login.

use tracing::info;

use crate::common::{Error, Result};
use crate::domains::auth::data::AuthResponse;
use crate::domains::auth::password;
use crate::domains::users::data::UserData;
use crate::domains::users::models::User;
use crate::kernel::ServerDeps;

/// Input for the login action
#[derive(Debug, Clone)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Verify credentials and sign a token.
///
/// An unknown email and a wrong password answer identically.
pub async fn login_user(input: LoginInput, deps: &ServerDeps) -> Result<AuthResponse> {
    let email = input.email.trim().to_lowercase();
    if email.is_empty() || input.password.is_empty() {
        return Err(Error::validation("email and password are required"));
    }

    let user = User::find_by_email(&email, &deps.db_pool)
        .await?
        .ok_or_else(|| Error::unauthorized("invalid email or password"))?;

    if !password::verify_password(&input.password, &user.password_hash)? {
        return Err(Error::unauthorized("invalid email or password"));
    }

    info!("User {} logged in", user.id);

    let token = deps
        .jwt_service
        .create_token(user.id, user.email.clone(), user.is_admin)?;

    Ok(AuthResponse {
        user: UserData::from(user),
        token,
    })
}
