//! User account routes.
//!
//! Paths keep the flat shapes mobile clients already call
//! (`/users/getuser`, `/users/changepassword`, ...). Handlers stay thin:
//! decode the request, call the domain action, encode the result.

use axum::extract::{Extension, Multipart};
use axum::http::StatusCode;
use axum::routing::{get, patch, post, put};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::common::{Error, Result};
use crate::domains::auth::actions::{
    ChangePasswordInput, LoginInput, RegisterInput, ResetPasswordInput,
};
use crate::domains::auth::{actions as auth, data::AuthResponse};
use crate::domains::users::actions::{self as users, UpdateProfileInput};
use crate::domains::users::data::UserData;
use crate::server::app::AxumAppState;
use crate::server::middleware::{require_user, AuthUser};
use crate::server::routes::multipart::collect_multipart;
use crate::server::routes::MessageResponse;

pub fn router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", get(logout))
        .route("/loggedin", get(logged_in))
        .route("/getuser", get(get_user))
        .route("/updateuser", put(update_user))
        .route("/changepassword", patch(change_password))
        .route("/forgotpassword", post(forgot_password))
        .route("/resetemailsent", post(verify_reset_code))
        .route("/resetpassword", put(reset_password))
}

#[derive(Deserialize)]
struct RegisterRequest {
    full_name: String,
    email: String,
    password: String,
}

async fn register(
    Extension(state): Extension<AxumAppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    let response = auth::register_user(
        RegisterInput {
            full_name: body.full_name,
            email: body.email,
            password: body.password,
        },
        &state.deps,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(response)))
}

#[derive(Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

async fn login(
    Extension(state): Extension<AxumAppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let response = auth::login_user(
        LoginInput {
            email: body.email,
            password: body.password,
        },
        &state.deps,
    )
    .await?;

    Ok(Json(response))
}

/// Tokens are stateless; logout is the client discarding its copy.
async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse::new("logged out"))
}

async fn logged_in(user: Option<Extension<AuthUser>>) -> Json<bool> {
    Json(user.is_some())
}

async fn get_user(
    Extension(state): Extension<AxumAppState>,
    user: Option<Extension<AuthUser>>,
) -> Result<Json<UserData>> {
    let user = require_user(user)?;
    let profile = users::get_profile(user.user_id, &state.deps).await?;
    Ok(Json(profile))
}

async fn update_user(
    Extension(state): Extension<AxumAppState>,
    user: Option<Extension<AuthUser>>,
    multipart: Multipart,
) -> Result<Json<UserData>> {
    let user = require_user(user)?;
    let form = collect_multipart(multipart).await?;

    let date_of_birth = match form.text("date_of_birth") {
        Some(raw) if !raw.trim().is_empty() => Some(
            NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .map_err(|_| Error::validation("date_of_birth must be YYYY-MM-DD"))?,
        ),
        _ => None,
    };

    let input = UpdateProfileInput {
        title: form.text("title").map(str::to_string),
        semester: form.text("semester").map(str::to_string),
        department: form.text("department").map(str::to_string),
        date_of_birth,
    };

    let profile = users::update_profile(user.user_id, input, form.file, &state.deps).await?;
    Ok(Json(profile))
}

#[derive(Deserialize)]
struct ChangePasswordRequest {
    old_password: String,
    new_password: String,
}

async fn change_password(
    Extension(state): Extension<AxumAppState>,
    user: Option<Extension<AuthUser>>,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>> {
    let user = require_user(user)?;
    auth::change_password(
        user.user_id,
        ChangePasswordInput {
            old_password: body.old_password,
            new_password: body.new_password,
        },
        &state.deps,
    )
    .await?;

    Ok(Json(MessageResponse::new("password changed")))
}

#[derive(Deserialize)]
struct ForgotPasswordRequest {
    email: String,
}

async fn forgot_password(
    Extension(state): Extension<AxumAppState>,
    Json(body): Json<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>> {
    auth::forgot_password(&body.email, &state.deps).await?;
    Ok(Json(MessageResponse::new("reset code sent")))
}

#[derive(Deserialize)]
struct VerifyResetCodeRequest {
    email: String,
    reset_code: String,
}

async fn verify_reset_code(
    Extension(state): Extension<AxumAppState>,
    Json(body): Json<VerifyResetCodeRequest>,
) -> Result<Json<MessageResponse>> {
    auth::verify_reset_code(&body.email, &body.reset_code, &state.deps).await?;
    Ok(Json(MessageResponse::new("reset code verified")))
}

#[derive(Deserialize)]
struct ResetPasswordRequest {
    email: String,
    reset_code: String,
    new_password: String,
}

async fn reset_password(
    Extension(state): Extension<AxumAppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>> {
    auth::reset_password(
        ResetPasswordInput {
            email: body.email,
            code: body.reset_code,
            new_password: body.new_password,
        },
        &state.deps,
    )
    .await?;

    Ok(Json(MessageResponse::new("password reset")))
}
