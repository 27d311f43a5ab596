use axum::{middleware::Next, response::Response, Extension};
use std::sync::Arc;
use tracing::debug;

use crate::common::{Error, Result, UserId};
use crate::domains::auth::JwtService;

/// Authenticated user information from JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: UserId,
    pub email: String,
    pub is_admin: bool,
}

/// JWT authentication middleware
///
/// Extracts JWT token from Authorization header, verifies it, and adds
/// AuthUser to request extensions. If no token or invalid token, the request
/// continues without AuthUser; handlers that need a user call
/// [`require_user`].
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let auth_user = extract_auth_user(&request, &jwt_service);

    if let Some(user) = auth_user {
        debug!(
            "Authenticated user: {} (admin: {})",
            user.user_id, user.is_admin
        );
        request.extensions_mut().insert(user);
    } else {
        debug!("No valid authentication token");
    }

    next.run(request).await
}

/// Turn the optional extension a handler receives into a hard requirement.
pub fn require_user(user: Option<Extension<AuthUser>>) -> Result<AuthUser> {
    match user {
        Some(Extension(user)) => Ok(user),
        None => Err(Error::unauthorized("authentication required")),
    }
}

/// Extract and verify JWT token from request
fn extract_auth_user(
    request: &axum::http::Request<axum::body::Body>,
    jwt_service: &JwtService,
) -> Option<AuthUser> {
    // Get Authorization header
    let auth_header = request.headers().get("authorization")?;
    let auth_str = auth_header.to_str().ok()?;

    // Extract token (handle both "Bearer <token>" and raw token)
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str);

    // Verify token
    let claims = jwt_service.verify_token(token).ok()?;

    Some(AuthUser {
        user_id: UserId::from_uuid(claims.user_id),
        email: claims.email,
        is_admin: claims.is_admin,
    })
}
