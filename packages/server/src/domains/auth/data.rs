//! Responses returned by the auth endpoints.

use serde::Serialize;

use crate::domains::users::data::UserData;

/// Profile plus a freshly signed bearer token.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserData,
    pub token: String,
}
