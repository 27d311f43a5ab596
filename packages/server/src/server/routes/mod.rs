// HTTP routes
pub mod content;
pub mod health;
pub mod multipart;
pub mod users;

pub use health::*;

use serde::Serialize;

/// Uniform `{ "message": ... }` body for routes with nothing else to say.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
