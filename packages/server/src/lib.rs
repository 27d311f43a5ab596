// Lectern - API Core
//
// Backend API for the course and posting platform: accounts, posts,
// courses, and the social interactions on top of them.
//
// Architecture follows domain-driven design; handlers stay thin and call
// into domains/*/actions.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
