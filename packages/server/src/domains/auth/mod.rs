//! Auth domain - accounts, credentials and tokens
//!
//! Responsibilities:
//! - Registration and login with email + password
//! - JWT creation and verification
//! - Password policy, hashing, and the emailed reset-code flow

pub mod actions;
pub mod data;
pub mod emails;
pub mod jwt;
pub mod password;
pub mod reset;

pub use jwt::{Claims, JwtService};
