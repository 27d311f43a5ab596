//! Users domain - profiles and account data.

pub mod actions;
pub mod data;
pub mod models;
