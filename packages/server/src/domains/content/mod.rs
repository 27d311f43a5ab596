//! Posts and courses behind one aggregate.
//!
//! Both kinds share the same storage row, the same transition functions, and
//! the same HTTP surface; a [`models::ContentKind`] discriminator keeps them
//! apart where it matters (course rosters, separate listings).

pub mod actions;
pub mod engine;
pub mod models;
