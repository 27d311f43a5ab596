//! Users domain actions.

mod profile;

pub use profile::{get_profile, update_profile, UpdateProfileInput};
