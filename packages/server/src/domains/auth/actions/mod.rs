//! Auth domain actions - business logic functions
//!
//! Actions are async functions called directly from the HTTP route handlers.

mod credentials;
mod login;
mod register;

pub use credentials::{
    change_password, forgot_password, reset_password, verify_reset_code, ChangePasswordInput,
    ResetPasswordInput,
};
pub use login::{login_user, LoginInput};
pub use register::{register_user, RegisterInput};
