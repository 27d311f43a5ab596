//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod mailer;
pub mod test_dependencies;
pub mod traits;

pub use deps::{CloudinaryAdapter, ServerDeps};
pub use mailer::{LogMailer, ResendMailer};
pub use test_dependencies::{test_deps, test_deps_with, MockMailer, MockUploader, TestDeps};
pub use traits::*;
