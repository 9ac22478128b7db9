pub mod config;
pub mod jwt;
pub mod permissions;

pub use config::AuthConfig;
pub use jwt::{Claims, JwtService};
pub use permissions::{Authenticated, RequireRole};

use infra::models::UserRow;

/// The user resolved from a request's credential, if any.
#[derive(Debug, Clone)]
pub struct Subject(pub UserRow);
