//! Authentication and authorization
//!
//! JWT token service, auth middleware and request extractors.

pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_auth, require_ownership};
