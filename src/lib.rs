//! Cashmemo Server - multi-tenant billing backend
//!
//! # Architecture overview
//!
//! A single-binary REST service for a small trading/retail business:
//!
//! - **Billing engine** (`billing`): pure per-item and bill-level total
//!   calculation plus the amount-in-words renderer
//! - **Database** (`db`): embedded SurrealDB storage, one repository per table
//! - **Auth** (`auth`): JWT + Argon2, every record owned by exactly one user
//! - **HTTP API** (`api`): RESTful routes per resource
//!
//! # Module structure
//!
//! ```text
//! src/
//! ├── core/          # config, state, server, error
//! ├── auth/          # JWT service, middleware, ownership checks
//! ├── billing/       # calculation engine (pure, no I/O)
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # models and repositories
//! └── utils/         # error envelope, logger, validation
//! ```

pub mod api;
pub mod auth;
pub mod billing;
pub mod core;
pub mod db;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - structured auth/ownership events
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
   ______           __
  / ____/___ ______/ /_  ____ ___  ___  ____ ___  ____
 / /   / __ `/ ___/ __ \/ __ `__ \/ _ \/ __ `__ \/ __ \
/ /___/ /_/ (__  ) / / / / / / / /  __/ / / / / / /_/ /
\____/\__,_/____/_/ /_/_/ /_/ /_/\___/_/ /_/ /_/\____/
    "#
    );
}
