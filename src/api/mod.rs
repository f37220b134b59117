//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`auth`] - signup, login and session info
//! - [`business`] - business profile and logo
//! - [`products`] - product catalog
//! - [`customers`] - customer book and search
//! - [`bills`] - bill CRUD, line calculation and print view
//! - [`expenses`] - expense tracking and stats

pub mod auth;
pub mod bills;
pub mod business;
pub mod customers;
pub mod expenses;
pub mod health;
pub mod products;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
