//! GearGuard maintenance management server
//!
//! REST JSON API for equipment maintenance: requests move through a fixed
//! lifecycle, technicians are assigned by managers, and every stage or
//! assignment change is kept in an audit trail. Access is gated by role.

use std::sync::Arc;

use sqlx::{Pool, Postgres};

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod policy;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub pool: Pool<Postgres>,
    pub services: Arc<services::Services>,
}
