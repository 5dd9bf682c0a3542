//! Folium Library Lending Server
//!
//! A Rust REST API server for a small lending library: an ISBN-driven
//! catalog fed by external metadata providers, customer accounts, and a
//! full loan lifecycle with reading-list bookkeeping.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod isbn;
pub mod metadata;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
