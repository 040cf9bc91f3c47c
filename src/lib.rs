//! LibraryFMD school library server
//!
//! REST JSON API for a school library: students, classes, books, copies,
//! librarians and loans, plus a bulk import of students from the
//! spreadsheet exported by the school secretariat.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod spreadsheet;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
