//! Biblioteca Library Catalog
//!
//! A single-user library catalog: books, registered readers, lending and
//! returns, kept in memory and persisted to a versioned snapshot file.

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use services::Catalog;
