//! Business logic services

pub mod auth;
pub mod catalog;

pub use catalog::{Catalog, CopyCount};
