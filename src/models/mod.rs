//! Data models for Biblioteca

pub mod book;
pub mod user;

// Re-export commonly used types
pub use book::{Book, CreateBook};
pub use user::{CreateUser, User, UserId};
