//! Book (catalog entry) model and related types

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppResult;

/// A catalog entry. Several books may share an ISBN; each one is a physical copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub isbn: String,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl Book {
    pub fn new(title: impl Into<String>, author: impl Into<String>, isbn: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
            available: true,
        }
    }

    /// Build a book from validated input
    pub fn create(input: CreateBook) -> AppResult<Self> {
        input.validate()?;
        Ok(Self::new(input.title, input.author, input.isbn))
    }

    /// Mark the book as lent. Returns false if it was already out.
    pub fn lend(&mut self) -> bool {
        if self.available {
            self.available = false;
            true
        } else {
            false
        }
    }

    /// Mark the book as back on the shelf. Idempotent.
    pub fn return_book(&mut self) {
        self.available = true;
    }

    pub fn describe(&self) -> String {
        format!(
            "Title: {}, Author: {}, ISBN: {}, Available: {}",
            self.title,
            self.author,
            self.isbn,
            if self.available { "Yes" } else { "No" }
        )
    }

    /// Case-insensitive substring match on title or author.
    /// `needle` must already be lowercased.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.author.to_lowercase().contains(needle)
    }
}

impl std::fmt::Display for Book {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Create book request
#[derive(Debug, Clone, Validate)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: String,
    #[validate(length(min = 1, message = "ISBN must not be empty"))]
    pub isbn: String,
}
