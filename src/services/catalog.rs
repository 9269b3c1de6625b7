//! Catalog management: books, registered users, lending and returns

use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::{Book, User, UserId},
    services::auth::require_authenticated,
};

/// Number of copies held for one ISBN
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CopyCount {
    pub total: usize,
    pub available: usize,
}

/// In-memory library: owns every book and every user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    books: Vec<Book>,
    #[serde(default)]
    users: Vec<User>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty() && self.users.is_empty()
    }

    /// Add a book. Duplicate ISBNs are accepted as extra copies.
    pub fn add_book(&mut self, book: Book) {
        tracing::info!("Catalog: added book isbn={} title={:?}", book.isbn, book.title);
        self.books.push(book);
    }

    /// Remove every book with the given ISBN and return how many were removed
    pub fn remove_book(&mut self, isbn: &str) -> usize {
        let before = self.books.len();
        self.books.retain(|b| b.isbn != isbn);
        let removed = before - self.books.len();
        tracing::info!("Catalog: removed {} book(s) with isbn={}", removed, isbn);
        removed
    }

    /// Case-insensitive substring search over title and author, in catalog order
    pub fn search(&self, query: &str) -> Vec<&Book> {
        let needle = query.to_lowercase();
        let found: Vec<&Book> = self.books.iter().filter(|b| b.matches(&needle)).collect();
        tracing::debug!("Catalog search {:?}: {} result(s)", query, found.len());
        found
    }

    pub fn copies(&self, isbn: &str) -> CopyCount {
        self.books
            .iter()
            .filter(|b| b.isbn == isbn)
            .fold(CopyCount::default(), |mut count, b| {
                count.total += 1;
                if b.available {
                    count.available += 1;
                }
                count
            })
    }

    /// Register a user. Emails are not checked for uniqueness; lookups use the first match.
    pub fn register_user(&mut self, user: User) -> UserId {
        tracing::info!("Catalog: registered user {}", user.email);
        self.users.push(user);
        self.users.len() - 1
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.get(id)
    }

    pub fn user_mut(&mut self, id: UserId) -> Option<&mut User> {
        self.users.get_mut(id)
    }

    /// First user registered with this email
    pub fn find_user(&self, email: &str) -> Option<(UserId, &User)> {
        self.users.iter().enumerate().find(|(_, u)| u.email == email)
    }

    /// Look a user up by email and check the password
    pub fn login(&mut self, email: &str, password: &str) -> AppResult<UserId> {
        let id = self.find_user(email).map(|(id, _)| id);
        let Some(id) = id else {
            tracing::warn!("Login failed: unknown email {}", email);
            return Err(AppError::Authentication("Invalid credentials".to_string()));
        };

        let user = &mut self.users[id];
        if user.authenticate(password)? {
            tracing::info!("User {} logged in", email);
            Ok(id)
        } else {
            tracing::warn!("Login failed: wrong password for {}", email);
            Err(AppError::Authentication("Invalid credentials".to_string()))
        }
    }

    /// Lend the first available copy with this ISBN to an authenticated user
    pub fn lend_book(&mut self, isbn: &str, user: &User) -> AppResult<&Book> {
        require_authenticated(user, "borrow a book")?;

        let mut any_copy = false;
        for book in self.books.iter_mut().filter(|b| b.isbn == isbn) {
            any_copy = true;
            if book.lend() {
                tracing::info!("Book {:?} (isbn={}) lent to {}", book.title, isbn, user.email);
                return Ok(&*book);
            }
        }

        if any_copy {
            Err(AppError::Unavailable(format!("No copy of ISBN {} is available", isbn)))
        } else {
            Err(AppError::NotFound(format!("Book with ISBN {} not found", isbn)))
        }
    }

    /// Return the first copy with this ISBN, whatever its current state
    pub fn return_book(&mut self, isbn: &str, user: &User) -> AppResult<&Book> {
        require_authenticated(user, "return a book")?;

        let book = self
            .books
            .iter_mut()
            .find(|b| b.isbn == isbn)
            .ok_or_else(|| AppError::NotFound(format!("Book with ISBN {} not found", isbn)))?;
        book.return_book();
        tracing::info!("Book {:?} (isbn={}) returned by {}", book.title, isbn, user.email);
        Ok(&*book)
    }
}
