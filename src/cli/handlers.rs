//! One handler per menu entry

use std::io::{BufRead, Write};

use super::{Flow, Session, Shell};
use crate::{
    error::{AppError, AppResult},
    models::{Book, CreateBook, CreateUser, User},
    services::Catalog,
};

const LOGIN_REQUIRED: &str = "You need to log in to perform this action.";

/// Read a field or bail out of the handler on end of input
macro_rules! ask_or_eof {
    ($shell:expr, $prompt:expr) => {
        match $shell.ask($prompt)? {
            Some(value) => value,
            None => return Ok(Flow::EndOfInput),
        }
    };
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub(super) fn register(&mut self, catalog: &mut Catalog, session: &mut Session) -> AppResult<Flow> {
        let name = ask_or_eof!(self, "Name: ");
        let email = ask_or_eof!(self, "E-mail: ");
        let password = ask_or_eof!(self, "Password: ");

        match User::register(CreateUser { name, email, password }) {
            Ok(user) => {
                let id = catalog.register_user(user);
                session.switch_to(id, catalog);
                writeln!(self.output, "User registered successfully!")?;
            }
            Err(e) => self.report(e)?,
        }
        Ok(Flow::Continue)
    }

    pub(super) fn login(&mut self, catalog: &mut Catalog, session: &mut Session) -> AppResult<Flow> {
        let email = ask_or_eof!(self, "E-mail: ");
        let password = ask_or_eof!(self, "Password: ");

        match catalog.login(&email, &password) {
            Ok(id) => {
                session.switch_to(id, catalog);
                let name = catalog.user(id).map(|u| u.name.as_str()).unwrap_or_default();
                writeln!(self.output, "Welcome, {}!", name)?;
            }
            Err(AppError::Authentication(_)) => {
                // The attempted account takes over the session unauthenticated; unknown emails clear it
                match catalog.find_user(&email).map(|(id, _)| id) {
                    Some(id) => session.switch_to(id, catalog),
                    None => session.end(catalog),
                }
                writeln!(self.output, "Invalid credentials.")?;
            }
            Err(e) => self.report(e)?,
        }
        Ok(Flow::Continue)
    }

    pub(super) fn add_book(&mut self, catalog: &mut Catalog) -> AppResult<Flow> {
        let title = ask_or_eof!(self, "Book title: ");
        let author = ask_or_eof!(self, "Book author: ");
        let isbn = ask_or_eof!(self, "ISBN: ");

        match Book::create(CreateBook { title, author, isbn }) {
            Ok(book) => {
                catalog.add_book(book);
                writeln!(self.output, "Book added successfully!")?;
            }
            Err(e) => self.report(e)?,
        }
        Ok(Flow::Continue)
    }

    pub(super) fn search(&mut self, catalog: &Catalog) -> AppResult<Flow> {
        let query = ask_or_eof!(self, "Enter title or author: ");

        let books = catalog.search(&query);
        if books.is_empty() {
            writeln!(self.output, "No books found.")?;
        } else {
            writeln!(self.output, "\nBooks found:")?;
            for book in books {
                writeln!(self.output, "{}", book)?;
            }
        }
        Ok(Flow::Continue)
    }

    pub(super) fn lend(&mut self, catalog: &mut Catalog, session: &Session) -> AppResult<Flow> {
        let Some(user) = session.authenticated_user(catalog).cloned() else {
            writeln!(self.output, "{}", LOGIN_REQUIRED)?;
            return Ok(Flow::Continue);
        };
        let isbn = ask_or_eof!(self, "Enter the book ISBN: ");

        match catalog.lend_book(&isbn, &user) {
            Ok(book) => {
                let title = book.title.clone();
                let copies = catalog.copies(&isbn);
                writeln!(self.output, "Book '{}' lent to {}.", title, user.name)?;
                writeln!(
                    self.output,
                    "{} of {} copies still available.",
                    copies.available, copies.total
                )?;
            }
            Err(e) => self.report(e)?,
        }
        Ok(Flow::Continue)
    }

    pub(super) fn return_book(&mut self, catalog: &mut Catalog, session: &Session) -> AppResult<Flow> {
        let Some(user) = session.authenticated_user(catalog).cloned() else {
            writeln!(self.output, "{}", LOGIN_REQUIRED)?;
            return Ok(Flow::Continue);
        };
        let isbn = ask_or_eof!(self, "Enter the book ISBN: ");

        match catalog.return_book(&isbn, &user) {
            Ok(book) => writeln!(self.output, "Book '{}' returned by {}.", book.title, user.name)?,
            Err(e) => self.report(e)?,
        }
        Ok(Flow::Continue)
    }

    pub(super) fn show_catalog(&mut self, catalog: &Catalog) -> AppResult<Flow> {
        if catalog.books().is_empty() {
            writeln!(self.output, "The catalog is empty.")?;
            return Ok(Flow::Continue);
        }
        writeln!(self.output, "\nBook catalog:")?;
        for book in catalog.books() {
            writeln!(self.output, "{}", book)?;
        }
        Ok(Flow::Continue)
    }

    pub(super) fn save_and_exit(&mut self, catalog: &mut Catalog, session: &mut Session) -> AppResult<Flow> {
        session.end(catalog);
        self.repository.save(catalog)?;
        writeln!(self.output, "Data saved. Goodbye!")?;
        Ok(Flow::Exit)
    }

    /// Print a domain failure and carry on; anything fatal is handed back
    fn report(&mut self, err: AppError) -> AppResult<()> {
        if err.is_fatal() {
            return Err(err);
        }
        tracing::debug!(code = (err.code() as u32), "{}", err);
        let message = match &err {
            AppError::NotFound(_) => "Book not found.".to_string(),
            AppError::Unavailable(_) => "Book not available.".to_string(),
            AppError::Unauthorized(_) => LOGIN_REQUIRED.to_string(),
            other => other.to_string(),
        };
        writeln!(self.output, "{}", message)?;
        Ok(())
    }
}
