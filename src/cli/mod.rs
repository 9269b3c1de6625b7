//! Interactive menu shell

mod handlers;
pub mod session;

use std::io::{BufRead, Write};

use crate::{error::AppResult, repository::Repository, services::Catalog};

pub use session::Session;

/// Menu entries, numbered as displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Register,
    Login,
    AddBook,
    Search,
    Lend,
    Return,
    ShowCatalog,
    SaveAndExit,
}

impl std::str::FromStr for MenuChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuChoice::Register),
            "2" => Ok(MenuChoice::Login),
            "3" => Ok(MenuChoice::AddBook),
            "4" => Ok(MenuChoice::Search),
            "5" => Ok(MenuChoice::Lend),
            "6" => Ok(MenuChoice::Return),
            "7" => Ok(MenuChoice::ShowCatalog),
            "8" => Ok(MenuChoice::SaveAndExit),
            other => Err(format!("Invalid menu option: {}", other)),
        }
    }
}

/// How the shell loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// Option 8: the catalog was written out
    Saved,
    /// Input closed; nothing was saved
    EndOfInput,
}

/// What a menu action asks the loop to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
    EndOfInput,
}

const MENU: &str = "\n--- Library System ---
1. Register User
2. Login
3. Add Book
4. Search Book
5. Lend Book
6. Return Book
7. Show Catalog
8. Save and Exit
----------------------";

/// Menu loop over any line-based input and text output
pub struct Shell<R, W> {
    input: R,
    output: W,
    repository: Repository,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W, repository: Repository) -> Self {
        Self {
            input,
            output,
            repository,
        }
    }

    /// Run until the user saves and exits or input runs out.
    ///
    /// Domain failures are printed and the loop goes on; filesystem and
    /// snapshot failures are returned.
    pub fn run(&mut self, catalog: &mut Catalog) -> AppResult<ExitReason> {
        let mut session = Session::default();

        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(line) = self.ask("Choose an option: ")? else {
                tracing::warn!("Input closed, leaving without saving");
                return Ok(ExitReason::EndOfInput);
            };

            let flow = match line.parse::<MenuChoice>() {
                Ok(MenuChoice::Register) => self.register(catalog, &mut session)?,
                Ok(MenuChoice::Login) => self.login(catalog, &mut session)?,
                Ok(MenuChoice::AddBook) => self.add_book(catalog)?,
                Ok(MenuChoice::Search) => self.search(catalog)?,
                Ok(MenuChoice::Lend) => self.lend(catalog, &session)?,
                Ok(MenuChoice::Return) => self.return_book(catalog, &session)?,
                Ok(MenuChoice::ShowCatalog) => self.show_catalog(catalog)?,
                Ok(MenuChoice::SaveAndExit) => self.save_and_exit(catalog, &mut session)?,
                Err(e) => {
                    tracing::debug!("{}", e);
                    writeln!(self.output, "Invalid option. Try again.")?;
                    Flow::Continue
                }
            };

            match flow {
                Flow::Continue => {}
                Flow::Exit => return Ok(ExitReason::Saved),
                Flow::EndOfInput => {
                    tracing::warn!("Input closed mid-action, leaving without saving");
                    return Ok(ExitReason::EndOfInput);
                }
            }
        }
    }

    /// Print a prompt and read one line without its line ending. `None` on end of input.
    fn ask(&mut self, prompt: &str) -> AppResult<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        // Raw bytes so a stray non-UTF-8 byte becomes U+FFFD instead of an I/O error
        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&raw);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
