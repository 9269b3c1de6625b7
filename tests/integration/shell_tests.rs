use biblioteca::{cli::ExitReason, models::Book, repository, Catalog};

use super::{run_bytes, run_script};

#[test]
fn test_register_login_lend_save() {
    let dir = tempfile::tempdir().unwrap();
    let data_file = dir.path().join("biblioteca.dat");
    let mut catalog = Catalog::new();

    let (reason, out) = run_script(
        &mut catalog,
        &data_file,
        &[
            "1", "Ana", "a@b.com", "pw", // register
            "2", "a@b.com", "pw", // login
            "3", "Dune", "Frank Herbert", "42", // add book
            "5", "42", // lend
            "8",
        ],
    );

    assert_eq!(reason, ExitReason::Saved);
    assert!(out.contains("User registered successfully!"));
    assert!(out.contains("Welcome, Ana!"));
    assert!(out.contains("Book added successfully!"));
    assert!(out.contains("Book 'Dune' lent to Ana."));
    assert!(out.contains("0 of 1 copies still available."));
    assert!(out.contains("Data saved. Goodbye!"));

    let saved = repository::load(&data_file).unwrap();
    assert_eq!(saved.books().len(), 1);
    assert!(!saved.books()[0].available);
    assert_eq!(saved.users().len(), 1);
    // the shell logs its user out before saving
    assert!(!saved.users()[0].authenticated);
}

#[test]
fn test_lend_without_login_is_refused_before_prompting() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = Catalog::new();
    catalog.add_book(Book::new("Dune", "Frank Herbert", "42"));

    let (_, out) = run_script(&mut catalog, &dir.path().join("b.dat"), &["5", "6", "8"]);

    assert_eq!(out.matches("You need to log in to perform this action.").count(), 2);
    assert!(!out.contains("Enter the book ISBN"));
    assert!(catalog.books()[0].available);
}

#[test]
fn test_registered_but_not_logged_in_cannot_lend() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = Catalog::new();
    catalog.add_book(Book::new("Dune", "Frank Herbert", "42"));

    let (_, out) = run_script(
        &mut catalog,
        &dir.path().join("b.dat"),
        &["1", "Ana", "a@b.com", "pw", "5", "8"],
    );

    assert!(out.contains("You need to log in to perform this action."));
    assert!(catalog.books()[0].available);
}

#[test]
fn test_wrong_password() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = Catalog::new();

    let (_, out) = run_script(
        &mut catalog,
        &dir.path().join("b.dat"),
        &["1", "Ana", "a@b.com", "pw", "2", "a@b.com", "wrong", "2", "ghost@b.com", "pw", "8"],
    );

    assert_eq!(out.matches("Invalid credentials.").count(), 2);
    assert!(!out.contains("Welcome"));
}

#[test]
fn test_lend_and_return_report_outcomes() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = Catalog::new();
    catalog.add_book(Book::new("Dune", "Frank Herbert", "42"));

    let (_, out) = run_script(
        &mut catalog,
        &dir.path().join("b.dat"),
        &[
            "1", "Ana", "a@b.com", "pw",
            "2", "a@b.com", "pw",
            "5", "42",
            "5", "42", // already out
            "5", "404",
            "6", "42",
            "6", "404",
            "8",
        ],
    );

    assert!(out.contains("Book 'Dune' lent to Ana."));
    assert!(out.contains("Book not available."));
    assert_eq!(out.matches("Book not found.").count(), 2);
    assert!(out.contains("Book 'Dune' returned by Ana."));
    assert!(catalog.books()[0].available);
}

#[test]
fn test_search_and_show_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = Catalog::new();

    let (_, out) = run_script(
        &mut catalog,
        &dir.path().join("b.dat"),
        &[
            "7",
            "3", "Dune", "Frank Herbert", "1",
            "3", "Neuromancer", "William Gibson", "2",
            "4", "HERBERT",
            "4", "tolkien",
            "7",
            "8",
        ],
    );

    assert!(out.contains("The catalog is empty."));
    assert!(out.contains("Books found:\nTitle: Dune, Author: Frank Herbert, ISBN: 1, Available: Yes\n"));
    assert!(out.contains("No books found."));
    assert!(out.contains("Book catalog:\nTitle: Dune, Author: Frank Herbert, ISBN: 1, Available: Yes\nTitle: Neuromancer, Author: William Gibson, ISBN: 2, Available: Yes\n"));
}

#[test]
fn test_invalid_input_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = Catalog::new();

    let (reason, out) = run_script(
        &mut catalog,
        &dir.path().join("b.dat"),
        &["9", "hello", "1", "Ana", "", "pw", "3", "", "X", "1", "8"],
    );

    assert_eq!(reason, ExitReason::Saved);
    assert_eq!(out.matches("Invalid option. Try again.").count(), 2);
    assert!(out.contains("E-mail must not be empty"));
    assert!(out.contains("Title must not be empty"));
    assert!(catalog.users().is_empty());
    assert!(catalog.books().is_empty());
}

#[test]
fn test_end_of_input_leaves_without_saving() {
    let dir = tempfile::tempdir().unwrap();
    let data_file = dir.path().join("b.dat");
    let mut catalog = Catalog::new();

    let (reason, _) = run_script(&mut catalog, &data_file, &["3", "Dune", "Frank Herbert", "1"]);

    assert_eq!(reason, ExitReason::EndOfInput);
    assert_eq!(catalog.books().len(), 1);
    assert!(!data_file.exists());
}

#[test]
fn test_saved_catalog_is_loaded_next_session() {
    let dir = tempfile::tempdir().unwrap();
    let data_file = dir.path().join("b.dat");

    let mut first = Catalog::new();
    run_script(
        &mut first,
        &data_file,
        &["1", "Ana", "a@b.com", "pw", "3", "Dune", "Frank Herbert", "1", "8"],
    );

    let mut second = repository::load(&data_file).unwrap();
    assert_eq!(second, first);

    let (_, out) = run_script(&mut second, &data_file, &["2", "a@b.com", "pw", "5", "1", "8"]);
    assert!(out.contains("Welcome, Ana!"));
    assert!(out.contains("Book 'Dune' lent to Ana."));
}

#[test]
fn test_non_utf8_input_is_an_invalid_option() {
    let dir = tempfile::tempdir().unwrap();
    let data_file = dir.path().join("b.dat");
    let mut catalog = Catalog::new();

    // Latin-1 bytes, as typed on a non-UTF-8 terminal
    let mut input = b"3\nLivro\nAutor\n2\n".to_vec();
    input.extend_from_slice(b"\xe3\n8\n");
    let (reason, out) = run_bytes(&mut catalog, &data_file, input);

    assert_eq!(reason, ExitReason::Saved);
    assert!(out.contains("Invalid option. Try again."));
    assert_eq!(repository::load(&data_file).unwrap().books().len(), 1);
}

#[test]
fn test_non_utf8_field_is_kept_lossily() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = Catalog::new();

    let input = b"3\nCora\xe7\xe3o\nAutor\n7\n8\n".to_vec();
    let (_, out) = run_bytes(&mut catalog, &dir.path().join("b.dat"), input);

    assert!(out.contains("Book added successfully!"));
    assert_eq!(catalog.books()[0].title, "Cora\u{FFFD}\u{FFFD}o");
}

#[test]
fn test_failed_login_drops_previous_session() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = Catalog::new();
    catalog.add_book(Book::new("Dune", "Frank Herbert", "1"));

    let (_, out) = run_script(
        &mut catalog,
        &dir.path().join("b.dat"),
        &[
            "1", "Ana", "a@b.com", "pw",
            "1", "Bia", "b@b.com", "pw2",
            "2", "a@b.com", "pw",
            "2", "b@b.com", "wrong",
            "5",
        ],
    );

    assert!(out.contains("Welcome, Ana!"));
    assert!(out.contains("Invalid credentials."));
    assert!(out.contains("You need to log in to perform this action."));
    assert!(!out.contains("Enter the book ISBN"));
    assert!(catalog.books()[0].available);
    assert!(!catalog.users()[0].authenticated);
    assert!(!catalog.users()[1].authenticated);
}

#[test]
fn test_failed_login_with_unknown_email_drops_session() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = Catalog::new();
    catalog.add_book(Book::new("Dune", "Frank Herbert", "1"));

    let (_, out) = run_script(
        &mut catalog,
        &dir.path().join("b.dat"),
        &[
            "1", "Ana", "a@b.com", "pw",
            "2", "a@b.com", "pw",
            "2", "ghost@b.com", "pw",
            "5",
        ],
    );

    assert!(out.contains("You need to log in to perform this action."));
    assert!(catalog.books()[0].available);
    assert!(!catalog.users()[0].authenticated);
}

#[test]
fn test_register_while_logged_in_logs_out_previous_user() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = Catalog::new();
    catalog.add_book(Book::new("Dune", "Frank Herbert", "1"));

    let (reason, out) = run_script(
        &mut catalog,
        &dir.path().join("b.dat"),
        &[
            "1", "Ana", "a@b.com", "pw",
            "2", "a@b.com", "pw",
            "1", "Bia", "b@b.com", "pw2",
            "5",
        ],
    );

    assert_eq!(reason, ExitReason::EndOfInput);
    assert!(out.contains("You need to log in to perform this action."));
    assert!(catalog.books()[0].available);
    assert!(!catalog.users()[0].authenticated);
    assert!(!catalog.users()[1].authenticated);
}

#[test]
fn test_login_as_another_user_switches_session() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = Catalog::new();
    catalog.add_book(Book::new("Dune", "Frank Herbert", "1"));

    let (reason, out) = run_script(
        &mut catalog,
        &dir.path().join("b.dat"),
        &[
            "1", "Ana", "a@b.com", "pw",
            "1", "Bia", "b@b.com", "pw2",
            "2", "a@b.com", "pw",
            "2", "b@b.com", "pw2",
            "5", "1",
        ],
    );

    assert_eq!(reason, ExitReason::EndOfInput);
    assert!(out.contains("Welcome, Bia!"));
    assert!(out.contains("Book 'Dune' lent to Bia."));
    assert!(!catalog.users()[0].authenticated);
    assert!(catalog.users()[1].authenticated);
}
