use std::io::{BufRead, Write};

use rusqlite::Connection;

use super::{Outcome, Target};
use crate::error::Result;
use crate::integrity;
use crate::models::{Author, Book};
use crate::ui::console::Console;
use crate::ui::helpers::title_case;
use crate::ui::prompt::{FourDigitId, NonEmptyText, NonNegativeInt};

pub fn add_book_or_author<R: BufRead, W: Write>(
    conn: &Connection,
    console: &mut Console<R, W>,
) -> Result<Outcome> {
    let target = console.read_choice(
        "What would you like to add? ('Book' or 'Author', or 'x' to cancel): ",
        None,
        "Invalid input. Please type 'book', 'author', or 'x' to cancel.",
        Target::parse,
    )?;

    match target {
        Target::Book => add_book(conn, console),
        Target::Author => add_author(conn, console),
    }
}

/// Collect id, title, author id and quantity, then insert. The author must
/// already exist; there is no way to create a book that points nowhere.
pub fn add_book<R: BufRead, W: Write>(
    conn: &Connection,
    console: &mut Console<R, W>,
) -> Result<Outcome> {
    let id = console.read_field_with(
        "Enter 4-digit book ID or 'x' to cancel: ",
        &FourDigitId("Book ID"),
        |id| integrity::ensure_book_id_free(conn, id).map(|()| id),
    )?;
    let title = console.read_required_field(
        "Enter book title or 'x' to cancel: ",
        &NonEmptyText("Book title"),
    )?;
    let author_id = console.read_field_with(
        "Enter 4-digit author ID or 'x' to cancel: ",
        &FourDigitId("Author ID"),
        |author_id| integrity::ensure_author_exists(conn, author_id).map(|()| author_id),
    )?;
    let qty = console.read_required_field(
        "Enter quantity or 'x' to cancel: ",
        &NonNegativeInt("Quantity"),
    )?;

    let book = Book {
        id,
        title,
        author_id,
        qty,
    };
    integrity::add_book(conn, &book)?;
    console.success("Book added successfully.")?;
    Ok(Outcome::BookAdded(book))
}

/// Name and country are title-cased before they are stored.
pub fn add_author<R: BufRead, W: Write>(
    conn: &Connection,
    console: &mut Console<R, W>,
) -> Result<Outcome> {
    let id = console.read_field_with(
        "Enter new 4-digit author ID or 'x' to cancel: ",
        &FourDigitId("Author ID"),
        |id| integrity::ensure_author_id_free(conn, id).map(|()| id),
    )?;
    let name = console.read_required_field(
        "Enter author name or 'x' to cancel: ",
        &NonEmptyText("Author name"),
    )?;
    let country = console.read_required_field(
        "Enter author's country or 'x' to cancel: ",
        &NonEmptyText("Author country"),
    )?;

    let author = Author {
        id,
        name: title_case(&name),
        country: title_case(&country),
    };
    integrity::add_author(conn, &author)?;
    console.success("Author added successfully.")?;
    Ok(Outcome::AuthorAdded(author))
}
