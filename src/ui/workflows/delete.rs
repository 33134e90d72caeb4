use std::io::{BufRead, Write};

use rusqlite::Connection;

use super::{Outcome, Target};
use crate::db;
use crate::error::Result;
use crate::integrity;
use crate::ui::console::Console;
use crate::ui::helpers::{author_card, book_card};
use crate::ui::prompt::FourDigitId;

pub fn delete_book_or_author<R: BufRead, W: Write>(
    conn: &Connection,
    console: &mut Console<R, W>,
) -> Result<Outcome> {
    let target = console.read_choice(
        "What would you like to delete? ('Book' or 'Author' or 'x' to cancel): ",
        None,
        "Invalid option. Choose 'Book' or 'Author'.",
        Target::parse,
    )?;

    match target {
        Target::Book => delete_book(conn, console),
        Target::Author => delete_author(conn, console),
    }
}

pub fn delete_book<R: BufRead, W: Write>(
    conn: &Connection,
    console: &mut Console<R, W>,
) -> Result<Outcome> {
    let book = console.read_field_with(
        "Enter the 4-digit ID of the book to delete (or 'x' to cancel): ",
        &FourDigitId("Book ID"),
        |id| db::require_book(conn, id),
    )?;
    console.say(book_card("Book selected:", &book))?;

    if !console.read_confirmation("Delete this book? (yes/no): ")? {
        console.say("Deletion cancelled.\n")?;
        return Ok(Outcome::DeletionDeclined);
    }

    db::delete_book(conn, book.id)?;
    console.success("Book deleted successfully.")?;
    Ok(Outcome::BookDeleted(book))
}

/// An author that still has books is refused before the confirmation step,
/// and the refusal ends the workflow.
pub fn delete_author<R: BufRead, W: Write>(
    conn: &Connection,
    console: &mut Console<R, W>,
) -> Result<Outcome> {
    let author = console.read_field_with(
        "Enter the 4-digit ID of the author to delete (or 'x' to cancel): ",
        &FourDigitId("Author ID"),
        |id| db::require_author(conn, id),
    )?;
    integrity::ensure_no_dependents(conn, author.id)?;
    console.say(author_card("Author selected:", &author))?;

    if !console.read_confirmation("Delete this author? (yes/no): ")? {
        console.say("Deletion cancelled.\n")?;
        return Ok(Outcome::DeletionDeclined);
    }

    integrity::remove_author(conn, author.id)?;
    console.success("Author deleted successfully.")?;
    Ok(Outcome::AuthorDeleted(author))
}
