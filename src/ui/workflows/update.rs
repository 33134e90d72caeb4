use std::io::{BufRead, Write};

use rusqlite::Connection;

use super::Outcome;
use crate::db;
use crate::error::{Entity, InventoryError, Result};
use crate::integrity;
use crate::models::Author;
use crate::ui::console::Console;
use crate::ui::helpers::book_card;
use crate::ui::prompt::{FourDigitId, KeepOrTitleCase, NonEmptyText, NonNegativeInt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Qty,
    Title,
    AuthorId,
    Author,
}

impl Field {
    fn parse(input: &str) -> Option<Self> {
        match input {
            "qty" => Some(Field::Qty),
            "title" => Some(Field::Title),
            "authorid" => Some(Field::AuthorId),
            "author" => Some(Field::Author),
            _ => None,
        }
    }
}

/// Pick a book, show it, then change exactly one thing about it.
pub fn update_book<R: BufRead, W: Write>(
    conn: &Connection,
    console: &mut Console<R, W>,
) -> Result<Outcome> {
    let book = console.read_field_with(
        "Enter the ID of the book to update (or 'x' to cancel): ",
        &FourDigitId("Book ID"),
        |id| db::require_book(conn, id),
    )?;
    console.say(book_card("Current book details:", &book))?;

    loop {
        let field = console.read_choice(
            "What would you like to update? (qty/title/authorID/author) [default is qty, 'x' to cancel]: ",
            Some(Field::Qty),
            "Invalid field. Please choose from: qty, title, authorID, or author.",
            Field::parse,
        )?;

        match field {
            Field::Qty => {
                let qty = console.read_required_field(
                    "Enter new quantity (or 'x' to cancel): ",
                    &NonNegativeInt("Quantity"),
                )?;
                db::update_book_qty(conn, book.id, qty)?;
                console.success("Quantity updated successfully.")?;
                return Ok(Outcome::QuantityUpdated {
                    book_id: book.id,
                    qty,
                });
            }
            Field::Title => {
                let title = console.read_required_field(
                    "Enter new title (or 'x' to cancel): ",
                    &NonEmptyText("Title"),
                )?;
                db::update_book_title(conn, book.id, &title)?;
                console.success("Title updated successfully.")?;
                return Ok(Outcome::TitleUpdated {
                    book_id: book.id,
                    title,
                });
            }
            Field::AuthorId => {
                let author_id = console.read_field_with(
                    "Enter new author ID (must already exist, or 'x' to cancel): ",
                    &FourDigitId("Author ID"),
                    |author_id| {
                        integrity::ensure_author_exists(conn, author_id).map(|()| author_id)
                    },
                )?;
                integrity::reassign_book_author(conn, book.id, author_id)?;
                console.success("Book's author ID updated successfully.")?;
                return Ok(Outcome::AuthorReassigned {
                    book_id: book.id,
                    author_id,
                });
            }
            Field::Author => match db::fetch_author(conn, book.author_id)? {
                Some(author) => return update_author_details(conn, console, author),
                None => console.error(InventoryError::NotFound {
                    entity: Entity::Author,
                    id: book.author_id,
                })?,
            },
        }
    }
}

/// Blank answers keep the current name or country.
fn update_author_details<R: BufRead, W: Write>(
    conn: &Connection,
    console: &mut Console<R, W>,
    current: Author,
) -> Result<Outcome> {
    console.say(format!(
        "\nCurrent Author Name: {}\nCurrent Author Country: {}\n",
        current.name, current.country
    ))?;

    let name = console.read_required_field(
        "Enter new author name (or press Enter to keep current, or 'x' to cancel): ",
        &KeepOrTitleCase,
    )?;
    let country = console.read_required_field(
        "Enter new author country (or press Enter to keep current, or 'x' to cancel): ",
        &KeepOrTitleCase,
    )?;

    let updated = Author {
        name: name.unwrap_or(current.name),
        country: country.unwrap_or(current.country),
        ..current
    };
    db::update_author_details(conn, updated.id, &updated.name, &updated.country)?;
    console.success("Author information updated successfully.")?;
    Ok(Outcome::AuthorDetailsUpdated(updated))
}
