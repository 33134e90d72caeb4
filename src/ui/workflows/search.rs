use std::io::{BufRead, Write};

use rusqlite::Connection;

use super::Outcome;
use crate::db;
use crate::error::{Entity, InventoryError, Result};
use crate::ui::console::Console;
use crate::ui::helpers::book_card;
use crate::ui::prompt::{FourDigitId, NonEmptyText};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchBy {
    Id,
    Title,
}

impl SearchBy {
    fn parse(input: &str) -> Option<Self> {
        match input {
            "id" => Some(SearchBy::Id),
            "title" => Some(SearchBy::Title),
            _ => None,
        }
    }
}

/// Look a book up by id or by part of its title. A miss is reported and the
/// user is asked how to search again.
pub fn search_books<R: BufRead, W: Write>(
    conn: &Connection,
    console: &mut Console<R, W>,
) -> Result<Outcome> {
    loop {
        let mode = console.read_choice(
            "Search by ID or title? (type 'id' or 'title', or 'x' to cancel): ",
            None,
            "Invalid option. Please type 'id', 'title', or 'x'.",
            SearchBy::parse,
        )?;

        match mode {
            SearchBy::Id => {
                let id = console.read_required_field(
                    "Enter the 4-digit book ID (or 'x' to cancel): ",
                    &FourDigitId("Book ID"),
                )?;
                match db::fetch_book(conn, id)? {
                    Some(book) => {
                        console.say(book_card("Book found:", &book))?;
                        return Ok(Outcome::BookFound(book));
                    }
                    None => console.error(InventoryError::NotFound {
                        entity: Entity::Book,
                        id,
                    })?,
                }
            }
            SearchBy::Title => {
                let fragment = console.read_required_field(
                    "Enter the book title (or part of it, or 'x' to cancel): ",
                    &NonEmptyText("Book title"),
                )?;
                let books = db::find_books_by_title(conn, &fragment)?;
                if books.is_empty() {
                    console.error("No books found matching that title.")?;
                    continue;
                }

                console.say("\nBooks found:")?;
                for book in &books {
                    console.say(book)?;
                }
                console.say("")?;
                return Ok(Outcome::BooksFound(books));
            }
        }
    }
}
