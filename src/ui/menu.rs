use std::io::{BufRead, Write};

use rusqlite::Connection;
use tracing::debug;

use super::console::{Console, StatusKind};
use super::workflows;
use crate::error::{InventoryError, Result};

pub const MENU: &str = "Select one of the following options:
1 - add book/author
2 - update book
3 - delete book/author
4 - search books
5 - view details of all books
0 - exit
: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Update,
    Delete,
    Search,
    ViewAll,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Add),
            "2" => Some(MenuChoice::Update),
            "3" => Some(MenuChoice::Delete),
            "4" => Some(MenuChoice::Search),
            "5" => Some(MenuChoice::ViewAll),
            "0" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Show the menu and run the chosen workflow until the user picks `0` or
/// input runs out.
///
/// Cancellations and rejections that end a workflow are printed and the menu
/// comes back. Storage and terminal failures are returned to the caller.
pub fn run_menu<R: BufRead, W: Write>(
    conn: &Connection,
    console: &mut Console<R, W>,
) -> Result<()> {
    loop {
        let input = match console.read_line(MENU) {
            Ok(input) => input,
            Err(InventoryError::InputClosed) => break,
            Err(err) => return Err(err),
        };
        let Some(choice) = MenuChoice::parse(&input) else {
            console.error("Invalid option.")?;
            continue;
        };

        let result = match choice {
            MenuChoice::Exit => break,
            MenuChoice::Add => workflows::add_book_or_author(conn, console),
            MenuChoice::Update => workflows::update_book(conn, console),
            MenuChoice::Delete => workflows::delete_book_or_author(conn, console),
            MenuChoice::Search => workflows::search_books(conn, console),
            MenuChoice::ViewAll => workflows::view_all_books(conn, console),
        };

        match result {
            Ok(outcome) => debug!(?choice, ?outcome, "workflow finished"),
            Err(InventoryError::InputClosed) => break,
            Err(InventoryError::Cancelled) => {
                debug!(?choice, "workflow cancelled");
                console.status(InventoryError::Cancelled, StatusKind::Info)?;
                console.say("")?;
            }
            Err(err) if err.is_recoverable() => console.error(&err)?,
            Err(err) => return Err(err),
        }
    }

    console.say("Goodbye!!!")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_menu_entry() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::Add));
        assert_eq!(MenuChoice::parse(" 5 "), Some(MenuChoice::ViewAll));
        assert_eq!(MenuChoice::parse("0"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("6"), None);
        assert_eq!(MenuChoice::parse("add"), None);
    }
}
