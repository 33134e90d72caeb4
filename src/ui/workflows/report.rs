use std::io::{BufRead, Write};

use rusqlite::Connection;

use super::Outcome;
use crate::db;
use crate::error::Result;
use crate::ui::console::Console;
use crate::ui::helpers::{detail_block, RULE_WIDTH};

/// Print every book with its author's name and country.
pub fn view_all_books<R: BufRead, W: Write>(
    conn: &Connection,
    console: &mut Console<R, W>,
) -> Result<Outcome> {
    let details = db::fetch_book_details(conn)?;

    console.say("\nDetails")?;
    console.say("-".repeat(RULE_WIDTH))?;
    if details.is_empty() {
        console.say("No books to display.")?;
    }
    for detail in &details {
        console.say(detail_block(detail))?;
    }
    console.say("")?;

    Ok(Outcome::Report(details))
}
