use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::info;

use super::{count_authors, count_books, insert_author, insert_book};
use crate::models::{Author, Book};

const SAMPLE_AUTHORS: [(i64, &str, &str); 5] = [
    (1290, "Charles Dickens", "England"),
    (8937, "J.K. Rowling", "England"),
    (2356, "C.S. Lewis", "Ireland"),
    (6380, "J.R.R. Tolkien", "South Africa"),
    (5620, "Lewis Carroll", "England"),
];

const SAMPLE_BOOKS: [(i64, &str, i64, i64); 5] = [
    (3001, "A Tale of Two Cities", 1290, 30),
    (3002, "Harry Potter and the Philosopher's Stone", 8937, 40),
    (3003, "The Lion, the Witch and the Wardrobe", 2356, 25),
    (3004, "The Lord of the Rings", 6380, 37),
    (3005, "Alice's Adventures in Wonderland", 5620, 12),
];

/// Load the sample catalogue when both tables are empty. A store that already
/// holds any row is left alone, so restarting never collides on primary keys.
///
/// Returns whether anything was inserted.
pub fn seed_if_empty(conn: &Connection) -> Result<bool> {
    let existing = count_books(conn)? + count_authors(conn)?;
    if existing > 0 {
        info!(rows = existing, "store already populated, skipping sample data");
        return Ok(false);
    }

    let tx = conn
        .unchecked_transaction()
        .context("failed to begin seed transaction")?;

    // Authors first so every sample book has its reference in place.
    for (id, name, country) in SAMPLE_AUTHORS {
        insert_author(
            &tx,
            &Author {
                id,
                name: name.to_string(),
                country: country.to_string(),
            },
        )
        .with_context(|| format!("failed to seed author {id}"))?;
    }

    for (id, title, author_id, qty) in SAMPLE_BOOKS {
        insert_book(
            &tx,
            &Book {
                id,
                title: title.to_string(),
                author_id,
                qty,
            },
        )
        .with_context(|| format!("failed to seed book {id}"))?;
    }

    tx.commit().context("failed to commit sample data")?;
    info!(
        authors = SAMPLE_AUTHORS.len(),
        books = SAMPLE_BOOKS.len(),
        "sample data seeded"
    );
    Ok(true)
}
