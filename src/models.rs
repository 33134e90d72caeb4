//! Row types mirroring the `book` and `author` tables. They stay plain data
//! holders so the store, the integrity guard and the workflows can pass them
//! around freely.

use std::fmt;

/// A stocked title. `author_id` must always point at an existing [`Author`];
/// the integrity guard is the only thing enforcing that, the schema does not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    /// Four-digit primary key.
    pub id: i64,
    pub title: String,
    /// Stored in the `authorID` column.
    pub author_id: i64,
    /// Copies on hand, never negative.
    pub qty: i64,
}

impl fmt::Display for Book {
    /// Single-line summary used by title search listings.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {} | Title: {} | AuthorID: {} | Quantity: {}",
            self.id, self.title, self.author_id, self.qty
        )
    }
}

/// A writer that books point at. Name and country are stored title-cased,
/// and the row can only be deleted once no book references it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    /// Four-digit primary key, immutable once created.
    pub id: i64,
    pub name: String,
    pub country: String,
}

/// One row of the "view details of all books" report: a book joined with its
/// author. Books without an author row never appear here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDetail {
    pub book_id: i64,
    pub title: String,
    pub author_name: String,
    pub author_country: String,
}
