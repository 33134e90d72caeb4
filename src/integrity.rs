//! Referential checks between books and authors.
//!
//! The schema declares no foreign key, so every write that touches
//! `book.authorID`, and every author deletion, has to pass through here. The
//! `ensure_*` checks are also called from inside prompt loops to reject bad
//! input early; the guarded writes repeat them right before the statement.

use rusqlite::Connection;
use tracing::{debug, warn};

use crate::db;
use crate::error::{Entity, InventoryError, Result};
use crate::models::{Author, Book};

/// Whether an author row with this id is present.
pub fn author_exists(conn: &Connection, id: i64) -> Result<bool> {
    Ok(db::fetch_author(conn, id)?.is_some())
}

/// Every book whose `authorID` is `author_id`, in table order. Empty means
/// the author can be deleted.
pub fn books_referencing(conn: &Connection, author_id: i64) -> Result<Vec<Book>> {
    db::fetch_books_by_author(conn, author_id)
}

/// Refuse a book write that would point at a missing author with
/// [`InventoryError::UnknownAuthor`].
pub fn ensure_author_exists(conn: &Connection, author_id: i64) -> Result<()> {
    if author_exists(conn, author_id)? {
        Ok(())
    } else {
        debug!(author_id, "rejected reference to unknown author");
        Err(InventoryError::UnknownAuthor { author_id })
    }
}

/// Refuse an author deletion while books still reference it, reporting how
/// many do.
pub fn ensure_no_dependents(conn: &Connection, author_id: i64) -> Result<()> {
    let dependents = books_referencing(conn, author_id)?;
    if dependents.is_empty() {
        Ok(())
    } else {
        debug!(author_id, count = dependents.len(), "author still has books");
        Err(InventoryError::AuthorHasBooks {
            author_id,
            count: dependents.len(),
        })
    }
}

/// Reject a new book id that is already taken, before the insert is tried.
pub fn ensure_book_id_free(conn: &Connection, id: i64) -> Result<()> {
    if db::fetch_book(conn, id)?.is_some() {
        Err(InventoryError::DuplicateId {
            entity: Entity::Book,
            id,
        })
    } else {
        Ok(())
    }
}

/// Reject a new author id that is already taken, before the insert is tried.
pub fn ensure_author_id_free(conn: &Connection, id: i64) -> Result<()> {
    if author_exists(conn, id)? {
        Err(InventoryError::DuplicateId {
            entity: Entity::Author,
            id,
        })
    } else {
        Ok(())
    }
}

/// Insert a book only if its id is unused and its author exists.
pub fn add_book(conn: &Connection, book: &Book) -> Result<()> {
    ensure_book_id_free(conn, book.id)?;
    ensure_author_exists(conn, book.author_id)?;
    db::insert_book(conn, book)
}

/// Insert an author only if its id is unused.
pub fn add_author(conn: &Connection, author: &Author) -> Result<()> {
    ensure_author_id_free(conn, author.id)?;
    db::insert_author(conn, author)
}

/// Point a book at another author, which must already exist.
pub fn reassign_book_author(conn: &Connection, book_id: i64, author_id: i64) -> Result<()> {
    ensure_author_exists(conn, author_id)?;
    db::update_book_author(conn, book_id, author_id)
}

/// Delete an author that no book references. Refusal leaves both tables
/// untouched.
pub fn remove_author(conn: &Connection, author_id: i64) -> Result<()> {
    ensure_no_dependents(conn, author_id)?;
    db::delete_author(conn, author_id)
}

/// Log every book whose author row is missing. Returns how many were found.
pub fn audit_references(conn: &Connection) -> Result<usize> {
    let orphans = db::fetch_orphaned_books(conn)?;
    for book in &orphans {
        warn!(
            book_id = book.id,
            author_id = book.author_id,
            "book references a missing author"
        );
    }
    Ok(orphans.len())
}
