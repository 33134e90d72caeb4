//! Record store over the embedded SQLite file. Each function wraps one
//! statement; rusqlite runs in autocommit mode so every mutation is durable
//! as soon as it returns.

mod authors;
mod books;
mod connection;
mod seed;

use rusqlite::{Error as SqlError, ErrorCode};

use crate::error::{Entity, InventoryError};

pub use authors::{
    count_authors, delete_author, fetch_author, insert_author, require_author,
    update_author_details,
};
pub use books::{
    count_books, delete_book, fetch_book, fetch_book_details, fetch_books_by_author,
    fetch_orphaned_books, find_books_by_title, insert_book, require_book, update_book_author,
    update_book_qty, update_book_title,
};
pub use connection::{close_store, create_tables, open_store};
pub use seed::seed_if_empty;

/// Coerce SQLite constraint errors into a duplicate-id rejection. The only
/// constraint either table carries is its primary key.
fn map_unique_constraint(err: SqlError, entity: Entity, id: i64) -> InventoryError {
    if matches!(
        err.sqlite_error_code(),
        Some(ErrorCode::ConstraintViolation)
    ) {
        InventoryError::DuplicateId { entity, id }
    } else {
        err.into()
    }
}
