//! One controller per menu action. Every controller takes the store handle
//! and the console explicitly and reports what it did through [`Outcome`];
//! rejections that should unwind to the menu come back as errors.

mod add;
mod delete;
mod report;
mod search;
mod update;

use crate::models::{Author, Book, BookDetail};

pub use add::{add_author, add_book, add_book_or_author};
pub use delete::{delete_author, delete_book, delete_book_or_author};
pub use report::view_all_books;
pub use search::search_books;
pub use update::update_book;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    BookAdded(Book),
    AuthorAdded(Author),
    QuantityUpdated { book_id: i64, qty: i64 },
    TitleUpdated { book_id: i64, title: String },
    AuthorReassigned { book_id: i64, author_id: i64 },
    AuthorDetailsUpdated(Author),
    BookDeleted(Book),
    AuthorDeleted(Author),
    /// The user answered `no` at a delete confirmation.
    DeletionDeclined,
    BookFound(Book),
    BooksFound(Vec<Book>),
    Report(Vec<BookDetail>),
}

/// `book` or `author`, the first question of the add and delete flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Book,
    Author,
}

impl Target {
    fn parse(input: &str) -> Option<Self> {
        match input {
            "book" => Some(Target::Book),
            "author" => Some(Target::Author),
            _ => None,
        }
    }
}
