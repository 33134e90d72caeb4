//! Book and author inventory kept in a SQLite file and driven from a text
//! menu.
//!
//! The store in [`db`] runs single statements, [`integrity`] keeps every
//! book pointing at an existing author, and [`ui`] holds the prompt loops
//! and workflows. `main.rs` only wires them together.
pub mod config;
pub mod db;
pub mod error;
pub mod integrity;
pub mod models;
pub mod ui;

pub use config::{Cli, Config};
pub use db::{close_store, open_store, seed_if_empty};
pub use error::{Entity, ErrorKind, InventoryError};
pub use models::{Author, Book, BookDetail};
pub use ui::{run_menu, Console, Outcome};
