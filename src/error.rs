//! Typed failures shared by the store, the integrity guard, and the prompt
//! workflows. The display strings double as the user-facing messages printed
//! before a re-prompt, so they are phrased as full sentences.

use std::fmt;

use thiserror::Error;

/// Which of the two tables a message refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Book,
    Author,
}

impl Entity {
    /// Indefinite article for the start of a sentence.
    pub fn article(&self) -> &'static str {
        match self {
            Entity::Book => "A",
            Entity::Author => "An",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Book => write!(f, "book"),
            Entity::Author => write!(f, "author"),
        }
    }
}

/// Coarse classification of [`InventoryError`], handy for assertions and for
/// deciding how the menu reacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidFormat,
    EmptyField,
    DuplicateId,
    NotFound,
    ReferentialViolation,
    Cancelled,
    StorageFailure,
    /// Reading the prompt input or writing to the terminal failed.
    TerminalFailure,
}

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("{field} must be {expected}.")]
    InvalidFormat {
        field: &'static str,
        expected: &'static str,
    },

    #[error("{field} cannot be negative.")]
    Negative { field: &'static str },

    #[error("{field} is required.")]
    EmptyField { field: &'static str },

    #[error(
        "{} {entity} with ID {id} already exists. Please enter a different ID.",
        .entity.article()
    )]
    DuplicateId { entity: Entity, id: i64 },

    #[error("No {entity} found with ID {id}.")]
    NotFound { entity: Entity, id: i64 },

    #[error("No author found with ID {author_id}. Please enter an existing author ID.")]
    UnknownAuthor { author_id: i64 },

    #[error(
        "Author {author_id} has {count} book(s) associated with them. Please delete those books first."
    )]
    AuthorHasBooks { author_id: i64, count: usize },

    #[error("Input must be valid UTF-8 text.")]
    NotText,

    #[error("Operation cancelled.")]
    Cancelled,

    #[error("input stream closed")]
    InputClosed,

    #[error("storage failure: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl InventoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            InventoryError::InvalidFormat { .. }
            | InventoryError::Negative { .. }
            | InventoryError::NotText => ErrorKind::InvalidFormat,
            InventoryError::EmptyField { .. } => ErrorKind::EmptyField,
            InventoryError::DuplicateId { .. } => ErrorKind::DuplicateId,
            InventoryError::NotFound { .. } => ErrorKind::NotFound,
            InventoryError::UnknownAuthor { .. } | InventoryError::AuthorHasBooks { .. } => {
                ErrorKind::ReferentialViolation
            }
            InventoryError::Cancelled | InventoryError::InputClosed => ErrorKind::Cancelled,
            InventoryError::Storage(_) => ErrorKind::StorageFailure,
            InventoryError::Io(_) => ErrorKind::TerminalFailure,
        }
    }

    /// Rejections the user can fix by typing something else. Everything else
    /// unwinds the current workflow.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self.kind(),
            ErrorKind::Cancelled | ErrorKind::StorageFailure | ErrorKind::TerminalFailure
        )
    }
}

pub type Result<T> = std::result::Result<T, InventoryError>;
