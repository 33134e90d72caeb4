//! Interactive text front-end: line I/O, field validation, one workflow per
//! menu action, and the menu loop that dispatches to them.

mod console;
mod helpers;
mod menu;
mod prompt;
pub mod workflows;

pub use console::{Console, StatusKind};
pub use helpers::title_case;
pub use menu::{run_menu, MenuChoice, MENU};
pub use prompt::{
    advance, is_cancel, parse_four_digit_id, parse_non_empty, parse_non_negative, FieldKind,
    FieldState, FourDigitId, KeepOrTitleCase, NonEmptyText, NonNegativeInt, CANCEL_TOKEN,
};
pub use workflows::Outcome;
