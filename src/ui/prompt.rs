//! Field validation and the re-prompting loops built on top of it.
//!
//! Each field read is a tiny state machine: the console keeps prompting while
//! input is rejected, and stops on either a valid value or the cancellation
//! sentinel. Cancellation surfaces as [`InventoryError::Cancelled`] so `?`
//! carries it out of every nested loop to the menu.

use std::io::{BufRead, Write};

use super::console::Console;
use super::helpers::title_case;
use crate::error::{InventoryError, Result};

/// Typing this (any case) at any prompt abandons the whole workflow.
pub const CANCEL_TOKEN: &str = "x";

pub fn is_cancel(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case(CANCEL_TOKEN)
}

/// Result of feeding one line of input to a field.
#[derive(Debug)]
pub enum FieldState<T> {
    Valid(T),
    Rejected(InventoryError),
    Cancelled,
}

/// A validation rule for one kind of field.
pub trait FieldKind {
    type Value;

    fn parse(&self, raw: &str) -> Result<Self::Value>;
}

/// Exactly four ASCII digits, e.g. `"0420"` parses to 420.
pub struct FourDigitId(pub &'static str);

/// Anything that is not blank once trimmed.
pub struct NonEmptyText(pub &'static str);

/// A whole number, zero or greater.
pub struct NonNegativeInt(pub &'static str);

/// Blank means "keep what is there"; anything else is title-cased.
pub struct KeepOrTitleCase;

impl FieldKind for FourDigitId {
    type Value = i64;

    fn parse(&self, raw: &str) -> Result<i64> {
        parse_four_digit_id(self.0, raw)
    }
}

impl FieldKind for NonEmptyText {
    type Value = String;

    fn parse(&self, raw: &str) -> Result<String> {
        parse_non_empty(self.0, raw)
    }
}

impl FieldKind for NonNegativeInt {
    type Value = i64;

    fn parse(&self, raw: &str) -> Result<i64> {
        parse_non_negative(self.0, raw)
    }
}

impl FieldKind for KeepOrTitleCase {
    type Value = Option<String>;

    fn parse(&self, raw: &str) -> Result<Option<String>> {
        let trimmed = raw.trim();
        Ok((!trimmed.is_empty()).then(|| title_case(trimmed)))
    }
}

pub fn parse_four_digit_id(field: &'static str, raw: &str) -> Result<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(InventoryError::EmptyField { field });
    }
    if raw.len() != 4 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InventoryError::InvalidFormat {
            field,
            expected: "a 4-digit number",
        });
    }
    raw.parse().map_err(|_| InventoryError::InvalidFormat {
        field,
        expected: "a 4-digit number",
    })
}

pub fn parse_non_empty(field: &'static str, raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(InventoryError::EmptyField { field })
    } else {
        Ok(trimmed.to_string())
    }
}

pub fn parse_non_negative(field: &'static str, raw: &str) -> Result<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(InventoryError::EmptyField { field });
    }
    let value: i64 = raw.parse().map_err(|_| InventoryError::InvalidFormat {
        field,
        expected: "a whole number",
    })?;
    if value < 0 {
        return Err(InventoryError::Negative { field });
    }
    Ok(value)
}

/// One step of a field's prompt loop.
pub fn advance<K: FieldKind>(kind: &K, raw: &str) -> FieldState<K::Value> {
    if is_cancel(raw) {
        return FieldState::Cancelled;
    }
    match kind.parse(raw) {
        Ok(value) => FieldState::Valid(value),
        Err(err) => FieldState::Rejected(err),
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Prompt until `kind` accepts the input or the user cancels.
    pub fn read_required_field<K: FieldKind>(
        &mut self,
        prompt: &str,
        kind: &K,
    ) -> Result<K::Value> {
        self.read_field_with(prompt, kind, Ok)
    }

    /// Like [`Console::read_required_field`], then run `check` on the parsed
    /// value. A recoverable error from `check` (duplicate id, unknown author,
    /// missing record) is printed and the prompt repeats; anything else
    /// unwinds.
    pub fn read_field_with<K, T, F>(&mut self, prompt: &str, kind: &K, mut check: F) -> Result<T>
    where
        K: FieldKind,
        F: FnMut(K::Value) -> Result<T>,
    {
        loop {
            let raw = self.read_line(prompt)?;
            let rejection = match advance(kind, &raw) {
                FieldState::Cancelled => return Err(InventoryError::Cancelled),
                FieldState::Rejected(err) => err,
                FieldState::Valid(value) => match check(value) {
                    Ok(accepted) => return Ok(accepted),
                    Err(err) if err.is_recoverable() => err,
                    Err(err) => return Err(err),
                },
            };
            self.error(&rejection)?;
        }
    }

    /// Ask for one of a fixed set of keywords. Input is matched lowercased;
    /// blank input picks `default` when there is one.
    pub fn read_choice<T, F>(
        &mut self,
        prompt: &str,
        default: Option<T>,
        invalid: &str,
        parse: F,
    ) -> Result<T>
    where
        T: Copy,
        F: Fn(&str) -> Option<T>,
    {
        loop {
            let raw = self.read_line(prompt)?.to_lowercase();
            if is_cancel(&raw) {
                return Err(InventoryError::Cancelled);
            }
            if raw.is_empty() {
                match default {
                    Some(choice) => return Ok(choice),
                    None => {
                        self.error("Input cannot be blank.")?;
                        continue;
                    }
                }
            }
            match parse(&raw) {
                Some(choice) => return Ok(choice),
                None => self.error(invalid)?,
            }
        }
    }

    /// `yes` confirms, `no` declines, `x` cancels; anything else asks again
    /// with no retry limit.
    pub fn read_confirmation(&mut self, prompt: &str) -> Result<bool> {
        loop {
            let raw = self.read_line(prompt)?.to_lowercase();
            if is_cancel(&raw) {
                return Err(InventoryError::Cancelled);
            }
            match raw.as_str() {
                "yes" => return Ok(true),
                "no" => return Ok(false),
                _ => self.error("Please type 'yes' or 'no'.")?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use proptest::prelude::*;

    use super::*;
    use crate::error::{Entity, ErrorKind};

    fn console(script: &str) -> Console<Cursor<String>, Vec<u8>> {
        Console::new(Cursor::new(script.to_string()), Vec::new(), false)
    }

    fn printed(console: Console<Cursor<String>, Vec<u8>>) -> String {
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn id_rejects_wrong_shapes() {
        for raw in ["123", "12345", "12a4", "-123", "+123", "１２３４"] {
            let err = parse_four_digit_id("Book ID", raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidFormat, "{raw}");
        }
        assert_eq!(
            parse_four_digit_id("Book ID", "  ").unwrap_err().kind(),
            ErrorKind::EmptyField
        );
        assert_eq!(parse_four_digit_id("Book ID", "0042").unwrap(), 42);
    }

    #[test]
    fn negative_quantity_differs_from_garbage() {
        assert!(matches!(
            parse_non_negative("Quantity", "-5"),
            Err(InventoryError::Negative { .. })
        ));
        assert!(matches!(
            parse_non_negative("Quantity", "five"),
            Err(InventoryError::InvalidFormat { .. })
        ));
        assert_eq!(parse_non_negative("Quantity", "0").unwrap(), 0);
    }

    #[test]
    fn cancel_token_is_case_insensitive() {
        assert!(is_cancel("x"));
        assert!(is_cancel(" X "));
        assert!(!is_cancel("xx"));
        assert!(matches!(
            advance(&NonEmptyText("Book title"), "X"),
            FieldState::Cancelled
        ));
    }

    #[test]
    fn keep_or_title_case_maps_blank_to_none() {
        assert_eq!(KeepOrTitleCase.parse("   ").unwrap(), None);
        assert_eq!(
            KeepOrTitleCase.parse("south africa").unwrap(),
            Some("South Africa".to_string())
        );
    }

    #[test]
    fn required_field_loops_until_valid() {
        let mut c = console("12\nabcd\n\n0420\n");
        let id = c.read_required_field("ID: ", &FourDigitId("Book ID")).unwrap();
        assert_eq!(id, 420);
        let out = printed(c);
        assert_eq!(out.matches("Book ID must be a 4-digit number.").count(), 2);
        assert!(out.contains("Book ID is required."));
    }

    #[test]
    fn required_field_cancels() {
        let mut c = console("abc\nX\n3001\n");
        let err = c
            .read_required_field("ID: ", &FourDigitId("Book ID"))
            .unwrap_err();
        assert!(matches!(err, InventoryError::Cancelled));
    }

    #[test]
    fn check_rejection_reprompts() {
        let mut c = console("9999\n1290\n");
        let id = c
            .read_field_with("Author ID: ", &FourDigitId("Author ID"), |id| {
                if id == 1290 {
                    Ok(id)
                } else {
                    Err(InventoryError::UnknownAuthor { author_id: id })
                }
            })
            .unwrap();
        assert_eq!(id, 1290);
        assert!(printed(c).contains("No author found with ID 9999."));
    }

    #[test]
    fn check_storage_failure_unwinds() {
        let mut c = console("1290\n1290\n");
        let err = c
            .read_field_with("Author ID: ", &FourDigitId("Author ID"), |_| -> Result<i64> {
                Err(InventoryError::Storage(rusqlite::Error::InvalidQuery))
            })
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StorageFailure);
    }

    #[test]
    fn choice_uses_default_on_blank() {
        let mut c = console("\n");
        let picked = c
            .read_choice("Field: ", Some(1), "bad", |s| (s == "two").then_some(2))
            .unwrap();
        assert_eq!(picked, 1);

        let mut c = console("\nthree\nTWO\n");
        let picked = c
            .read_choice("Field: ", None, "bad", |s| (s == "two").then_some(2))
            .unwrap();
        assert_eq!(picked, 2);
        let out = printed(c);
        assert!(out.contains("Input cannot be blank."));
        assert!(out.contains("bad"));
    }

    #[test]
    fn confirmation_never_gives_up() {
        let mut c = console("maybe\ny\nsure\nYES\n");
        assert!(c.read_confirmation("Delete? ").unwrap());
        assert_eq!(printed(c).matches("Please type 'yes' or 'no'.").count(), 3);

        let mut c = console("no\n");
        assert!(!c.read_confirmation("Delete? ").unwrap());

        let mut c = console("x\n");
        assert!(matches!(
            c.read_confirmation("Delete? "),
            Err(InventoryError::Cancelled)
        ));
    }

    #[test]
    fn not_found_is_recoverable() {
        let err = InventoryError::NotFound {
            entity: Entity::Book,
            id: 1,
        };
        assert!(err.is_recoverable());
    }

    proptest! {
        #[test]
        fn any_four_digits_round_trip(n in 0u32..10_000) {
            let raw = format!("{n:04}");
            prop_assert_eq!(parse_four_digit_id("Book ID", &raw).unwrap(), i64::from(n));
        }

        #[test]
        fn wrong_length_digit_strings_rejected(raw in "[0-9]{0,3}|[0-9]{5,8}") {
            prop_assert!(parse_four_digit_id("Book ID", &raw).is_err());
        }

        #[test]
        fn non_digit_strings_rejected(raw in "[0-9]{0,3}[^0-9 \t\r\n\u{b}\u{c}][0-9]{0,3}") {
            prop_assert!(parse_four_digit_id("Book ID", &raw).is_err());
        }

        #[test]
        fn negative_numbers_rejected(n in i64::MIN..0) {
            let rejected = matches!(
                parse_non_negative("Quantity", &n.to_string()),
                Err(InventoryError::Negative { .. })
            );
            prop_assert!(rejected);
        }
    }
}
