use crate::models::{Author, Book, BookDetail};

/// Divider printed between rows of the details report.
pub(crate) const RULE_WIDTH: usize = 55;

/// Capitalize the first letter of every word and lowercase the rest. A word
/// starts after any non-alphabetic character, so `"j.k. rowling"` becomes
/// `"J.K. Rowling"`.
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_word = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                result.extend(ch.to_lowercase());
            } else {
                result.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            result.push(ch);
            in_word = false;
        }
    }
    result
}

/// Multi-line record view shown before an update or delete.
pub(crate) fn book_card(heading: &str, book: &Book) -> String {
    format!(
        "\n{heading}\nID: {}\nTitle: {}\nAuthorID: {}\nQuantity: {}\n",
        book.id, book.title, book.author_id, book.qty
    )
}

pub(crate) fn author_card(heading: &str, author: &Author) -> String {
    format!(
        "\n{heading}\nID: {}\nName: {}\nCountry: {}\n",
        author.id, author.name, author.country
    )
}

pub(crate) fn detail_block(detail: &BookDetail) -> String {
    format!(
        "Title: {}\nAuthor's Name: {}\nAuthor's Country: {}\n{}",
        detail.title,
        detail.author_name,
        detail.author_country,
        "-".repeat(RULE_WIDTH)
    )
}
