use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::info;

use super::map_unique_constraint;
use crate::error::{Entity, InventoryError, Result};
use crate::models::{Book, BookDetail};

fn book_from_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        author_id: row.get(2)?,
        qty: row.get(3)?,
    })
}

/// Insert a new book row. A primary-key collision comes back as
/// [`InventoryError::DuplicateId`].
///
/// This does not look at `author_id`; callers go through
/// [`crate::integrity::add_book`] to keep the reference valid.
pub fn insert_book(conn: &Connection, book: &Book) -> Result<()> {
    conn.execute(
        "INSERT INTO book (id, title, authorID, qty) VALUES (?1, ?2, ?3, ?4)",
        params![book.id, book.title, book.author_id, book.qty],
    )
    .map_err(|err| map_unique_constraint(err, Entity::Book, book.id))?;

    info!(book_id = book.id, author_id = book.author_id, "book inserted");
    Ok(())
}

/// Look a book up by id. Ids are primary keys, so this yields at most one
/// row.
pub fn fetch_book(conn: &Connection, id: i64) -> Result<Option<Book>> {
    let book = conn
        .query_row(
            "SELECT id, title, authorID, qty FROM book WHERE id = ?1",
            params![id],
            book_from_row,
        )
        .optional()?;
    Ok(book)
}

/// Like [`fetch_book`] but a missing row is an error.
pub fn require_book(conn: &Connection, id: i64) -> Result<Book> {
    fetch_book(conn, id)?.ok_or(InventoryError::NotFound {
        entity: Entity::Book,
        id,
    })
}

/// Substring match on the title. `LIKE` is case-insensitive for ASCII in
/// SQLite; wildcard characters in `fragment` are matched literally. Rows come
/// back in table order.
pub fn find_books_by_title(conn: &Connection, fragment: &str) -> Result<Vec<Book>> {
    let pattern = format!("%{}%", escape_like(fragment));
    let mut stmt = conn.prepare(
        "SELECT id, title, authorID, qty FROM book WHERE title LIKE ?1 ESCAPE '\\'",
    )?;

    let books = stmt
        .query_map(params![pattern], book_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(books)
}

/// Every book whose `authorID` equals `author_id`.
pub fn fetch_books_by_author(conn: &Connection, author_id: i64) -> Result<Vec<Book>> {
    let mut stmt =
        conn.prepare("SELECT id, title, authorID, qty FROM book WHERE authorID = ?1")?;

    let books = stmt
        .query_map(params![author_id], book_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(books)
}

/// Books pointing at an author id with no matching row. Only reachable when
/// the file was edited outside this program.
pub fn fetch_orphaned_books(conn: &Connection) -> Result<Vec<Book>> {
    let mut stmt = conn.prepare(
        "SELECT b.id, b.title, b.authorID, b.qty
         FROM book b
         WHERE NOT EXISTS (SELECT 1 FROM author a WHERE a.id = b.authorID)",
    )?;

    let books = stmt
        .query_map([], book_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(books)
}

/// Report rows for "view details of all books". The inner join drops books
/// with no matching author.
pub fn fetch_book_details(conn: &Connection) -> Result<Vec<BookDetail>> {
    let mut stmt = conn.prepare(
        "SELECT book.id, book.title, author.name, author.country
         FROM book
         INNER JOIN author ON book.authorID = author.id",
    )?;

    let details = stmt
        .query_map([], |row| {
            Ok(BookDetail {
                book_id: row.get(0)?,
                title: row.get(1)?,
                author_name: row.get(2)?,
                author_country: row.get(3)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(details)
}

/// Number of book rows, used to decide whether the store needs seeding.
pub fn count_books(conn: &Connection) -> Result<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM book", [], |row| row.get(0))?;
    Ok(count)
}

/// Set the copies on hand. The prompt layer has already refused negative
/// values.
pub fn update_book_qty(conn: &Connection, id: i64, qty: i64) -> Result<()> {
    let updated = conn.execute("UPDATE book SET qty = ?1 WHERE id = ?2", params![qty, id])?;
    ensure_touched(updated, id)?;
    info!(book_id = id, qty, "book quantity updated");
    Ok(())
}

/// Replace the title, stored exactly as typed.
pub fn update_book_title(conn: &Connection, id: i64, title: &str) -> Result<()> {
    let updated = conn.execute("UPDATE book SET title = ?1 WHERE id = ?2", params![title, id])?;
    ensure_touched(updated, id)?;
    info!(book_id = id, "book title updated");
    Ok(())
}

/// Point a book at another author. Unchecked; see
/// [`crate::integrity::reassign_book_author`].
pub fn update_book_author(conn: &Connection, id: i64, author_id: i64) -> Result<()> {
    let updated = conn.execute(
        "UPDATE book SET authorID = ?1 WHERE id = ?2",
        params![author_id, id],
    )?;
    ensure_touched(updated, id)?;
    info!(book_id = id, author_id, "book author reassigned");
    Ok(())
}

/// Books have no dependents, so deletion is unconditional.
pub fn delete_book(conn: &Connection, id: i64) -> Result<()> {
    let deleted = conn.execute("DELETE FROM book WHERE id = ?1", params![id])?;
    ensure_touched(deleted, id)?;
    info!(book_id = id, "book deleted");
    Ok(())
}

fn ensure_touched(rows: usize, id: i64) -> Result<()> {
    if rows == 0 {
        Err(InventoryError::NotFound {
            entity: Entity::Book,
            id,
        })
    } else {
        Ok(())
    }
}

fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for ch in fragment.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_tables, insert_author};
    use crate::error::ErrorKind;
    use crate::models::Author;

    fn store() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        conn
    }

    fn book(id: i64, title: &str, author_id: i64) -> Book {
        Book {
            id,
            title: title.to_string(),
            author_id,
            qty: 5,
        }
    }

    #[test]
    fn fetch_is_stable_without_writes() {
        let conn = store();
        insert_book(&conn, &book(3001, "A Tale of Two Cities", 1290)).unwrap();

        let first = fetch_book(&conn, 3001).unwrap();
        let second = fetch_book(&conn, 3001).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.unwrap().title, "A Tale of Two Cities");
    }

    #[test]
    fn duplicate_insert_maps_to_duplicate_id() {
        let conn = store();
        insert_book(&conn, &book(3001, "One", 1290)).unwrap();
        let err = insert_book(&conn, &book(3001, "Two", 1290)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateId);
    }

    #[test]
    fn title_search_is_substring_and_case_insensitive() {
        let conn = store();
        insert_book(&conn, &book(3001, "The Lord of the Rings", 6380)).unwrap();
        insert_book(&conn, &book(3002, "The Lion, the Witch and the Wardrobe", 2356)).unwrap();
        insert_book(&conn, &book(3003, "Alice's Adventures", 5620)).unwrap();

        let mut ids: Vec<i64> = find_books_by_title(&conn, "the")
            .unwrap()
            .into_iter()
            .map(|b| b.id)
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![3001, 3002]);
        assert_eq!(find_books_by_title(&conn, "RINGS").unwrap().len(), 1);
    }

    #[test]
    fn title_search_treats_wildcards_literally() {
        let conn = store();
        insert_book(&conn, &book(3001, "100% Pure", 1290)).unwrap();
        insert_book(&conn, &book(3002, "1000 Pure", 1290)).unwrap();

        let hits = find_books_by_title(&conn, "0%").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 3001);
        assert!(find_books_by_title(&conn, "_").unwrap().is_empty());
    }

    #[test]
    fn updates_on_missing_rows_report_not_found() {
        let conn = store();
        let err = update_book_qty(&conn, 4040, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(delete_book(&conn, 4040).unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn details_skip_books_without_author() {
        let conn = store();
        insert_author(
            &conn,
            &Author {
                id: 1290,
                name: "Charles Dickens".into(),
                country: "England".into(),
            },
        )
        .unwrap();
        insert_book(&conn, &book(3001, "A Tale of Two Cities", 1290)).unwrap();
        insert_book(&conn, &book(3002, "Orphan", 7777)).unwrap();

        let details = fetch_book_details(&conn).unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].author_name, "Charles Dickens");

        let orphans = fetch_orphaned_books(&conn).unwrap();
        assert_eq!(orphans.len(), 1);
        assert_eq!(orphans[0].id, 3002);
    }
}
