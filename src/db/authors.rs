use rusqlite::{params, Connection, OptionalExtension};
use tracing::info;

use super::map_unique_constraint;
use crate::error::{Entity, InventoryError, Result};
use crate::models::Author;

/// Insert a new author row. A primary-key collision comes back as
/// [`InventoryError::DuplicateId`] so the prompt can ask for another id.
pub fn insert_author(conn: &Connection, author: &Author) -> Result<()> {
    conn.execute(
        "INSERT INTO author (id, name, country) VALUES (?1, ?2, ?3)",
        params![author.id, author.name, author.country],
    )
    .map_err(|err| map_unique_constraint(err, Entity::Author, author.id))?;

    info!(author_id = author.id, "author inserted");
    Ok(())
}

/// Look an author up by id. `None` when no row has that id.
pub fn fetch_author(conn: &Connection, id: i64) -> Result<Option<Author>> {
    let author = conn
        .query_row(
            "SELECT id, name, country FROM author WHERE id = ?1",
            params![id],
            |row| {
                Ok(Author {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    country: row.get(2)?,
                })
            },
        )
        .optional()?;
    Ok(author)
}

/// Like [`fetch_author`] but a missing row is
/// [`InventoryError::NotFound`], which lookup prompts treat as a re-prompt.
pub fn require_author(conn: &Connection, id: i64) -> Result<Author> {
    fetch_author(conn, id)?.ok_or(InventoryError::NotFound {
        entity: Entity::Author,
        id,
    })
}

/// Number of author rows, used to decide whether the store needs seeding.
pub fn count_authors(conn: &Connection) -> Result<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM author", [], |row| row.get(0))?;
    Ok(count)
}

/// Rewrite name and country together; the id never changes.
pub fn update_author_details(conn: &Connection, id: i64, name: &str, country: &str) -> Result<()> {
    let updated = conn.execute(
        "UPDATE author SET name = ?1, country = ?2 WHERE id = ?3",
        params![name, country, id],
    )?;

    if updated == 0 {
        return Err(InventoryError::NotFound {
            entity: Entity::Author,
            id,
        });
    }
    info!(author_id = id, "author details updated");
    Ok(())
}

/// Remove the row. Unchecked; [`crate::integrity::remove_author`] refuses
/// while books still reference the author.
pub fn delete_author(conn: &Connection, id: i64) -> Result<()> {
    let deleted = conn.execute("DELETE FROM author WHERE id = ?1", params![id])?;

    if deleted == 0 {
        return Err(InventoryError::NotFound {
            entity: Entity::Author,
            id,
        });
    }
    info!(author_id = id, "author deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_tables;
    use crate::error::ErrorKind;

    fn store() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        conn
    }

    fn dickens() -> Author {
        Author {
            id: 1290,
            name: "Charles Dickens".into(),
            country: "England".into(),
        }
    }

    #[test]
    fn insert_then_fetch() {
        let conn = store();
        insert_author(&conn, &dickens()).unwrap();
        assert_eq!(fetch_author(&conn, 1290).unwrap(), Some(dickens()));
        assert_eq!(fetch_author(&conn, 1291).unwrap(), None);
    }

    #[test]
    fn details_update_keeps_id() {
        let conn = store();
        insert_author(&conn, &dickens()).unwrap();
        update_author_details(&conn, 1290, "Charles John Huffam Dickens", "England").unwrap();

        let author = require_author(&conn, 1290).unwrap();
        assert_eq!(author.id, 1290);
        assert_eq!(author.name, "Charles John Huffam Dickens");
    }

    #[test]
    fn missing_author_reports_not_found() {
        let conn = store();
        assert_eq!(require_author(&conn, 1290).unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(delete_author(&conn, 1290).unwrap_err().kind(), ErrorKind::NotFound);
    }
}
