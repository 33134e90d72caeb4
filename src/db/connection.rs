use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::info;

/// Open (creating if needed) the database file and make sure both tables
/// exist. The returned connection is the process-wide store handle.
///
/// No foreign key is declared between `book.authorID` and `author.id`; the
/// integrity guard owns that invariant.
pub fn open_store(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)
        .with_context(|| format!("failed to open SQLite database {}", path.display()))?;
    create_tables(&conn)?;
    info!(path = %path.display(), "store opened");
    Ok(conn)
}

/// Create the `book` and `author` tables when they are missing.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS book (
            id INTEGER PRIMARY KEY,
            title TEXT,
            authorID INTEGER,
            qty INTEGER
        )",
        [],
    )
    .context("failed to create book table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS author (
            id INTEGER PRIMARY KEY,
            name TEXT,
            country TEXT
        )",
        [],
    )
    .context("failed to create author table")?;

    Ok(())
}

/// Release the handle, surfacing any error SQLite reports while finalizing.
pub fn close_store(conn: Connection) -> Result<()> {
    conn.close()
        .map_err(|(_, err)| err)
        .context("failed to close SQLite database")?;
    info!("store closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_store_creates_file_and_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ebookstore.db");
        let conn = open_store(&path).unwrap();

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('book', 'author')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 2);
        close_store(conn).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn create_tables_is_repeatable() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        create_tables(&conn).unwrap();
    }
}
