use shelf_track::db::{count_authors, count_books, delete_book, fetch_author};
use shelf_track::{close_store, open_store, seed_if_empty};

#[test]
fn reopening_a_seeded_store_does_not_reseed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ebookstore.db");

    let conn = open_store(&path).unwrap();
    assert!(seed_if_empty(&conn).unwrap());
    delete_book(&conn, 3005).unwrap();
    close_store(conn).unwrap();

    let conn = open_store(&path).unwrap();
    assert!(!seed_if_empty(&conn).unwrap());
    assert_eq!(count_books(&conn).unwrap(), 4);
    assert_eq!(count_authors(&conn).unwrap(), 5);
    assert_eq!(
        fetch_author(&conn, 6380).unwrap().unwrap().country,
        "South Africa"
    );
    close_store(conn).unwrap();
}
