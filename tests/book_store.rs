use std::fs;
use std::path::{Path, PathBuf};

use book_catalog::store::load_books;
use book_catalog::{Book, BookStore, BookUpdate, EmptyReason, Listing, SearchField};
use tempfile::{tempdir, TempDir};

fn catalog_path(dir: &TempDir) -> PathBuf {
    dir.path().join("books_data.json")
}

fn seeded(path: &Path, titles: &[&str]) -> BookStore {
    let mut store = BookStore::open(path).unwrap();
    for title in titles {
        store.add(Book::new(*title, "", "", "", false)).unwrap();
    }
    store
}

fn assert_disk_matches(store: &BookStore) {
    let disk = load_books(store.path()).unwrap().into_books();
    assert_eq!(disk, store.books());
}

#[test]
fn add_to_empty_store_lists_exactly_that_book() {
    let dir = tempdir().unwrap();
    let mut store = BookStore::open(catalog_path(&dir)).unwrap();
    let book = Book::new("A", "B", "2000", "G", false);

    store.add(book.clone()).unwrap();

    match store.list_all() {
        Listing::Books(books) => assert_eq!(books, [book]),
        Listing::Empty => panic!("expected one book"),
    }
    assert_disk_matches(&store);
}

#[test]
fn removing_unknown_title_changes_nothing() {
    let dir = tempdir().unwrap();
    let mut store = seeded(&catalog_path(&dir), &["A", "B"]);
    let before = fs::read_to_string(store.path()).unwrap();

    assert!(store.remove_by_title("C").unwrap().is_none());

    assert_eq!(store.len(), 2);
    assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
}

#[test]
fn marking_read_completes_progress() {
    let dir = tempdir().unwrap();
    let mut store = seeded(&catalog_path(&dir), &["A"]);

    store
        .update_by_title("A", BookUpdate::default().read(true))
        .unwrap()
        .unwrap();

    let progress = store.compute_progress();
    assert_eq!(progress.total, 1);
    assert_eq!(progress.completed, 1);
    assert_eq!(progress.percent_label(), "100.00%");
    assert_disk_matches(&store);
}

#[test]
fn malformed_file_loads_as_empty() {
    let dir = tempdir().unwrap();
    let path = catalog_path(&dir);
    fs::write(&path, "[{\"title\": ").unwrap();

    let store = BookStore::open(&path).unwrap();

    assert_eq!(store.len(), 0);
    assert!(matches!(
        store.empty_reason(),
        Some(EmptyReason::Malformed(_))
    ));
}

#[test]
fn substring_search_hits_author() {
    let dir = tempdir().unwrap();
    let mut store = BookStore::open(catalog_path(&dir)).unwrap();
    store
        .add(Book::new("First", "Jane Doe", "", "", false))
        .unwrap();
    store
        .add(Book::new("Second", "John Smith", "", "", false))
        .unwrap();

    let hits: Vec<&Book> = store.find_by_substring("oe", SearchField::Author).collect();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].author, "Jane Doe");
}

#[test]
fn remove_ignores_case() {
    let dir = tempdir().unwrap();
    let mut store = seeded(&catalog_path(&dir), &["Chemistry Basics"]);

    let removed = store.remove_by_title("chemistry basics").unwrap();

    assert_eq!(removed.map(|b| b.title), Some("Chemistry Basics".to_string()));
    assert!(store.is_empty());
    assert_disk_matches(&store);
}

#[test]
fn reopening_restores_saved_collection() {
    let dir = tempdir().unwrap();
    let path = catalog_path(&dir);
    let mut store = BookStore::open(&path).unwrap();
    let books = vec![
        Book::new("Dune", "Frank Herbert", "1965", "Sci-Fi", true),
        Book::new("", "", "", "", false),
        Book::new("Dune", "Someone Else", "n.d.", "", false),
    ];
    for book in &books {
        store.add(book.clone()).unwrap();
    }

    let reopened = BookStore::open(&path).unwrap();
    assert_eq!(reopened.books(), books.as_slice());

    let mut emptied = reopened;
    while emptied.remove_by_title("dune").unwrap().is_some() {}
    emptied.remove_by_title("").unwrap();
    let reopened = BookStore::open(&path).unwrap();
    assert_eq!(reopened.list_all(), Listing::Empty);
    assert!(reopened.empty_reason().is_none());
}

#[test]
fn queries_do_not_touch_disk_or_memory() {
    let dir = tempdir().unwrap();
    let store = seeded(&catalog_path(&dir), &["A", "B"]);
    let before = fs::read_to_string(store.path()).unwrap();
    let snapshot = store.books().to_vec();

    for _ in 0..3 {
        let _ = store.list_all();
        let _ = store.find_by_substring("a", SearchField::Title).count();
        let _ = store.compute_progress();
    }

    assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
    assert_eq!(store.books(), snapshot.as_slice());
}

#[test]
fn empty_collection_has_zero_progress() {
    let dir = tempdir().unwrap();
    let store = BookStore::open(catalog_path(&dir)).unwrap();
    let progress = store.compute_progress();
    assert_eq!((progress.total, progress.completed), (0, 0));
    assert_eq!(progress.percent, 0.0);
}

#[test]
fn file_uses_documented_layout() {
    let dir = tempdir().unwrap();
    let mut store = BookStore::open(catalog_path(&dir)).unwrap();
    store
        .add(Book::new("Chemistry Basics", "Jane Doe", "2020", "Science", true))
        .unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
    let entry = &value.as_array().unwrap()[0];
    let keys: Vec<&str> = entry
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();

    assert_eq!(keys.len(), 5);
    assert_eq!(entry["title"], "Chemistry Basics");
    assert_eq!(entry["year"], "2020");
    assert_eq!(entry["read"], true);
}
