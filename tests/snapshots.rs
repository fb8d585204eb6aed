//! Snapshot tests — rendered listings and the on-disk document, regression detection.

mod common;

use common::TestLibrary;
use insta::{assert_json_snapshot, assert_snapshot};

use bookshelf_mcp::domain::model::field::SearchField;
use bookshelf_mcp::domain::model::library::Library;
use bookshelf_mcp::domain::model::record::BookRecord;
use bookshelf_mcp::domain::repository::LibraryRepository;
use bookshelf_mcp::infra::json_store::JsonLibraryRepository;
use bookshelf_mcp::interface::render::{format_listing, format_stats};

// =============================================================================
// Rendered text
// =============================================================================

#[test]
fn snapshot_listing_full() {
    let library = TestLibrary::standard();
    assert_snapshot!(format_listing(library.list_all()), @r"
1. Dune by Frank Herbert (1965) - SciFi - Read
2. Emma by Jane Austen (1815) - Classic - Unread
3. Dune Messiah by Frank Herbert (1969) - SciFi - Read
4. Persuasion by Jane Austen (1817) - Classic - Read
");
}

#[test]
fn snapshot_listing_search_renumbers() {
    let library = TestLibrary::standard();
    let hits = library.search(SearchField::Author, "austen");
    assert_snapshot!(format_listing(hits), @r"
1. Emma by Jane Austen (1815) - Classic - Unread
2. Persuasion by Jane Austen (1817) - Classic - Read
");
}

#[test]
fn snapshot_stats() {
    let stats = TestLibrary::standard().statistics();
    assert_snapshot!(format_stats(&stats), @r"
Total books: 4
Books read: 3
Percentage read: 75.00%
");
}

// =============================================================================
// Durable representation
// =============================================================================

#[test]
fn snapshot_library_json_value() {
    let library = Library::new()
        .add_record(BookRecord::new("Dune", "Herbert", 1965, "SciFi", true))
        .add_record(BookRecord::new("", "", 0, "", false));
    assert_json_snapshot!(library, @r#"
[
  {
    "Title": "Dune",
    "Author": "Herbert",
    "Year": 1965,
    "Genre": "SciFi",
    "Read": true
  },
  {
    "Title": "",
    "Author": "",
    "Year": 0,
    "Genre": "",
    "Read": false
  }
]
"#);
}

#[test]
fn snapshot_library_file_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.json");
    let library = Library::new().add_record(BookRecord::new("Dune", "Herbert", 1965, "SciFi", true));
    JsonLibraryRepository::new(&path).save(&library).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_snapshot!(content, @r#"
[
    {
        "Title": "Dune",
        "Author": "Herbert",
        "Year": 1965,
        "Genre": "SciFi",
        "Read": true
    }
]
"#);
}
