//! Shared test harness for integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use bookshelf_mcp::application::service::LibraryService;
use bookshelf_mcp::domain::model::library::Library;
use bookshelf_mcp::domain::model::record::BookRecord;
use bookshelf_mcp::domain::repository::{LibraryRepository, StoreError};

// =============================================================================
// InMemoryRepo — テスト用リポジトリ
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum InMemoryError {
    #[error("in-memory store is corrupt")]
    Corrupt,
    #[error("in-memory store is read-only")]
    ReadOnly,
}

impl StoreError for InMemoryError {
    fn is_corrupt(&self) -> bool {
        matches!(self, InMemoryError::Corrupt)
    }
}

/// ファイルI/O不要のインメモリリポジトリ。JSON文字列で保持する。
pub struct InMemoryRepo {
    document: RefCell<Option<String>>,
    read_only: Cell<bool>,
    saves: Cell<usize>,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self {
            document: RefCell::new(None),
            read_only: Cell::new(false),
            saves: Cell::new(0),
        }
    }

    /// 生のドキュメントを直接置く（破損データの再現用）。
    pub fn with_document(doc: &str) -> Self {
        let repo = Self::new();
        *repo.document.borrow_mut() = Some(doc.to_string());
        repo
    }

    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl LibraryRepository for InMemoryRepo {
    type Error = InMemoryError;

    fn load(&self) -> Result<Library, Self::Error> {
        match self.document.borrow().as_deref() {
            Some(json) => serde_json::from_str(json).map_err(|_| InMemoryError::Corrupt),
            None => Ok(Library::new()),
        }
    }

    fn save(&self, library: &Library) -> Result<(), Self::Error> {
        if self.read_only.get() {
            return Err(InMemoryError::ReadOnly);
        }
        let json = serde_json::to_string(library).unwrap();
        *self.document.borrow_mut() = Some(json);
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

// =============================================================================
// TestLibrary — テスト用蔵書
// =============================================================================

pub struct TestLibrary;

impl TestLibrary {
    /// 標準的なテスト用蔵書（4冊中3冊既読）:
    /// ```text
    /// 1. Dune by Frank Herbert (1965) - SciFi - Read
    /// 2. Emma by Jane Austen (1815) - Classic - Unread
    /// 3. Dune Messiah by Frank Herbert (1969) - SciFi - Read
    /// 4. Persuasion by Jane Austen (1817) - Classic - Read
    /// ```
    pub fn standard() -> Library {
        Library::new()
            .add_record(BookRecord::new("Dune", "Frank Herbert", 1965, "SciFi", true))
            .add_record(BookRecord::new("Emma", "Jane Austen", 1815, "Classic", false))
            .add_record(BookRecord::new(
                "Dune Messiah",
                "Frank Herbert",
                1969,
                "SciFi",
                true,
            ))
            .add_record(BookRecord::new(
                "Persuasion",
                "Jane Austen",
                1817,
                "Classic",
                true,
            ))
    }

    /// InMemoryRepoに蔵書を保存してLibraryServiceを返す。
    pub fn service_with(library: &Library) -> LibraryService<InMemoryRepo> {
        let repo = InMemoryRepo::new();
        repo.save(library).unwrap();
        LibraryService::new(repo)
    }
}

// =============================================================================
// Assertion helpers
// =============================================================================

/// 結果がErrで、メッセージに指定文字列を含むことをassert。
pub fn assert_error_contains<T: std::fmt::Debug>(
    result: Result<T, impl std::fmt::Display>,
    expected: &str,
) {
    match result {
        Err(e) => {
            let msg = e.to_string();
            assert!(
                msg.contains(expected),
                "Expected error containing '{expected}', got: '{msg}'"
            );
        }
        Ok(v) => panic!("Expected error containing '{expected}', got Ok({v:?})"),
    }
}
