use std::sync::{Mutex, MutexGuard};

use tracing::info;

use crate::domain::model::library::Library;
use crate::domain::model::record::BookRecord;
use crate::domain::model::stats::LibraryStats;
use crate::domain::repository::{LibraryRepository, StoreError};

use super::error::AppError;

/// 蔵書に対するユースケース。
/// load → mutate → save のパターンで操作する。呼び出し間で蔵書をキャッシュしない。
/// 変更系の操作は `write_lock` を保持したまま load から save までを行う。
pub struct LibraryService<R: LibraryRepository> {
    repo: R,
    write_lock: Mutex<()>,
}

impl<R: LibraryRepository> LibraryService<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            write_lock: Mutex::new(()),
        }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// 本を末尾に追加して永続化する。追加後の蔵書を返す。
    pub fn add_book(&self, record: BookRecord) -> Result<Library, AppError> {
        let _guard = self.lock_writes();
        let title = record.title.clone();
        let library = self.load_library()?.add_record(record);
        self.persist(&library)?;
        info!(title = %title, total = library.len(), "book added");
        Ok(library)
    }

    /// タイトルが一致する本を全て削除する。削除件数を返す（0件も成功）。
    pub fn remove_book(&self, title: &str) -> Result<usize, AppError> {
        let _guard = self.lock_writes();
        let library = self.load_library()?;
        let removed = library.count_title(title);
        if removed == 0 {
            return Ok(0);
        }

        let library = library.remove_by_title(title);
        self.persist(&library)?;
        info!(title = %title, removed, "book removed");
        Ok(removed)
    }

    /// title / author で部分一致検索する。
    pub fn search_books(&self, field: &str, query: &str) -> Result<Vec<BookRecord>, AppError> {
        let library = self.load_library()?;
        let hits = library.search_by(field, query)?;
        Ok(hits.into_iter().cloned().collect())
    }

    /// 蔵書全体を格納順で返す。
    pub fn list_books(&self) -> Result<Library, AppError> {
        self.load_library()
    }

    pub fn statistics(&self) -> Result<LibraryStats, AppError> {
        Ok(self.load_library()?.statistics())
    }

    // --- private ---

    // ロックが守るデータは無いので poison は無視してよい
    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn load_library(&self) -> Result<Library, AppError> {
        self.repo.load().map_err(storage_error)
    }

    fn persist(&self, library: &Library) -> Result<(), AppError> {
        self.repo.save(library).map_err(storage_error)
    }
}

fn storage_error<E: StoreError>(e: E) -> AppError {
    if e.is_corrupt() {
        AppError::CorruptStore(Box::new(e))
    } else {
        AppError::Storage(Box::new(e))
    }
}
