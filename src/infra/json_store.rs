use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::domain::model::library::Library;
use crate::domain::repository::{LibraryRepository, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum JsonStoreError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("corrupt library file {path:?}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("JSON error: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StoreError for JsonStoreError {
    fn is_corrupt(&self) -> bool {
        matches!(self, JsonStoreError::Corrupt { .. })
    }
}

/// JSONファイルによるLibraryRepository実装。
/// 蔵書全体 = 1 JSON配列。保存のたびに一時ファイル経由で丸ごと置き換える。
pub struct JsonLibraryRepository {
    path: PathBuf,
}

impl JsonLibraryRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 一時ファイルを作るディレクトリ（rename が同一FS内で完結するよう対象と同じ場所）
    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn io_error(&self, source: io::Error) -> JsonStoreError {
        JsonStoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl LibraryRepository for JsonLibraryRepository {
    type Error = JsonStoreError;

    fn load(&self) -> Result<Library, Self::Error> {
        let content = match fs::read(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = ?self.path, "library file not found, starting empty");
                return Ok(Library::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        // 空ファイルは未保存と同じ扱い
        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(Library::new());
        }

        // 不正なUTF-8もJSONとして解釈できないデータとして扱う
        let library: Library = serde_json::from_slice(&content).map_err(|source| {
            warn!(path = ?self.path, error = %source, "library file is corrupt");
            JsonStoreError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;
        debug!(path = ?self.path, records = library.len(), "library loaded");
        Ok(library)
    }

    fn save(&self, library: &Library) -> Result<(), Self::Error> {
        let dir = self.dir();
        fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;
        let content = to_pretty_json(library)?;

        // 一時ファイル名は保存ごとに一意。失敗時は drop で削除される
        if let Err(e) = write_and_replace(dir, &self.path, &content) {
            warn!(path = ?self.path, error = %e, "failed to save library");
            return Err(self.io_error(e));
        }

        debug!(path = ?self.path, records = library.len(), "library saved");
        Ok(())
    }
}

/// インデント4のJSON（既存の library.json と同じ書式）
fn to_pretty_json(library: &Library) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    library.serialize(&mut ser)?;
    Ok(buf)
}

fn write_and_replace(dir: &Path, target: &Path, content: &[u8]) -> io::Result<()> {
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.as_file().sync_all()?;
    tmp.persist(target).map_err(|e| e.error)?;
    Ok(())
}
