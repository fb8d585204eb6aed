use serde::{Deserialize, Serialize};

use super::field::SearchField;
use super::record::BookRecord;
use super::stats::LibraryStats;
use crate::domain::error::DomainError;

/// 蔵書リスト — 集約ルート。挿入順を保持し、タイトルの重複を許す。
///
/// 変更系の操作は `self` を消費して新しい `Library` を返す。
/// 永続化は呼び出し側（`LibraryRepository::save`）の責務。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Library {
    records: Vec<BookRecord>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 末尾にレコードを追加する。検証は行わない（空タイトルも可）。
    pub fn add_record(mut self, record: BookRecord) -> Self {
        self.records.push(record);
        self
    }

    /// タイトルが完全一致（大文字小文字を区別）する全レコードを除いた蔵書を返す。
    /// 一致がなければそのまま返す。
    pub fn remove_by_title(mut self, title: &str) -> Self {
        self.records.retain(|r| r.title != title);
        self
    }

    /// 指定フィールドに `query` を部分文字列として含むレコード（大文字小文字を無視）。
    /// 空の `query` は全件に一致する。
    pub fn search(&self, field: SearchField, query: &str) -> Vec<&BookRecord> {
        let needle = query.to_lowercase();
        self.records
            .iter()
            .filter(|r| field.value_of(r).to_lowercase().contains(&needle))
            .collect()
    }

    /// フィールド名を文字列で受け取る版。未対応フィールドは `InvalidField`。
    pub fn search_by(&self, field: &str, query: &str) -> Result<Vec<&BookRecord>, DomainError> {
        let field: SearchField = field.parse()?;
        Ok(self.search(field, query))
    }

    pub fn list_all(&self) -> &[BookRecord] {
        &self.records
    }

    /// 格納順のタイトル一覧（重複あり）
    pub fn titles(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.title.as_str()).collect()
    }

    pub fn count_title(&self, title: &str) -> usize {
        self.records.iter().filter(|r| r.title == title).count()
    }

    pub fn statistics(&self) -> LibraryStats {
        let read_count = self.records.iter().filter(|r| r.read).count();
        LibraryStats::new(self.records.len(), read_count)
    }
}

impl From<Vec<BookRecord>> for Library {
    fn from(records: Vec<BookRecord>) -> Self {
        Self { records }
    }
}
