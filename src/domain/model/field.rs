use std::fmt;
use std::str::FromStr;

use super::record::BookRecord;
use crate::domain::error::DomainError;

/// 検索対象のフィールド。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Title,
    Author,
}

impl SearchField {
    /// レコードから該当フィールドの値を取り出す。
    pub fn value_of(self, record: &BookRecord) -> &str {
        match self {
            SearchField::Title => &record.title,
            SearchField::Author => &record.author,
        }
    }
}

impl FromStr for SearchField {
    type Err = DomainError;

    // 大文字小文字は区別しない（"Title" / "title" どちらも可）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "title" => Ok(SearchField::Title),
            "author" => Ok(SearchField::Author),
            _ => Err(DomainError::InvalidField(s.to_string())),
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchField::Title => write!(f, "title"),
            SearchField::Author => write!(f, "author"),
        }
    }
}
