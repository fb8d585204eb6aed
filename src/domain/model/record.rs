use serde::{Deserialize, Serialize};

/// 蔵書1冊分のレコード。
/// 永続化時のキー名（`Title` 等）は既存の `library.json` と互換。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BookRecord {
    /// 削除時の検索キーを兼ねる。空文字も許容する。
    pub title: String,
    pub author: String,
    pub year: u32,
    pub genre: String,
    pub read: bool,
}

impl BookRecord {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: u32,
        genre: impl Into<String>,
        read: bool,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
            genre: genre.into(),
            read,
        }
    }
}
