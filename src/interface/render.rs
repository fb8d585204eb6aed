//! Text rendering for the presentation layer. The store itself never formats text.

use crate::domain::model::record::BookRecord;
use crate::domain::model::stats::LibraryStats;

/// `1. Dune by Frank Herbert (1965) - SciFi - Read`
pub fn format_record(index: usize, record: &BookRecord) -> String {
    format!(
        "{}. {} by {} ({}) - {} - {}",
        index,
        record.title,
        record.author,
        record.year,
        record.genre,
        if record.read { "Read" } else { "Unread" }
    )
}

/// 1始まりの番号付き一覧（1行1冊）
pub fn format_listing<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a BookRecord>,
{
    records
        .into_iter()
        .enumerate()
        .map(|(i, r)| format_record(i + 1, r))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_stats(stats: &LibraryStats) -> String {
    format!(
        "Total books: {}\nBooks read: {}\nPercentage read: {:.2}%",
        stats.total, stats.read_count, stats.read_percentage
    )
}
