use serde::Serialize;

/// 蔵書の集計値。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LibraryStats {
    pub total: usize,
    pub read_count: usize,
    /// 既読率（%）。小数第2位で偶数丸め（3.125 → 3.12）。total == 0 のときは 0。
    pub read_percentage: f64,
}

impl LibraryStats {
    pub fn new(total: usize, read_count: usize) -> Self {
        let read_percentage = if total == 0 {
            0.0
        } else {
            round2(read_count as f64 / total as f64 * 100.0)
        };
        Self {
            total,
            read_count,
            read_percentage,
        }
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round_ties_even() / 100.0
}
