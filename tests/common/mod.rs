#![allow(dead_code)]

use patent_class_counter::{ClassCounts, MajorEntry};

/// `[("A", 2, &[("1", 1)])]` 形式から集計値を組み立てる
pub fn counts(items: &[(&str, u32, &[(&str, u32)])]) -> ClassCounts {
    items
        .iter()
        .map(|(major, count, minor)| {
            (
                major.to_string(),
                MajorEntry {
                    count: *count,
                    minor: minor.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
                },
            )
        })
        .collect()
}

/// 全エントリが不変条件（件数 0 を含まない）を満たすか
pub fn has_no_zero_entries(counts: &ClassCounts) -> bool {
    counts
        .iter()
        .all(|(_, e)| e.count > 0 && e.minor.values().all(|n| *n > 0))
}
