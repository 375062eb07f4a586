//! 分類テキストの解析（Classifier） – ドメイン層
//!
//! 1 行 1 分類の自由入力テキストから [`ClassCounts`] を組み立てます。
//! 想定形式に合わない行はエラーにせず読み飛ばします。

use crate::domain::class_counts::ClassCounts;
use once_cell::sync::Lazy;
use regex::Regex;

/// `<メジャー分類> <マイナー分類群> <説明>` を含む 1 行
///
/// 行頭に固定せず、行内で最初に見つかった並びを使う（`1. G06F 16/00 ...` も一致）。
///
/// - メジャー分類: 英大文字と数字
/// - マイナー分類群: 数字と `/`
/// - 説明: 1 文字以上の空白の後ろ（内容は使わない）
static CLASS_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*([A-Z0-9]+)\s+([0-9/]+)\s+(.*)").expect("class line regex")
});

/// 解析済みの 1 行（一時値）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    pub major: &'a str,
    /// `/` で分割したマイナー分類。空文字列もそのまま残す
    pub minors: Vec<&'a str>,
}

/// 1 行を解析します。形式に合わなければ `None`。
pub fn parse_line(line: &str) -> Option<ParsedLine<'_>> {
    let caps = CLASS_LINE.captures(line)?;
    let major = caps.get(1)?.as_str();
    let group = caps.get(2)?.as_str();
    Some(ParsedLine {
        major,
        minors: group.split('/').collect(),
    })
}

/// 分類テキスト全体を解析して集計値を返します。
///
/// 改行は `\n` / `\r\n` のどちらでもよい。
pub fn parse(text: &str) -> ClassCounts {
    let mut counts = ClassCounts::new();
    for parsed in text.lines().filter_map(parse_line) {
        counts.record_line(parsed.major, parsed.minors);
    }
    counts
}
