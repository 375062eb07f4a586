//! 調査済みマーク – ドメイン層
//!
//! 集計テーブルのキーに重ねるだけの UI 用注釈。分類が集計から消えても
//! マークは残る（掃除はしない）。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 1 メジャー分類分のマーク
///
/// 保存形式は `{"major": true, "<minor>": true, ...}` のフラットなオブジェクト。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionMark {
    #[serde(default)]
    pub major: bool,
    #[serde(flatten)]
    pub minor: BTreeMap<String, bool>,
}

/// メジャー分類コード → マーク
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionMarks(BTreeMap<String, CompletionMark>);

impl CompletionMarks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_major_completed(&self, major: &str) -> bool {
        self.0.get(major).is_some_and(|m| m.major)
    }

    pub fn is_minor_completed(&self, major: &str, minor: &str) -> bool {
        self.0
            .get(major)
            .and_then(|m| m.minor.get(minor))
            .copied()
            .unwrap_or(false)
    }

    /// メジャー分類のマークを反転し、新しい状態を返す
    pub fn toggle_major(&mut self, major: &str) -> bool {
        let mark = self.0.entry(major.to_string()).or_default();
        mark.major = !mark.major;
        mark.major
    }

    /// マイナー分類のマークを反転し、新しい状態を返す
    pub fn toggle_minor(&mut self, major: &str, minor: &str) -> bool {
        let mark = self.0.entry(major.to_string()).or_default();
        let flag = mark.minor.entry(minor.to_string()).or_insert(false);
        *flag = !*flag;
        *flag
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
