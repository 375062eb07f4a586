//! 分類コード集計値と加算 / 減算（Aggregator） – ドメイン層
//!
//! `ClassCounts` は「メジャー分類 → {件数, マイナー分類 → 件数}」の 2 段マップ。
//! 変更は [`merge`] / [`subtract`] が返す新しい値でのみ行い、既存値は書き換えない。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map;

/// メジャー分類 1 件分の集計
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MajorEntry {
    /// このメジャー分類に一致した行数（マイナー件数の合計ではない）
    pub count: u32,
    /// マイナー分類コード → 件数
    #[serde(default)]
    pub minor: BTreeMap<String, u32>,
}

impl MajorEntry {
    pub fn new(count: u32) -> Self {
        Self {
            count,
            minor: BTreeMap::new(),
        }
    }

    /// マイナー分類の件数（未登録なら 0）
    pub fn minor_count(&self, code: &str) -> u32 {
        self.minor.get(code).copied().unwrap_or(0)
    }
}

/// 分類コード集計テーブル
///
/// 不変条件:
/// - 件数 0 のメジャー分類は存在しない
/// - 件数 0 のマイナー分類は存在しない
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassCounts(BTreeMap<String, MajorEntry>);

impl ClassCounts {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, major: &str) -> Option<&MajorEntry> {
        self.0.get(major)
    }

    pub fn contains(&self, major: &str) -> bool {
        self.0.contains_key(major)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, MajorEntry> {
        self.0.iter()
    }

    /// 1 行分の分類を記録する（Classifier 専用）
    pub(crate) fn record_line<'a>(&mut self, major: &str, minors: impl IntoIterator<Item = &'a str>) {
        let entry = self.0.entry(major.to_string()).or_default();
        entry.count += 1;
        for code in minors {
            *entry.minor.entry(code.to_string()).or_insert(0) += 1;
        }
    }

    /// 件数 0 のエントリを取り除いたコピーを返す。
    ///
    /// 外部から読み込んだ値を不変条件に合わせるために使う。
    pub fn pruned(&self) -> Self {
        let map = self
            .0
            .iter()
            .filter(|(_, entry)| entry.count > 0)
            .map(|(major, entry)| {
                let minor = entry
                    .minor
                    .iter()
                    .filter(|(_, n)| **n > 0)
                    .map(|(code, n)| (code.clone(), *n))
                    .collect();
                (
                    major.clone(),
                    MajorEntry {
                        count: entry.count,
                        minor,
                    },
                )
            })
            .collect();
        Self(map)
    }
}

impl FromIterator<(String, MajorEntry)> for ClassCounts {
    fn from_iter<I: IntoIterator<Item = (String, MajorEntry)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ClassCounts {
    type Item = (&'a String, &'a MajorEntry);
    type IntoIter = btree_map::Iter<'a, String, MajorEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// `delta` を `base` に加算した新しい集計値を返します。
///
/// `base` にないメジャー分類は `delta` の値をそのままコピーし、
/// 既存のものは件数とマイナー件数を足し合わせます。
/// 件数 0 のエントリは不変条件を守るため持ち込みません。
pub fn merge(base: &ClassCounts, delta: &ClassCounts) -> ClassCounts {
    let mut out = base.0.clone();

    for (major, add) in delta.iter().filter(|(_, e)| e.count > 0) {
        let entry = out.entry(major.clone()).or_default();
        entry.count = entry.count.saturating_add(add.count);
        for (code, n) in add.minor.iter().filter(|(_, n)| **n > 0) {
            let slot = entry.minor.entry(code.clone()).or_insert(0);
            *slot = slot.saturating_add(*n);
        }
    }

    ClassCounts(out)
}

/// `delta` を `base` から減算した新しい集計値を返します。
///
/// - 両方にあるメジャー分類だけを対象にし、件数は 0 で下げ止まる
/// - 両方にあるマイナー分類も同様に減算し、0 になったら削除
/// - メジャー件数が 0 になったらマイナーごとエントリを削除（残りのマイナーより優先）
/// - `delta` にしかない分類は無視する
pub fn subtract(base: &ClassCounts, delta: &ClassCounts) -> ClassCounts {
    let mut out = base.0.clone();

    for (major, sub) in delta.iter() {
        let Some(entry) = out.get_mut(major) else {
            continue;
        };

        entry.count = entry.count.saturating_sub(sub.count);

        for (code, n) in &sub.minor {
            if let Some(slot) = entry.minor.get_mut(code) {
                *slot = slot.saturating_sub(*n);
                if *slot == 0 {
                    entry.minor.remove(code);
                }
            }
        }

        if entry.count == 0 {
            out.remove(major);
        }
    }

    ClassCounts(out)
}
