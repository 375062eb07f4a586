//! 集計テーブルの表示用行 – ドメイン層
//!
//! [`ClassCounts`] を表示用の行に展開し、指定キー・方向で並べ替えます。
//! 同値の行は集計マップの走査順（分類コード順）を保ちます。

use crate::domain::class_counts::ClassCounts;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use url::Url;

const PATENT_SEARCH_BASE: &str = "https://patents.google.com/";

/// 並べ替えキー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    /// 件数（メジャー表は count、マイナー表は minorCount）
    #[default]
    Count,
    /// 分類コード
    Class,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

/// 対象テーブル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Major,
    Minor,
}

/// 両テーブルの並べ替え状態（既定は件数の降順）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub major: SortSpec,
    pub minor: SortSpec,
}

impl SortState {
    /// 見出しクリック
    ///
    /// 別のキーを選んだ場合は直前の方向を `desc` とみなし、常に反転させる。
    /// つまり新しいキーは `asc` から始まる。
    pub fn on_header_click(&mut self, table: Table, field: SortField) {
        let spec = match table {
            Table::Major => &mut self.major,
            Table::Minor => &mut self.minor,
        };
        let prev = if spec.field == field {
            spec.direction
        } else {
            SortDirection::Desc
        };
        *spec = SortSpec::new(field, prev.reversed());
    }
}

/// メジャー表の 1 行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MajorRow {
    pub major_class: String,
    pub count: u32,
}

impl MajorRow {
    pub fn search_url(&self) -> String {
        major_search_url(&self.major_class)
    }
}

/// マイナー表の 1 行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinorRow {
    pub major_class: String,
    pub minor_class: String,
    pub minor_count: u32,
}

impl MinorRow {
    /// `G06F/16` 形式の表示名
    pub fn label(&self) -> String {
        format!("{}/{}", self.major_class, self.minor_class)
    }

    pub fn search_url(&self) -> String {
        class_search_url(&self.label())
    }
}

pub fn major_rows(counts: &ClassCounts, sort: SortSpec) -> Vec<MajorRow> {
    let mut rows: Vec<MajorRow> = counts
        .iter()
        .map(|(major, entry)| MajorRow {
            major_class: major.clone(),
            count: entry.count,
        })
        .collect();

    rows.sort_by(|a, b| {
        let ord = match sort.field {
            SortField::Count => a.count.cmp(&b.count),
            SortField::Class => a.major_class.cmp(&b.major_class),
        };
        sort.direction.apply(ord)
    });
    rows
}

/// マイナー表の行を作る。空文字列のマイナー分類は表示しない
pub fn minor_rows(counts: &ClassCounts, sort: SortSpec) -> Vec<MinorRow> {
    let mut rows: Vec<MinorRow> = counts
        .iter()
        .flat_map(|(major, entry)| {
            entry
                .minor
                .iter()
                .filter(|(code, _)| !code.trim().is_empty())
                .map(move |(code, n)| MinorRow {
                    major_class: major.clone(),
                    minor_class: code.clone(),
                    minor_count: *n,
                })
        })
        .collect();

    rows.sort_by(|a, b| {
        let ord = match sort.field {
            SortField::Count => a.minor_count.cmp(&b.minor_count),
            SortField::Class => (&a.major_class, &a.minor_class).cmp(&(&b.major_class, &b.minor_class)),
        };
        sort.direction.apply(ord)
    });
    rows
}

fn search_url(query: &str) -> String {
    match Url::parse_with_params(PATENT_SEARCH_BASE, &[("q", query)]) {
        Ok(url) => url.to_string(),
        Err(_) => PATENT_SEARCH_BASE.to_string(),
    }
}

/// メジャー分類の検索 URL（`q=(G06F)`）
pub fn major_search_url(major: &str) -> String {
    search_url(&format!("({})", major))
}

/// 分類の CPC 検索 URL（`q=CPC=(G06F/16)`）
pub fn class_search_url(class: &str) -> String {
    search_url(&format!("CPC=({})", class))
}
