//! 特許レコード – ドメイン層

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};

/// 1 ページあたりの表示件数（既定値）
pub const ITEMS_PER_PAGE: usize = 10;

/// 保存済みの特許レコード
///
/// 保存形式のキー名はブラウザ版と揃えて camelCase。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatentRecord {
    /// 識別子（作成時刻のエポックミリ秒）
    pub id: i64,
    /// タイトル（完全一致で一意）
    pub title: String,
    /// 分類テキスト。登録後は変更しない
    pub class_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// エンコード済み画像（data URL）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    /// 書き込みは RFC 3339。読み込みはブラウザ版の日付文字列も受け付ける
    #[serde(deserialize_with = "deserialize_date_added")]
    pub date_added: DateTime<Utc>,
}

/// ブラウザ版 (`toLocaleDateString()`) が保存した日付の形式。月/日/年を優先する
const LOCALE_DATE_FORMATS: [&str; 5] = ["%m/%d/%Y", "%d/%m/%Y", "%Y/%m/%d", "%d.%m.%Y", "%Y-%m-%d"];

/// `dateAdded` の文字列を日時にする。日付だけの形式は UTC の 0 時とみなす
pub fn parse_date_added(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    LOCALE_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn deserialize_date_added<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date_added(&raw).ok_or_else(|| de::Error::custom(format!("unrecognised dateAdded {raw:?}")))
}

/// 追加リクエスト
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPatent {
    pub title: String,
    pub class_description: String,
    pub url: Option<String>,
    pub photo: Option<String>,
}

impl NewPatent {
    pub fn new(title: impl Into<String>, class_description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            class_description: class_description.into(),
            ..Self::default()
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = Some(photo.into());
        self
    }

    /// タイトルと分類テキストが両方入力されているか
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty() && !self.class_description.is_empty()
    }

    pub fn into_record(self, id: i64, date_added: DateTime<Utc>) -> PatentRecord {
        PatentRecord {
            id,
            title: self.title,
            class_description: self.class_description,
            url: self.url.filter(|u| !u.is_empty()),
            photo: self.photo,
            date_added,
        }
    }
}

/// タイトルの部分一致（大文字小文字を区別しない）で絞り込み、タイトル順に並べる
pub fn filter_sorted<'a>(records: &'a [PatentRecord], filter: &str) -> Vec<&'a PatentRecord> {
    let needle = filter.to_lowercase();
    let mut hits: Vec<&PatentRecord> = records
        .iter()
        .filter(|p| p.title.to_lowercase().contains(&needle))
        .collect();
    hits.sort_by(|a, b| a.title.cmp(&b.title));
    hits
}

/// 1-based のページを切り出す。範囲外なら空
pub fn page<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    if page == 0 || per_page == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(per_page);
    if start >= items.len() {
        return &[];
    }
    let end = (start + per_page).min(items.len());
    &items[start..end]
}

pub fn total_pages(len: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    len.div_ceil(per_page)
}

/// `Title,Class Description` 形式の CSV を作る。
///
/// 分類テキスト中の `,` は `;` に置き換える。
pub fn to_csv(records: &[PatentRecord]) -> String {
    let mut out = String::from("Title,Class Description\n");
    let rows: Vec<String> = records
        .iter()
        .map(|p| format!("{},{}", p.title, p.class_description.replace(',', ";")))
        .collect();
    out.push_str(&rows.join("\n"));
    out
}
