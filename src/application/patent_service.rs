//! 特許レコード管理サービス
//!
//! # 責任
//! - 起動時に保存済みデータ（レコード・集計・調査済みマーク）を読み込む
//! - レコードの追加 / 削除に合わせて集計値を加算 / 減算する
//! - 変更のたびに保存する
//!
//! 集計値はレコードごとには保存しない。削除時は保存済みの分類テキストを再解析して
//! 差分を求める。

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::class_counts::{ClassCounts, merge, subtract};
use crate::domain::classifier::parse;
use crate::domain::completion::CompletionMarks;
use crate::domain::patent::{self, NewPatent, PatentRecord};
use crate::domain::report::{self, MajorRow, MinorRow, SortSpec};
use crate::domain::store::{KeyValueStore, keys};
use crate::error::Result;

/// 特許レコード管理サービス
#[derive(Debug)]
pub struct PatentService<S: KeyValueStore> {
    store: S,
    patents: Vec<PatentRecord>,
    class_counts: ClassCounts,
    completion: CompletionMarks,
    /// open 時に集計値を作り直したか
    rebuilt_on_open: bool,
}

impl<S: KeyValueStore> PatentService<S> {
    /// 保存済みデータを読み込んでサービスを作成します。
    ///
    /// 未保存・破損したキーは空として扱います。レコードは 1 件ずつ読み、
    /// 読めないものだけを飛ばします。
    ///
    /// 読み込んだ集計値がレコードの再解析結果と食い違う場合（保存途中の失敗、
    /// 読めなかったレコードなど）は再解析結果で置き換えて保存します。
    pub fn open(store: S) -> Result<Self> {
        let patents = load_patents(&store)?;
        let class_counts: ClassCounts = load_or_default(&store, keys::CLASS_COUNTS)?;
        let completion: CompletionMarks = load_or_default(&store, keys::COMPLETED_CLASSES)?;

        tracing::debug!(
            patents = patents.len(),
            majors = class_counts.len(),
            "loaded stored data"
        );

        let mut svc = Self {
            store,
            patents,
            class_counts: class_counts.pruned(),
            completion,
            rebuilt_on_open: false,
        };
        svc.rebuilt_on_open = svc.repair_counts()?;
        Ok(svc)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn rebuilt_on_open(&self) -> bool {
        self.rebuilt_on_open
    }

    pub fn patents(&self) -> &[PatentRecord] {
        &self.patents
    }

    pub fn class_counts(&self) -> &ClassCounts {
        &self.class_counts
    }

    pub fn completion(&self) -> &CompletionMarks {
        &self.completion
    }

    pub fn find(&self, id: i64) -> Option<&PatentRecord> {
        self.patents.iter().find(|p| p.id == id)
    }

    pub fn contains_title(&self, title: &str) -> bool {
        self.patents.iter().any(|p| p.title == title)
    }

    /// レコードを追加し、分類テキストの集計を合算します。
    ///
    /// タイトルか分類テキストが空、またはタイトルが既存と完全一致する場合は
    /// 何もせず `Ok(None)` を返します。
    pub fn add_patent(&mut self, new: NewPatent) -> Result<Option<PatentRecord>> {
        if !new.is_complete() {
            tracing::debug!(title = %new.title, "incomplete patent ignored");
            return Ok(None);
        }
        if self.contains_title(&new.title) {
            tracing::debug!(title = %new.title, "duplicate title ignored");
            return Ok(None);
        }

        let record = new.into_record(self.next_id(), Utc::now());
        let delta = parse(&record.class_description);

        let mut patents = self.patents.clone();
        patents.push(record.clone());
        let class_counts = merge(&self.class_counts, &delta);

        self.save_key(keys::PATENT_DATA, &patents)?;
        self.save_key(keys::CLASS_COUNTS, &class_counts)?;
        self.patents = patents;
        self.class_counts = class_counts;

        tracing::info!(
            id = record.id,
            title = %record.title,
            majors = delta.len(),
            "patent added"
        );
        Ok(Some(record))
    }

    /// レコードを削除し、その分類テキストの集計を差し引きます。
    ///
    /// 存在しない id なら何もせず `Ok(None)`。
    pub fn remove_patent(&mut self, id: i64) -> Result<Option<PatentRecord>> {
        let Some(pos) = self.patents.iter().position(|p| p.id == id) else {
            tracing::debug!(id, "remove of unknown patent ignored");
            return Ok(None);
        };

        let mut patents = self.patents.clone();
        let removed = patents.remove(pos);
        let delta = parse(&removed.class_description);
        let class_counts = subtract(&self.class_counts, &delta);

        self.save_key(keys::PATENT_DATA, &patents)?;
        self.save_key(keys::CLASS_COUNTS, &class_counts)?;
        self.patents = patents;
        self.class_counts = class_counts;

        tracing::info!(id, title = %removed.title, "patent removed");
        Ok(Some(removed))
    }

    /// 画像を設定 / 差し替え。集計値には影響しない
    pub fn set_photo(&mut self, id: i64, photo: String) -> Result<bool> {
        let Some(pos) = self.patents.iter().position(|p| p.id == id) else {
            return Ok(false);
        };

        let mut patents = self.patents.clone();
        patents[pos].photo = Some(photo);
        self.save_key(keys::PATENT_DATA, &patents)?;
        self.patents = patents;

        tracing::info!(id, "photo updated");
        Ok(true)
    }

    /// メジャー分類の調査済みマークを反転し、新しい状態を返す
    pub fn toggle_major_completion(&mut self, major: &str) -> Result<bool> {
        let mut completion = self.completion.clone();
        let state = completion.toggle_major(major);
        self.save_key(keys::COMPLETED_CLASSES, &completion)?;
        self.completion = completion;
        Ok(state)
    }

    /// マイナー分類の調査済みマークを反転し、新しい状態を返す
    pub fn toggle_minor_completion(&mut self, major: &str, minor: &str) -> Result<bool> {
        let mut completion = self.completion.clone();
        let state = completion.toggle_minor(major, minor);
        self.save_key(keys::COMPLETED_CLASSES, &completion)?;
        self.completion = completion;
        Ok(state)
    }

    /// レコード・集計・マークをすべて空にする
    pub fn reset(&mut self) -> Result<()> {
        let patents: Vec<PatentRecord> = Vec::new();
        let class_counts = ClassCounts::new();
        let completion = CompletionMarks::new();

        self.save_key(keys::PATENT_DATA, &patents)?;
        self.save_key(keys::CLASS_COUNTS, &class_counts)?;
        self.save_key(keys::COMPLETED_CLASSES, &completion)?;
        self.patents = patents;
        self.class_counts = class_counts;
        self.completion = completion;
        tracing::info!("all data reset");
        Ok(())
    }

    /// 全レコードの分類テキストを解析し直して集計値を作る（検証用の基準値）
    pub fn rebuild_counts(&self) -> ClassCounts {
        self.patents
            .iter()
            .fold(ClassCounts::new(), |acc, p| merge(&acc, &parse(&p.class_description)))
    }

    /// 保持している集計値が全レコードの再解析結果と一致するか
    pub fn verify_counts(&self) -> bool {
        self.rebuild_counts() == self.class_counts
    }

    /// 集計値を再解析結果で置き換える。変化があれば `true`
    pub fn repair_counts(&mut self) -> Result<bool> {
        let rebuilt = self.rebuild_counts();
        if rebuilt == self.class_counts {
            return Ok(false);
        }
        self.save_key(keys::CLASS_COUNTS, &rebuilt)?;
        self.class_counts = rebuilt;
        tracing::warn!("class counts differed from records and were rebuilt");
        Ok(true)
    }

    /// 現在の形式で全キーを書き直す
    pub fn save_all(&self) -> Result<()> {
        self.save_key(keys::PATENT_DATA, &self.patents)?;
        self.save_key(keys::CLASS_COUNTS, &self.class_counts)?;
        self.save_key(keys::COMPLETED_CLASSES, &self.completion)?;
        Ok(())
    }

    /// タイトルで絞り込み・タイトル順に並べた 1 ページ分（1-based）
    pub fn patents_page(&self, filter: &str, page: usize, per_page: usize) -> Vec<&PatentRecord> {
        let hits = patent::filter_sorted(&self.patents, filter);
        patent::page(&hits, page, per_page).to_vec()
    }

    pub fn total_pages(&self, filter: &str, per_page: usize) -> usize {
        patent::total_pages(patent::filter_sorted(&self.patents, filter).len(), per_page)
    }

    pub fn major_rows(&self, sort: SortSpec) -> Vec<MajorRow> {
        report::major_rows(&self.class_counts, sort)
    }

    pub fn minor_rows(&self, sort: SortSpec) -> Vec<MinorRow> {
        report::minor_rows(&self.class_counts, sort)
    }

    /// タイトル順の CSV
    pub fn export_csv(&self) -> String {
        let sorted: Vec<PatentRecord> = patent::filter_sorted(&self.patents, "")
            .into_iter()
            .cloned()
            .collect();
        patent::to_csv(&sorted)
    }

    /// 作成時刻（エポックミリ秒）を id にする。既存より必ず大きくする
    fn next_id(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let max = self.patents.iter().map(|p| p.id).max().unwrap_or(i64::MIN);
        now.max(max.saturating_add(1))
    }

    fn save_key<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_value(value)?;
        self.store.save(key, &json)
    }
}

/// `patentData` をレコード単位で読む。配列でなければ空
fn load_patents<S>(store: &S) -> Result<Vec<PatentRecord>>
where
    S: KeyValueStore + ?Sized,
{
    let items = match store.load(keys::PATENT_DATA)? {
        None => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(_) => {
            tracing::warn!("stored patentData is not an array, starting empty");
            return Ok(Vec::new());
        }
    };

    let mut patents = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<PatentRecord>(item) {
            Ok(p) => patents.push(p),
            Err(e) => tracing::warn!(index, error = %e, "skipping unreadable patent record"),
        }
    }
    Ok(patents)
}

fn load_or_default<T, S>(store: &S, key: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    let Some(value) = store.load(key)? else {
        return Ok(T::default());
    };
    match serde_json::from_value(value) {
        Ok(v) => Ok(v),
        Err(e) => {
            tracing::warn!(key, error = %e, "stored data has unexpected shape, starting empty");
            Ok(T::default())
        }
    }
}
