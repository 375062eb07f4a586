//! 特許レコードの分類テキストを解析し、メジャー / マイナー分類ごとの件数を集計するライブラリ。
//!
//! - [`domain`]: 解析（Classifier）・加減算（Aggregator）などの純粋な処理
//! - [`application`]: 読み込み・保存を受け持つ [`PatentService`]
//! - [`infrastructure`]: JSON ファイル保存・設定・画像エンコード
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod utils {
    pub mod config;
    pub mod env;
    pub mod logging;
}

pub use application::PatentService;
pub use domain::{ClassCounts, MajorEntry, merge, parse, subtract};
pub use error::{PatentError, Result};
