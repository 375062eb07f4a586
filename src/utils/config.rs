//! グローバル環境変数設定
//!
//! アプリケーション全体で使用する環境変数を一元管理。
//! プロセス起動時に一度だけ初期化し、以降はどこからでもアクセス可能。

use crate::utils::logging::LogFormat;
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// グローバル環境変数設定
static ENV_CONFIG: OnceCell<Arc<EnvConfig>> = OnceCell::new();

/// 環境変数設定
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    /// 保存先ディレクトリの直接指定（最優先）
    pub data_dir: Option<String>,
    /// XDG Data Home ディレクトリ
    pub xdg_data_home: Option<String>,
    /// ログ出力形式
    pub log_format: LogFormat,
}

impl EnvConfig {
    /// 現在のプロセス環境から読み取る（グローバルには登録しない）
    pub fn from_env() -> Self {
        let log_format = match std::env::var("PATENT_CLASS_COUNTER_LOG_FORMAT").ok().as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };
        EnvConfig {
            data_dir: non_empty_var("PATENT_CLASS_COUNTER_DATA_DIR"),
            xdg_data_home: non_empty_var("XDG_DATA_HOME"),
            log_format,
        }
    }

    /// 環境変数から設定を初期化
    ///
    /// アプリケーション起動時に呼び出す。
    /// 既に初期化済みの場合は何もしない（冪等）。
    pub fn init() {
        if ENV_CONFIG.get().is_some() {
            return;
        }
        // 並列実行時の競合を考慮：既に他のスレッドが初期化していても成功とする
        let _ = ENV_CONFIG.set(Arc::new(Self::from_env()));
    }

    /// 設定を取得。未初期化なら現在の環境から初期化する
    pub fn get() -> Arc<EnvConfig> {
        ENV_CONFIG
            .get_or_init(|| Arc::new(Self::from_env()))
            .clone()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
