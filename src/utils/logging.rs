//! ログ初期化
//!
//! `RUST_LOG` でレベルを制御する。コア（解析・集計）はログを出さず、
//! サービス層の境界でのみ記録する。

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// ログ出力形式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON 構造化ログ
    Json,
    /// 人間向け
    #[default]
    Pretty,
}

/// ロガーを初期化します。2 回目以降の呼び出しは何もしません。
///
/// `RUST_LOG` が無ければ `default_level` を使う。出力先は stderr。
pub fn init_logging(format: LogFormat, default_level: &str) {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

        match format {
            LogFormat::Json => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().json().with_writer(std::io::stderr))
                    .init();
            }
            LogFormat::Pretty => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().with_writer(std::io::stderr))
                    .init();
            }
        }
    });
}
