//! 統一エラーハンドリング
//!
//! 失敗しうるのは永続化・設定・画像読み込みの I/O だけ。
//! 分類テキストの解析と集計の加減算はエラーを返さない。

use std::path::PathBuf;
use thiserror::Error;

/// patent_class_counter 全体で使用する統一エラー型
#[derive(Debug, Error)]
pub enum PatentError {
    // ========================================
    // 永続化関連エラー
    // ========================================
    #[error("Storage I/O error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    // ========================================
    // 画像関連エラー
    // ========================================
    #[error("Unsupported photo type: {}", .0.display())]
    UnsupportedPhoto(PathBuf),

    // ========================================
    // 設定関連エラー
    // ========================================
    #[error("Configuration error: {0}")]
    Config(String),
}

/// 統一Result型エイリアス
pub type Result<T> = std::result::Result<T, PatentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert() {
        let err: PatentError = std::io::Error::new(std::io::ErrorKind::Other, "disk").into();
        assert!(matches!(err, PatentError::Storage(_)));
        assert!(err.to_string().contains("disk"));
    }

    #[test]
    fn photo_error_mentions_path() {
        let err = PatentError::UnsupportedPhoto(PathBuf::from("scan.tiff"));
        assert_eq!(err.to_string(), "Unsupported photo type: scan.tiff");
    }
}
