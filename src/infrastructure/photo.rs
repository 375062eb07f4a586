//! 画像ファイル → data URL 変換
use crate::error::{PatentError, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use std::{fs, path::Path};

/// 拡張子から MIME タイプを決める（画像のみ）
fn image_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        _ => return None,
    };
    Some(mime)
}

/// バイト列を `data:<mime>;base64,...` 形式にする
pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// 画像ファイルを読み込んで data URL にする
pub fn encode_photo(path: &Path) -> Result<String> {
    let mime = image_mime(path).ok_or_else(|| PatentError::UnsupportedPhoto(path.to_path_buf()))?;
    let bytes = fs::read(path)?;
    Ok(to_data_url(mime, &bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn encodes_png_as_data_url() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("figure.PNG");
        fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let url = encode_photo(&path).unwrap();
        assert_eq!(url, "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn rejects_non_image_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "hello").unwrap();

        assert!(matches!(
            encode_photo(&path),
            Err(PatentError::UnsupportedPhoto(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = encode_photo(&dir.path().join("gone.jpg")).unwrap_err();
        assert!(matches!(err, PatentError::Storage(_)));
    }
}
