//! JSON ファイル版 KeyValueStore 実装
//!
//! `<dir>/<key>.json` に 1 キー 1 ファイルで保存する。
use crate::domain::store::KeyValueStore;
use crate::error::{PatentError, Result};
use serde_json::{Value, from_slice, to_writer_pretty};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// 保存先ディレクトリを指定して作成（無ければ作る）
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(PatentError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<Value>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path)?;
        match from_slice::<Value>(&bytes) {
            Ok(v) => Ok(Some(v)),
            Err(e) => {
                tracing::warn!(key, path = %path.display(), error = %e, "stored JSON is corrupt, ignoring");
                Ok(None)
            }
        }
    }

    fn save(&self, key: &str, value: &Value) -> Result<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        {
            let mut f = fs::File::create(&tmp)?;
            to_writer_pretty(&mut f, value)?;
            f.write_all(b"\n")?;
        }
        fs::rename(tmp, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn missing_key_loads_as_none() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();
        assert_eq!(store.load("classCounts").unwrap(), None);
    }

    #[test]
    fn save_then_load_returns_same_value() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested")).unwrap();
        let value = json!({"G06F": {"count": 2, "minor": {"16": 2}}});

        store.save("classCounts", &value).unwrap();
        assert!(dir.path().join("nested/classCounts.json").exists());
        assert!(!dir.path().join("nested/classCounts.json.tmp").exists());
        assert_eq!(store.load("classCounts").unwrap(), Some(value));
    }

    #[test]
    fn corrupt_file_loads_as_none() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("patentData.json"), "{not json").unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();
        assert_eq!(store.load("patentData").unwrap(), None);
    }

    #[test]
    fn path_like_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();
        let err = store.save("../escape", &json!({})).unwrap_err();
        assert!(matches!(err, PatentError::InvalidKey(_)));
    }
}
