use crate::domain::patent::ITEMS_PER_PAGE;
use crate::domain::store::keys;
use crate::error::{PatentError, Result};
use crate::utils::config::EnvConfig;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

const APP_NAME: &str = "patent_class_counter";

#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// 保存先ディレクトリ（未指定ならデータディレクトリ直下）
    #[serde(default)]
    pub store_dir: Option<String>,
    /// 一覧の 1 ページあたり件数
    #[serde(default)]
    pub items_per_page: Option<usize>,
}

/// データディレクトリ
///
/// 優先順: `PATENT_CLASS_COUNTER_DATA_DIR` → `$XDG_DATA_HOME/patent_class_counter` → OS 既定
pub fn data_dir() -> Result<PathBuf> {
    let config = EnvConfig::get();
    let dir = if let Some(dir) = &config.data_dir {
        PathBuf::from(dir)
    } else if let Some(xdg_data_home) = &config.xdg_data_home {
        PathBuf::from(xdg_data_home).join(APP_NAME)
    } else {
        let proj = ProjectDirs::from("com", "user", APP_NAME)
            .ok_or_else(|| PatentError::Config("cannot resolve platform dirs".into()))?;
        proj.data_local_dir().to_path_buf()
    };
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

fn config_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("config.json"))
}

pub fn default_store_dir() -> Result<PathBuf> {
    Ok(data_dir()?.join("store"))
}

impl AppConfig {
    /// 読めない / 存在しない場合は既定値
    pub fn load() -> Self {
        let Ok(path) = config_path() else {
            return AppConfig::default();
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Self {
        if let Ok(f) = fs::File::open(path) {
            match serde_json::from_reader(f) {
                Ok(cfg) => return cfg,
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "config is unreadable, using defaults"),
            }
        }
        AppConfig::default()
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = path.with_extension("json.tmp");
        {
            let f = fs::File::create(&tmp)?;
            serde_json::to_writer_pretty(&f, self)?;
        }
        fs::rename(tmp, path)?;
        Ok(())
    }

    pub fn store_dir(&self) -> Result<PathBuf> {
        match &self.store_dir {
            Some(p) => Ok(PathBuf::from(p)),
            None => default_store_dir(),
        }
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page.filter(|n| *n > 0).unwrap_or(ITEMS_PER_PAGE)
    }

    /// 保存先を変更し、既存データを新しい場所へ移す。
    ///
    /// 移動先に同名ファイルがあればそちらを優先し、上書きしない。
    /// 元ファイルは `.bak` として残す。
    pub fn set_store_dir(&mut self, new_dir: PathBuf) -> Result<()> {
        let old = self.store_dir()?;
        if old != new_dir {
            migrate_store_files(&old, &new_dir)?;
            self.store_dir = Some(new_dir.to_string_lossy().to_string());
            self.save()?;
        }
        Ok(())
    }
}

fn migrate_store_files(old_dir: &Path, new_dir: &Path) -> Result<()> {
    fs::create_dir_all(new_dir)?;
    for key in keys::ALL {
        let file = format!("{key}.json");
        let old = old_dir.join(&file);
        let new = new_dir.join(&file);
        if old.exists() && !new.exists() {
            let bak = old.with_extension("json.bak");
            if bak.exists() {
                fs::remove_file(&bak)?;
            }
            fs::rename(&old, &bak)?;
            fs::copy(&bak, &new)?;
            tracing::info!(from = %old.display(), to = %new.display(), "moved stored data");
        }
    }
    Ok(())
}
