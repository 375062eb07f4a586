//! 永続化 I/F（キー・バリュー） – ドメイン層
//!
//! 値は JSON のまま受け渡しし、型への変換は呼び出し側で行う。

use crate::error::Result;
use serde_json::Value;

/// 保存キー
pub mod keys {
    pub const PATENT_DATA: &str = "patentData";
    pub const CLASS_COUNTS: &str = "classCounts";
    pub const COMPLETED_CLASSES: &str = "completedClasses";

    pub const ALL: [&str; 3] = [PATENT_DATA, CLASS_COUNTS, COMPLETED_CLASSES];
}

/// キー・バリュー永続化 I/F
pub trait KeyValueStore {
    /// 未保存なら `Ok(None)`。読めない値も `Ok(None)` として扱う
    fn load(&self, key: &str) -> Result<Option<Value>>;
    fn save(&self, key: &str, value: &Value) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn load(&self, key: &str) -> Result<Option<Value>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &Value) -> Result<()> {
        (**self).save(key, value)
    }
}
