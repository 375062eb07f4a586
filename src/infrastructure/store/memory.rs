//! オンメモリ版 KeyValueStore 実装（テスト・一時利用向け）
use crate::domain::store::KeyValueStore;
use crate::error::Result;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, Value>>,
    /// save が呼ばれた回数
    saves: RefCell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 初期値を入れた状態で作成
    pub fn with_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let store = Self::new();
        store
            .entries
            .borrow_mut()
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v)));
        store
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, value: &Value) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.clone());
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
}
