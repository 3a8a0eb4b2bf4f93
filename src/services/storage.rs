use anyhow::{anyhow, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use web_sys::{window, Storage};

/// Raw string key/value slot the preference store persists into.
pub trait StorageBackend {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

impl<S: StorageBackend + ?Sized> StorageBackend for Box<S> {
    fn read(&self, key: &str) -> Option<String> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// `window.localStorage`.
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Result<Storage> {
        let window = window().ok_or_else(|| anyhow!("no window"))?;
        window
            .local_storage()
            .map_err(|e| anyhow!("localStorage access denied: {:?}", e))?
            .ok_or_else(|| anyhow!("localStorage unavailable"))
    }

    pub fn is_available() -> bool {
        Self::storage().is_ok()
    }
}

impl StorageBackend for LocalStorage {
    fn read(&self, key: &str) -> Option<String> {
        let storage = Self::storage().ok()?;
        storage.get_item(key).ok()?
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| anyhow!("localStorage write failed: {:?}", e))
    }

    fn remove(&self, key: &str) -> Result<()> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| anyhow!("localStorage remove failed: {:?}", e))
    }
}

/// In-process storage. `quota` caps the byte length of a single value, which is
/// enough to reproduce a full `localStorage`.
#[derive(Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            items: RefCell::default(),
            quota: Some(quota),
        }
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        if let Some(quota) = self.quota {
            if value.len() > quota {
                return Err(anyhow!("quota exceeded: {} > {} bytes", value.len(), quota));
            }
        }
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn local_storage_round_trips() {
        assert!(LocalStorage::is_available());
        let storage = LocalStorage;
        storage.write("ozark-test", "{}").unwrap();
        assert_eq!(storage.read("ozark-test").as_deref(), Some("{}"));
        storage.remove("ozark-test").unwrap();
        assert_eq!(storage.read("ozark-test"), None);
    }
}
