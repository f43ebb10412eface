use popchat_core::store::{KeyValueStore, StoreError, StoreErrorKind};
use popchat_core::MemoryStore;
use wasm_bindgen::JsValue;
use web_sys::{Storage, Window};

/// Session storage of the page, or memory when it's unavailable.
///
/// Accessing `sessionStorage` throws in sandboxed frames and some privacy
/// modes. The conversation then only lives as long as the widget.
pub(crate) struct SessionStore {
    storage: Option<Storage>,
    fallback: MemoryStore,
}

impl SessionStore {
    pub(crate) fn new(window: &Window) -> Self {
        let storage = match window.session_storage() {
            Ok(storage) => storage,
            Err(err) => {
                warn!("session storage is unavailable: {err:?}");
                None
            }
        };
        Self {
            storage,
            fallback: MemoryStore::new(),
        }
    }
}

fn store_error(kind: StoreErrorKind, err: JsValue) -> StoreError {
    StoreError::new(kind, format!("{err:?}"))
}

impl KeyValueStore for SessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match &self.storage {
            Some(storage) => storage
                .get_item(key)
                .map_err(|err| store_error(StoreErrorKind::Read, err)),
            None => self.fallback.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        match &self.storage {
            Some(storage) => storage
                .set_item(key, value)
                .map_err(|err| store_error(StoreErrorKind::Write, err)),
            None => self.fallback.set(key, value),
        }
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match &self.storage {
            Some(storage) => storage
                .remove_item(key)
                .map_err(|err| store_error(StoreErrorKind::Remove, err)),
            None => self.fallback.remove(key),
        }
    }
}
