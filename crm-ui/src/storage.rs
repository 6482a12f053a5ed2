use crm_core::error::StorageError;
use crm_core::session::SessionStore;
use crm_core::storage::KeyValueStore;
use wasm_bindgen::JsValue;

/// `window.localStorage`, looked up on every access.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

pub type BrowserSession = SessionStore<BrowserStorage>;

fn js_message(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

impl BrowserStorage {
    fn local(&self) -> Result<web_sys::Storage, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("window not available".into()))?;
        window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(js_message(e)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".into()))
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.local()?
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(js_message(e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.local()?
            .set_item(key, value)
            .map_err(|e| StorageError::Write {
                key: key.into(),
                message: js_message(e),
            })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.local()?
            .remove_item(key)
            .map_err(|e| StorageError::Write {
                key: key.into(),
                message: js_message(e),
            })
    }
}
