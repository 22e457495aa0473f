use std::cell::RefCell;
use std::collections::HashMap;

use web_sys::Storage;

use crate::error::{ConsoleError, Result};

pub const AUTH_TOKEN_KEY: &str = "authToken";
pub const ADMIN_AUTH_KEY: &str = "adminAuth";

/// Flat string key/value store holding the session tokens.
pub trait TokenStore {
    fn get(&self, key: &str) -> Option<String>;
    fn remove(&self, key: &str) -> Result<()>;
}

pub fn get_local_storage() -> Option<Storage> {
    web_sys::window()
        .and_then(|window| window.local_storage().ok())
        .flatten()
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageTokenStore;

impl LocalStorageTokenStore {
    fn storage(&self) -> Result<Storage> {
        get_local_storage().ok_or_else(|| ConsoleError::Storage("localStorage not available".into()))
    }
}

fn js_error(e: wasm_bindgen::JsValue) -> ConsoleError {
    ConsoleError::Storage(e.as_string().unwrap_or_else(|| "Storage error".to_string()))
}

impl TokenStore for LocalStorageTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        get_local_storage()
            .and_then(|storage| storage.get_item(key).ok())
            .flatten()
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.storage()?.remove_item(key).map_err(js_error)
    }
}

/// In-memory store for hosts without `localStorage`.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn with_tokens(token: &str, admin_auth: &str) -> Self {
        let store = Self::default();
        store
            .items
            .borrow_mut()
            .insert(AUTH_TOKEN_KEY.to_string(), token.to_string());
        store
            .items
            .borrow_mut()
            .insert(ADMIN_AUTH_KEY.to_string(), admin_auth.to_string());
        store
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}
