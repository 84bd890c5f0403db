//! Per-user preference storage: favorites, recent tools, and result
//! history. Keys are versioned so a future schema change can ignore old
//! payloads instead of corrupting them. Every load path goes through the
//! defensive validators, so a damaged file degrades to empty state rather
//! than an error.

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, RwLock};

use chrono::Utc;
use log::warn;

use crate::models::SavedItem;
use crate::services::validation::{
    safe_parse_and_validate, validate_history_array, validate_saved_items, MAX_HISTORY_ENTRIES,
    MAX_HISTORY_ENTRY_CHARS,
};
use crate::utils::{normalize_path_key, truncate_chars};

pub const FAVORITES_KEY: &str = "ng_favorites_v1";
pub const RECENTS_KEY: &str = "ng_recents_v1";
pub const HISTORY_KEY: &str = "ng_history_v1";
pub const CHANGE_EVENT: &str = "ng-userdata-change";

pub const MAX_RECENTS: usize = 12;
pub const MAX_FAVORITES: usize = 100;

#[derive(Default)]
struct UserData {
    favorites: Vec<SavedItem>,
    recents: Vec<SavedItem>,
    history: Vec<String>,
}

type Listener = Box<dyn Fn(&str) + Send + Sync>;

/// In-process store with optional file persistence. `open(None)` keeps
/// everything in memory, which is what the tests use.
pub struct UserDataStore {
    dir: Option<PathBuf>,
    inner: RwLock<UserData>,
    version: AtomicU64,
    listeners: Mutex<Vec<Listener>>,
}

impl UserDataStore {
    pub fn open(dir: Option<PathBuf>) -> Self {
        let mut data = UserData::default();
        if let Some(dir) = &dir {
            if let Err(e) = fs::create_dir_all(dir) {
                warn!("could not create user data dir {}: {e}", dir.display());
            }
            data.favorites = load_items(dir, FAVORITES_KEY, MAX_FAVORITES);
            data.recents = load_items(dir, RECENTS_KEY, MAX_RECENTS);
            data.history = load_history(dir);
        }
        UserDataStore {
            dir,
            inner: RwLock::new(data),
            version: AtomicU64::new(0),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Monotonic change counter, bumped on every successful mutation.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Relaxed)
    }

    /// Register a change listener. Listeners receive the storage key that
    /// changed, mirroring a `ng-userdata-change` event.
    pub fn subscribe(&self, listener: Listener) {
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.push(listener);
        }
    }

    fn notify(&self, key: &str) {
        self.version.fetch_add(1, Ordering::Relaxed);
        if let Ok(listeners) = self.listeners.lock() {
            for listener in listeners.iter() {
                listener(key);
            }
        }
    }

    fn persist<T: serde::Serialize>(&self, key: &str, value: &T) {
        let Some(dir) = &self.dir else { return };
        let path = dir.join(format!("{key}.json"));
        match serde_json::to_string(value) {
            Ok(json) => {
                if let Err(e) = fs::write(&path, json) {
                    warn!("could not persist {key}: {e}");
                }
            }
            Err(e) => warn!("could not serialize {key}: {e}"),
        }
    }

    pub fn favorites(&self) -> Vec<SavedItem> {
        self.inner
            .read()
            .map(|d| d.favorites.clone())
            .unwrap_or_default()
    }

    /// Add a favorite if its key is not already present. Returns false on
    /// duplicate or when the favorites cap is reached.
    pub fn add_favorite(&self, mut item: SavedItem) -> bool {
        item.key = normalize_path_key(&item.key);
        let added = {
            let Ok(mut data) = self.inner.write() else {
                return false;
            };
            if data.favorites.len() >= MAX_FAVORITES
                || data.favorites.iter().any(|f| f.key == item.key)
            {
                false
            } else {
                data.favorites.push(item);
                self.persist(FAVORITES_KEY, &data.favorites);
                true
            }
        };
        if added {
            self.notify(FAVORITES_KEY);
        }
        added
    }

    /// Remove a favorite by key. Returns false when the key was absent.
    pub fn remove_favorite(&self, key: &str) -> bool {
        let key = normalize_path_key(key);
        let removed = {
            let Ok(mut data) = self.inner.write() else {
                return false;
            };
            let before = data.favorites.len();
            data.favorites.retain(|f| f.key != key);
            if data.favorites.len() < before {
                self.persist(FAVORITES_KEY, &data.favorites);
                true
            } else {
                false
            }
        };
        if removed {
            self.notify(FAVORITES_KEY);
        }
        removed
    }

    pub fn is_favorite(&self, key: &str) -> bool {
        let key = normalize_path_key(key);
        self.inner
            .read()
            .map(|d| d.favorites.iter().any(|f| f.key == key))
            .unwrap_or(false)
    }

    pub fn recents(&self) -> Vec<SavedItem> {
        self.inner
            .read()
            .map(|d| d.recents.clone())
            .unwrap_or_default()
    }

    /// Record a tool use: dedup by key, move to the front, cap at
    /// `MAX_RECENTS` by dropping from the tail.
    pub fn add_recent(&self, mut item: SavedItem) {
        item.key = normalize_path_key(&item.key);
        item.saved_at = Utc::now().timestamp_millis();
        {
            let Ok(mut data) = self.inner.write() else {
                return;
            };
            data.recents.retain(|r| r.key != item.key);
            data.recents.insert(0, item);
            data.recents.truncate(MAX_RECENTS);
            self.persist(RECENTS_KEY, &data.recents);
        }
        self.notify(RECENTS_KEY);
    }

    pub fn clear_recents(&self) {
        {
            let Ok(mut data) = self.inner.write() else {
                return;
            };
            data.recents.clear();
            self.persist(RECENTS_KEY, &data.recents);
        }
        self.notify(RECENTS_KEY);
    }

    pub fn history(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|d| d.history.clone())
            .unwrap_or_default()
    }

    /// Prepend a formatted result line. Blank entries are ignored; long
    /// entries are truncated; the log is capped from the tail.
    pub fn add_history(&self, entry: &str) {
        let entry = truncate_chars(entry.trim(), MAX_HISTORY_ENTRY_CHARS);
        if entry.is_empty() {
            return;
        }
        {
            let Ok(mut data) = self.inner.write() else {
                return;
            };
            data.history.insert(0, entry);
            data.history.truncate(MAX_HISTORY_ENTRIES);
            self.persist(HISTORY_KEY, &data.history);
        }
        self.notify(HISTORY_KEY);
    }

    pub fn clear_history(&self) {
        {
            let Ok(mut data) = self.inner.write() else {
                return;
            };
            data.history.clear();
            self.persist(HISTORY_KEY, &data.history);
        }
        self.notify(HISTORY_KEY);
    }
}

fn load_raw(dir: &PathBuf, key: &str) -> String {
    fs::read_to_string(dir.join(format!("{key}.json"))).unwrap_or_default()
}

fn load_items(dir: &PathBuf, key: &str, cap: usize) -> Vec<SavedItem> {
    safe_parse_and_validate(
        &load_raw(dir, key),
        |v| validate_saved_items(v, cap),
        Vec::new(),
    )
}

fn load_history(dir: &PathBuf) -> Vec<String> {
    safe_parse_and_validate(&load_raw(dir, HISTORY_KEY), validate_history_array, Vec::new())
}
