//! View preferences and the key-value store they persist to.
//!
//! The query layer never reads preferences itself; the UI loads a
//! [`ViewPreferences`] from an injected [`PreferenceStore`] and passes the
//! resulting settings down.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::domain::{PageSize, SortConfig, SortDirection, SortField, ViewMode};

pub const KEY_SORT_FIELD: &str = "sort_field";
pub const KEY_SORT_DIRECTION: &str = "sort_direction";
pub const KEY_PAGE_SIZE: &str = "page_size";
pub const KEY_VIEW_MODE: &str = "view_mode";

/// String key-value persistence
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Process-local store
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: HashMap<String, String>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Flat JSON object on disk, rewritten on every change
#[derive(Debug, Clone)]
pub struct JsonFilePreferences {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFilePreferences {
    /// Open the store, starting empty if the file does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let values = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read preferences: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse preferences: {}", path.display()))?
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write preferences: {}", self.path.display()))?;

        Ok(())
    }
}

impl PreferenceStore for JsonFilePreferences {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

/// Listing settings remembered between sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewPreferences {
    pub sort: SortConfig,
    pub page_size: PageSize,
    pub view_mode: ViewMode,
}

/// Read and parse one key; a bad stored value falls back to the default
fn read_or<T, S>(store: &S, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    S: PreferenceStore + ?Sized,
{
    match store.get(key)? {
        None => Ok(default),
        Some(raw) => match raw.parse() {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(key, value = %raw, "Ignoring stored preference: {}", e);
                Ok(default)
            }
        },
    }
}

impl ViewPreferences {
    /// Load from a store, using `defaults` for anything missing or invalid
    pub fn load<S>(store: &S, defaults: ViewPreferences) -> Result<Self>
    where
        S: PreferenceStore + ?Sized,
    {
        let field: SortField = read_or(store, KEY_SORT_FIELD, defaults.sort.field)?;
        let direction: SortDirection = read_or(store, KEY_SORT_DIRECTION, defaults.sort.direction)?;

        Ok(Self {
            sort: SortConfig::new(field, direction),
            page_size: read_or(store, KEY_PAGE_SIZE, defaults.page_size)?,
            view_mode: read_or(store, KEY_VIEW_MODE, defaults.view_mode)?,
        })
    }

    pub fn save<S>(&self, store: &mut S) -> Result<()>
    where
        S: PreferenceStore + ?Sized,
    {
        store.set(KEY_SORT_FIELD, self.sort.field.as_str())?;
        store.set(KEY_SORT_DIRECTION, self.sort.direction.as_str())?;
        store.set(KEY_PAGE_SIZE, &self.page_size.to_string())?;
        store.set(KEY_VIEW_MODE, self.view_mode.as_str())?;
        debug!(prefs = ?self, "Saved view preferences");
        Ok(())
    }
}
