use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;

/// Externally owned string-keyed mapping backing all preferences.
///
/// Implementations must keep absence and presence distinguishable: an absent
/// key is never reported as an empty string. Reads are fail-soft; write
/// failures surface to the caller.
pub trait PrefStore {
    fn contains(&self, key: &str) -> bool;
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;
}

/// In-process store with no persistence. Useful for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrefStore for MemoryStore {
    fn contains(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    fn get(&self, key: &str) -> Option<String> {
        self.data.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.data.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store persisted as a flat JSON object on disk.
///
/// Holds no cached state: every read goes back to the file and every write is
/// load-insert-persist, so independently constructed stores over the same
/// path observe each other's writes immediately.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::prefs_path().unwrap_or_else(|| PathBuf::from("prefkit_prefs.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> HashMap<String, String> {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(map) = serde_json::from_slice::<HashMap<String, String>>(&bytes) {
                return map;
            }
        }
        HashMap::new()
    }

    fn persist(&self, map: &HashMap<String, String>) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let data = serde_json::to_vec_pretty(map).unwrap_or_default();
        fs::write(&self.path, data)
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefStore for FileStore {
    fn contains(&self, key: &str) -> bool {
        self.load().contains_key(key)
    }

    fn get(&self, key: &str) -> Option<String> {
        self.load().get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        let mut map = self.load();
        map.insert(key.to_string(), value.to_string());
        self.persist(&map)
    }
}
