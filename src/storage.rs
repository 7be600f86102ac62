use crate::error::Result;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// String key-value persistence used for settings and the high score.
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result;
}

/// All keys live in one JSON object on disk, rewritten on every `set`.
pub struct FileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStorage {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "ignoring corrupt storage file");
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        tracing::debug!(path = %path.display(), keys = entries.len(), "opened storage");
        FileStorage { path, entries }
    }

    fn flush(&self) -> Result {
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct MemoryStorage {
    entries: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
