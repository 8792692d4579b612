use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use stories_core::{KeyValueStore, StoreError};
use stories_logging::{stories_info, stories_warn};
use tempfile::NamedTempFile;

/// Key/value store kept as a single RON map on disk.
///
/// Every `set` rewrites the whole file through a temp file in the same
/// directory, renamed over the target. A missing or unparsable file reads as
/// empty.
#[derive(Debug)]
pub struct RonFileStore {
    path: PathBuf,
    dir: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl RonFileStore {
    /// Opens the store at `path`, creating its directory if needed and
    /// loading whatever the file currently holds.
    ///
    /// Fails when `path` has no file name or its directory cannot be used.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if path.file_name().is_none() {
            return Err(StoreError::Unavailable(format!(
                "no file name in {:?}",
                path
            )));
        }
        let dir = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        fs::create_dir_all(&dir)?;

        let values = load_values(&path);
        Ok(Self {
            path,
            dir,
            values: Mutex::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn rewrite(&self, values: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let pretty = ron::ser::PrettyConfig::new();
        let content = ron::ser::to_string_pretty(values, pretty)
            .map_err(|err| StoreError::Serialize(err.to_string()))?;

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&self.path).map_err(|err| StoreError::Io(err.error))?;
        Ok(())
    }
}

impl KeyValueStore for RonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self
            .values
            .lock()
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;
        values.insert(key.to_string(), value.to_string());
        self.rewrite(&values)
    }
}

fn load_values(path: &Path) -> BTreeMap<String, String> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return BTreeMap::new();
        }
        Err(err) => {
            stories_warn!("Failed to read stored values from {:?}: {}", path, err);
            return BTreeMap::new();
        }
    };

    match ron::from_str(&content) {
        Ok(values) => {
            stories_info!("Loaded stored values from {:?}", path);
            values
        }
        Err(err) => {
            stories_warn!("Failed to parse stored values from {:?}: {}", path, err);
            BTreeMap::new()
        }
    }
}
