//! JSON file cache, one file per controller host

use super::{CacheLookup, CacheStore, SessionRecord};
use crate::error::{AosError, AosResult};
use serde_json::Value;
use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Session cache stored as `aossession-<host>.json` files in a directory
#[derive(Debug, Clone)]
pub struct FileCacheStore {
    cache_dir: PathBuf,
}

impl FileCacheStore {
    /// Create a store rooted at `cache_dir`; the directory is created on first write
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// Directory holding the cache files
    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Path of the cache file for `host`
    pub fn path_for(&self, host: &str) -> PathBuf {
        let name: String = host
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
            .collect();
        self.cache_dir.join(format!("aossession-{}.json", name))
    }

    fn write(&self, path: &Path, content: &str) -> AosResult<()> {
        let write_err = |source: io::Error| AosError::CacheWrite {
            path: path.to_path_buf(),
            source,
        };

        // An existing directory may be shared (e.g. /tmp); leave its mode alone
        if !self.cache_dir.is_dir() {
            create_private_dir(&self.cache_dir).map_err(write_err)?;
        }

        // The file holds a live credential: write it private, then rename into place
        let staging = path.with_extension("json.tmp");
        match fs::remove_file(&staging) {
            Err(e) if e.kind() != ErrorKind::NotFound => return Err(write_err(e)),
            _ => {}
        }
        let mut file = open_private(&staging).map_err(write_err)?;
        file.write_all(content.as_bytes()).map_err(write_err)?;
        drop(file);

        fs::rename(&staging, path).map_err(write_err)?;
        Ok(())
    }
}

fn unreadable(path: &Path, reason: impl ToString) -> CacheLookup {
    let err = AosError::CacheRead {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };
    CacheLookup::Unreadable(err.to_string())
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(0o700).create(dir)
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)
}

fn open_private(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)
}

impl CacheStore for FileCacheStore {
    fn load(&self, host: &str) -> CacheLookup {
        let path = self.path_for(host);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No session cache at {}", path.display());
                return CacheLookup::Miss;
            }
            Err(e) => return unreadable(&path, e),
        };

        let value: Value = match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => return unreadable(&path, e),
        };

        if value.as_object().is_some_and(|obj| obj.is_empty()) {
            debug!("Session cache for {} is cleared", host);
            return CacheLookup::Miss;
        }

        match serde_json::from_value::<SessionRecord>(value) {
            Ok(record) => CacheLookup::Hit(record),
            Err(e) => unreadable(&path, e),
        }
    }

    fn save(&self, host: &str, record: &SessionRecord) -> AosResult<()> {
        let path = self.path_for(host);
        self.write(&path, &serde_json::to_string(record)?)?;
        debug!("Cached session for {} at {}", host, path.display());
        Ok(())
    }

    fn clear(&self, host: &str) -> AosResult<()> {
        let path = self.path_for(host);
        self.write(&path, "{}")?;
        debug!("Cleared session cache for {}", host);
        Ok(())
    }
}
