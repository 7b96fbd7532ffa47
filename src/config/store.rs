//! Shared configuration handle with async load/save.
//!
//! One store is created per invocation. It is loaded before any collaborator
//! that depends on it is built, and saved as the last step of the run.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use fs2::FileExt;
use parking_lot::RwLock;

use crate::config::loader::ConfigError;
use crate::config::types::Config;

/// Thread-safe config container with interior mutability.
#[derive(Clone)]
pub struct ConfigStore {
    inner: Arc<RwLock<Config>>,
    path: PathBuf,
}

impl ConfigStore {
    /// Create a store holding `config`, persisted at `path`.
    pub fn new(config: Config, path: PathBuf) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
            path,
        }
    }

    /// Create a store with default values at the path selected by `env`.
    pub fn from_env(env: &HashMap<String, String>) -> Self {
        Self::new(Config::default(), Config::config_path(env))
    }

    /// Get a clone of the current config.
    pub fn get(&self) -> Config {
        self.inner.read().clone()
    }

    /// Mutate the in-memory config. Persisted on the next `save`.
    pub fn update<R>(&self, f: impl FnOnce(&mut Config) -> R) -> R {
        let mut guard = self.inner.write();
        f(&mut *guard)
    }

    /// Get the config file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the config file, replacing the in-memory value.
    ///
    /// A missing file loads defaults. On failure the current value is kept.
    pub async fn load(&self) -> Result<Config, ConfigError> {
        let config = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Config::parse(&content, &self.path)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Config::default(),
            Err(e) => {
                return Err(ConfigError::ReadError {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        *self.inner.write() = config.clone();
        tracing::debug!(path = %self.path.display(), "Config loaded");
        Ok(config)
    }

    /// Write the current config to disk.
    ///
    /// Holds an exclusive lock on a sidecar lock file while writing a temp
    /// file and renaming it over the config.
    pub async fn save(&self) -> Result<(), ConfigError> {
        let content = self.get().to_toml()?;
        let path = self.path.clone();

        let written = tokio::task::spawn_blocking({
            let path = path.clone();
            move || write_locked(&path, &content)
        })
        .await
        .map_err(|e| ConfigError::WriteError {
            path: path.clone(),
            source: std::io::Error::other(e),
        })?;

        written.map_err(|e| ConfigError::WriteError {
            path: path.clone(),
            source: e,
        })?;

        tracing::debug!(path = %path.display(), "Config saved");
        Ok(())
    }
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("path", &self.path)
            .finish()
    }
}

fn write_locked(path: &Path, content: &str) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "config.toml".to_string());

    let lock = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(dir.join(format!(".{}.lock", file_name)))?;
    lock.lock_exclusive()?;

    let tmp = dir.join(format!(".{}.tmp", file_name));
    let result = (|| {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp, path)
    })();

    // Also released when `lock` is dropped
    let _ = FileExt::unlock(&lock);
    result
}
