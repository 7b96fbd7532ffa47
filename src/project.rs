//! Project directory handle.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Project file name inside the project directory.
pub const PROJECT_FILE: &str = "ionic.config.json";

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Failed to read project file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse project file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Contents of the project file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectFile {
    pub name: String,
    #[serde(default)]
    pub app_id: String,
}

#[derive(Debug, Clone)]
pub struct Project {
    directory: PathBuf,
}

impl Project {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn file_path(&self) -> PathBuf {
        self.directory.join(PROJECT_FILE)
    }

    pub fn exists(&self) -> bool {
        self.file_path().is_file()
    }

    pub async fn load(&self) -> Result<ProjectFile, ProjectError> {
        let path = self.file_path();
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| ProjectError::Read {
                path: path.clone(),
                source: e,
            })?;
        serde_json::from_str(&content).map_err(|e| ProjectError::Parse { path, source: e })
    }
}
