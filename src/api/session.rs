use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::ServiceError;

/// Session state the CLI keeps between invocations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    #[serde(default)]
    pub cookies: Vec<String>,
    pub saved_at: DateTime<Utc>,
    /// End of a login lockout imposed by the backend, if one is running.
    #[serde(default)]
    pub locked_until: Option<DateTime<Utc>>,
}

impl StoredSession {
    pub fn new(cookies: Vec<String>) -> Self {
        Self {
            cookies,
            saved_at: Utc::now(),
            locked_until: None,
        }
    }
}

/// JSON file holding a [`StoredSession`].
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<StoredSession>, ServiceError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.path)?;
        let session = serde_json::from_str(&data)?;
        debug!(path = %self.path.display(), "loaded session");
        Ok(Some(session))
    }

    pub fn save(&self, session: &StoredSession) -> Result<(), ServiceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(session)?)?;
        debug!(path = %self.path.display(), "saved session");
        Ok(())
    }

    pub fn clear(&self) -> Result<(), ServiceError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
