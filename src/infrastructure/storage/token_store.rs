//! Persistent session storage
//!
//! The backend issues an opaque bearer token on login; the client keeps it,
//! together with the username it was issued for, in a single JSON file under
//! the user's home directory. This file is the only state the client
//! persists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::core::error::AppError;
use crate::core::result::AppResult;
use crate::core::types::{AuthToken, Username};

/// Default directory name under the home directory
const DEFAULT_DIR: &str = ".sky366";

/// Default session file name
const DEFAULT_FILE: &str = "session.json";

/// Persisted session payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    /// Bearer token issued on login
    pub token: AuthToken,
    /// Username the token was issued for
    pub username: Username,
    /// When the session was stored
    pub saved_at: DateTime<Utc>,
}

/// File-backed store for the session token
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Create a store at an explicit path
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a store at the default location, honoring a configured
    /// override when present
    pub fn from_config(configured: Option<&Path>) -> Self {
        if let Some(path) = configured {
            return Self::new(path);
        }

        let base = std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join(DEFAULT_DIR).join(DEFAULT_FILE))
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored session, if any
    ///
    /// A missing file is not an error; a corrupt file is treated as no
    /// session and removed so the next login starts clean.
    pub async fn load(&self) -> AppResult<Option<StoredSession>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AppError::Storage {
                    message: format!("Failed to read session file: {e}"),
                    path: Some(self.path.display().to_string()),
                    source: None,
                })
            }
        };

        match serde_json::from_str::<StoredSession>(&content) {
            Ok(session) => {
                debug!("🔑 Loaded stored session for {}", session.username);
                Ok(Some(session))
            }
            Err(e) => {
                warn!("⚠️  Session file is corrupt, discarding it: {}", e);
                self.clear().await?;
                Ok(None)
            }
        }
    }

    /// Persist a session, replacing any previous one
    ///
    /// Written to a sibling temp file and renamed so a crash mid-write
    /// cannot leave a truncated session behind.
    pub async fn save(&self, session: &StoredSession) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Storage {
                    message: format!("Failed to create session directory: {e}"),
                    path: Some(parent.display().to_string()),
                    source: None,
                })?;
        }

        let payload = serde_json::to_string_pretty(session)?;
        let tmp_path = self.path.with_extension("json.tmp");

        tokio::fs::write(&tmp_path, payload.as_bytes())
            .await
            .map_err(|e| AppError::Storage {
                message: format!("Failed to write session file: {e}"),
                path: Some(tmp_path.display().to_string()),
                source: None,
            })?;

        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| AppError::Storage {
                message: format!("Failed to replace session file: {e}"),
                path: Some(self.path.display().to_string()),
                source: None,
            })?;

        debug!("💾 Session stored for {}", session.username);
        Ok(())
    }

    /// Remove the stored session, if any
    pub async fn clear(&self) -> AppResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!("🗑️  Stored session removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Storage {
                message: format!("Failed to remove session file: {e}"),
                path: Some(self.path.display().to_string()),
                source: None,
            }),
        }
    }
}
