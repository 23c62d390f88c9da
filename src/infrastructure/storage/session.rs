//! Session context shared across services
//!
//! One session object owns the authenticated state for the whole process:
//! the cached token, the username it belongs to, and the backing store.
//! Services receive an `Arc<SessionContext>` instead of reaching into
//! ambient storage, and eviction happens in exactly one place.

use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use super::token_store::{StoredSession, TokenStore};
use crate::core::error::AppError;
use crate::core::result::AppResult;
use crate::core::types::{AuthToken, Username};

/// Shared authenticated-session state
#[derive(Debug)]
pub struct SessionContext {
    store: TokenStore,
    current: RwLock<Option<StoredSession>>,
}

impl SessionContext {
    /// Open the context, loading any previously stored session
    pub async fn open(store: TokenStore) -> AppResult<Arc<Self>> {
        let current = store.load().await?;
        if let Some(ref session) = current {
            info!("🔑 Resuming session for {}", session.username);
        }

        Ok(Arc::new(Self {
            store,
            current: RwLock::new(current),
        }))
    }

    /// Check whether a session is currently held
    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Username of the current session
    pub async fn username(&self) -> AppResult<Username> {
        self.current
            .read()
            .await
            .as_ref()
            .map(|s| s.username.clone())
            .ok_or_else(|| AppError::auth("Not logged in"))
    }

    /// Bearer token of the current session
    pub async fn token(&self) -> AppResult<AuthToken> {
        self.current
            .read()
            .await
            .as_ref()
            .map(|s| s.token.clone())
            .ok_or_else(|| AppError::auth("Not logged in"))
    }

    /// Establish a new session after a successful login
    #[instrument(skip(self, token))]
    pub async fn establish(&self, token: AuthToken, username: Username) -> AppResult<()> {
        let session = StoredSession {
            token,
            username: username.clone(),
            saved_at: Utc::now(),
        };

        self.store.save(&session).await?;
        *self.current.write().await = Some(session);

        info!("✅ Session established for {}", username);
        Ok(())
    }

    /// Evict the session after the backend rejected the token
    ///
    /// Idempotent; safe to call from every failure path.
    pub async fn evict(&self) -> AppResult<()> {
        let had_session = {
            let mut guard = self.current.write().await;
            guard.take().is_some()
        };

        self.store.clear().await?;
        if had_session {
            warn!("🚪 Session evicted, login required");
        }
        Ok(())
    }
}
