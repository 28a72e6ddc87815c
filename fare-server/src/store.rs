//! The process-wide handle to the loaded fare guide.
//!
//! Readers take a cheap snapshot (`Arc`) and query it without holding any
//! lock. Reloads parse the source off the async runtime and then swap the
//! snapshot in; they are serialized so two reloads never interleave.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use crate::guide::{self, GuideError, GuideSource, RouteGuide};

/// A loaded guide and when it was loaded.
#[derive(Debug)]
pub struct LoadedGuide {
    pub guide: RouteGuide,
    pub loaded_at: DateTime<Utc>,
}

/// Errors that can occur when reloading the guide.
#[derive(Debug, thiserror::Error)]
pub enum ReloadError {
    /// The source could not be loaded; the previous guide is kept
    #[error(transparent)]
    Guide(#[from] GuideError),

    /// The background load task did not complete
    #[error("reload task failed: {0}")]
    Task(String),
}

/// Shared, swappable fare guide.
#[derive(Clone)]
pub struct GuideStore {
    current: Arc<RwLock<Arc<LoadedGuide>>>,
    source: GuideSource,
    reload_lock: Arc<Mutex<()>>,
}

impl GuideStore {
    /// Load the guide from `source`.
    ///
    /// Meant for startup, before any request is served; fails if the
    /// source is missing or malformed.
    pub fn load(source: GuideSource) -> Result<Self, GuideError> {
        let guide = guide::load(&source)?;
        Ok(Self::from_guide(guide, source))
    }

    /// Wrap an already-built guide. `source` is used for later reloads.
    pub fn from_guide(guide: RouteGuide, source: GuideSource) -> Self {
        let loaded = LoadedGuide {
            guide,
            loaded_at: Utc::now(),
        };
        Self {
            current: Arc::new(RwLock::new(Arc::new(loaded))),
            source,
            reload_lock: Arc::new(Mutex::new(())),
        }
    }

    /// The guide currently in use.
    pub async fn current(&self) -> Arc<LoadedGuide> {
        self.current.read().await.clone()
    }

    pub fn source(&self) -> &GuideSource {
        &self.source
    }

    /// Re-read the source and replace the current guide.
    ///
    /// On failure the current guide stays in place and the error is
    /// returned.
    pub async fn reload(&self) -> Result<Arc<LoadedGuide>, ReloadError> {
        let _guard = self.reload_lock.lock().await;

        let source = self.source.clone();
        let result = tokio::task::spawn_blocking(move || guide::load(&source))
            .await
            .map_err(|e| ReloadError::Task(e.to_string()))?;

        let guide = match result {
            Ok(guide) => guide,
            Err(e) => {
                warn!(error = %e, "Fare guide reload failed, keeping previous guide");
                return Err(e.into());
            }
        };

        let loaded = Arc::new(LoadedGuide {
            guide,
            loaded_at: Utc::now(),
        });
        *self.current.write().await = loaded.clone();

        info!(
            districts = loaded.guide.len(),
            segments = loaded.guide.segment_count(),
            "Fare guide reloaded"
        );
        Ok(loaded)
    }
}
