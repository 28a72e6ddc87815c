//! Application state for the web layer.

use std::sync::Arc;

use crate::resolver::ResolverConfig;
use crate::store::GuideStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The loaded fare guide
    pub guides: GuideStore,

    /// Fare resolution settings
    pub config: Arc<ResolverConfig>,
}

impl AppState {
    pub fn new(guides: GuideStore, config: ResolverConfig) -> Self {
        Self {
            guides,
            config: Arc::new(config),
        }
    }
}
