//! Application state shared across handlers.

use std::sync::Arc;

use fieldhand_baselinker::BaselinkerClient;

use crate::config::WebConfig;

/// Application state shared across all handlers.
///
/// Holds the loaded configuration and the one BaseLinker client every
/// request goes through. There is no other state; the vendor is the source
/// of truth on every page load.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: WebConfig,
    client: BaselinkerClient,
}

impl AppState {
    /// Build state from loaded configuration.
    #[must_use]
    pub fn new(config: WebConfig) -> Self {
        let client = BaselinkerClient::new(&config.baselinker);
        Self {
            inner: Arc::new(AppStateInner { config, client }),
        }
    }

    /// The loaded configuration.
    #[must_use]
    pub fn config(&self) -> &WebConfig {
        &self.inner.config
    }

    /// The shared BaseLinker client.
    #[must_use]
    pub fn client(&self) -> &BaselinkerClient {
        &self.inner.client
    }
}
