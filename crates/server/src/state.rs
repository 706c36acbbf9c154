use std::sync::Arc;
use shelf_core::{Config, MediaLibrary, SanitizedConfig, SearchTransport};

/// Shared application state
pub struct AppState {
    config: Config,
    library: MediaLibrary,
    transport: Option<Arc<dyn SearchTransport>>,
}

impl AppState {
    pub fn new(
        config: Config,
        library: MediaLibrary,
        transport: Option<Arc<dyn SearchTransport>>,
    ) -> Self {
        Self {
            config,
            library,
            transport,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn library(&self) -> &MediaLibrary {
        &self.library
    }

    /// The search transport, if one is configured.
    pub fn transport(&self) -> Option<&Arc<dyn SearchTransport>> {
        self.transport.as_ref()
    }

    /// Session token forwarded with every search call.
    pub fn token(&self) -> Option<&str> {
        self.config
            .webshare
            .as_ref()
            .and_then(|w| w.token.as_deref())
            .filter(|t| !t.is_empty())
    }
}
