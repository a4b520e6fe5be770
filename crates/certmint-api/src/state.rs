//! Shared, read-only state for request handlers.

use certmint_pki::CertificateFieldBuilder;

use crate::config::ServerConfig;

/// State handed to every handler. Immutable once the server starts.
#[derive(Debug)]
pub struct AppState {
    config: ServerConfig,
    builder: CertificateFieldBuilder,
}

impl AppState {
    /// Create state with the default issuer profile.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            builder: CertificateFieldBuilder::new(),
        }
    }

    /// Server configuration.
    #[must_use]
    pub const fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Certificate field builder.
    #[must_use]
    pub const fn builder(&self) -> &CertificateFieldBuilder {
        &self.builder
    }
}
