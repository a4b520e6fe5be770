//! Server configuration.

use std::fmt;
use std::net::SocketAddr;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{ServerError, ServerResult};

/// Default bind address.
pub const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::new(std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED), 8080);

/// Contract address reported in every NFT record unless overridden.
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0x1234567890abcdef1234567890abcdef12345678";

/// Issuer display name reported in every certificate summary unless overridden.
pub const DEFAULT_CERTIFICATE_ISSUER: &str = "Digital Certificate Authority";

/// The static API key callers must present.
///
/// This is a placeholder gate for a demo service, not an access-control
/// system: one secret, compared for exact equality.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret {
    secret: String,
}

impl SharedSecret {
    /// Wraps a secret.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Config`] if the secret is empty or only
    /// whitespace, since an absent `apiKey` must never authenticate.
    pub fn new(secret: impl Into<String>) -> ServerResult<Self> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(ServerError::Config("api key must not be empty".into()));
        }
        Ok(Self { secret })
    }

    /// Returns true if `candidate` equals the secret exactly.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        use subtle::ConstantTimeEq;
        self.secret.as_bytes().ct_eq(candidate.as_bytes()).into()
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedSecret")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Configuration for the certificate API server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP server to.
    pub bind_addr: SocketAddr,
    /// Shared secret expected in `apiKey`.
    pub api_key: SharedSecret,
    /// Contract address reported in NFT records.
    pub contract_address: String,
    /// Issuer display name reported in certificate summaries.
    pub certificate_issuer: String,
    /// CORS allowed origins. Empty disables CORS.
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    /// Create a configuration with default metadata.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, api_key: SharedSecret) -> Self {
        Self {
            bind_addr,
            api_key,
            contract_address: DEFAULT_CONTRACT_ADDRESS.to_string(),
            certificate_issuer: DEFAULT_CERTIFICATE_ISSUER.to_string(),
            cors_origins: Vec::new(),
        }
    }

    /// Set the contract address.
    #[must_use]
    pub fn with_contract_address(mut self, address: impl Into<String>) -> Self {
        self.contract_address = address.into();
        self
    }

    /// Set the issuer display name.
    #[must_use]
    pub fn with_certificate_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.certificate_issuer = issuer.into();
        self
    }

    /// Add a CORS allowed origin.
    #[must_use]
    pub fn with_cors_origin(mut self, origin: impl Into<String>) -> Self {
        self.cors_origins.push(origin.into());
        self
    }
}
