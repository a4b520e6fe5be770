//! # certmint-api
//!
//! HTTP API that issues mock digital certificates alongside mock NFT
//! references, built on the axum HTTP framework.
//!
//! Nothing here is real PKI or a real ledger: the certificate record is never
//! signed, the `pemData` field is a JSON rendering of the field record, and
//! the token id, transaction hash and contract address are placeholders.
//!
//! ## Example
//!
//! ```rust,no_run
//! use certmint_api::{CertificateServer, ServerConfig, SharedSecret};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let addr = "127.0.0.1:8080".parse()?;
//!     let config = ServerConfig::new(addr, SharedSecret::new("change-me")?);
//!
//!     CertificateServer::new(config).serve(addr).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Endpoint | Method | Description |
//! |----------|--------|-------------|
//! | `/api/certificates` | POST | Issue a mock certificate and NFT reference |
//!
//! ## Errors
//!
//! | Code | Status | Cause |
//! |------|--------|-------|
//! | `METHOD_NOT_ALLOWED` | 405 | Any method other than POST |
//! | `INVALID_API_KEY` | 401 | `apiKey` does not match the shared secret |
//! | `VALIDATION_ERROR` | 400 | Missing field or `publicKey` without `0x` |
//! | `INTERNAL_ERROR` | 500 | Unparseable body or other unexpected failure |

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod mock;
pub mod routes;
pub mod server;
pub mod state;
pub mod types;
pub mod validation;

// Re-export main types
pub use config::{ServerConfig, SharedSecret};
pub use error::{ApiError, ServerError, ServerResult};
pub use routes::{CERTIFICATES_PATH, create_router};
pub use server::CertificateServer;
pub use state::AppState;
pub use types::{CertificateRequest, CertificateResponse, CertificateSummary, ErrorBody, NftRecord};
