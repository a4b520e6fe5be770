//! Request and response bodies.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of `POST /api/certificates`.
///
/// Every field is optional at the parsing stage so that a missing field is
/// reported as a validation problem rather than a parse failure. A field of
/// the wrong JSON type reads as absent.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRequest {
    /// Shared secret.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Holder identity.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub personal_info: Option<PersonalInfo>,
    /// Reference to an external biometric check. Only presence is checked.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub biometric_proof: Option<BiometricProof>,
    /// Holder public key, `0x`-prefixed.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
}

impl CertificateRequest {
    /// Parses a request body.
    ///
    /// Only invalid JSON is an error. Any JSON value other than an object
    /// parses as a request with every field absent.
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        match serde_json::from_slice(bytes)? {
            value @ Value::Object(_) => serde_json::from_value(value),
            _ => Ok(Self::default()),
        }
    }
}

/// Reads a field as `None` when its value does not fit `T`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl fmt::Debug for CertificateRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CertificateRequest")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("personal_info", &self.personal_info)
            .field("biometric_proof", &self.biometric_proof)
            .field("public_key", &self.public_key)
            .finish()
    }
}

/// Holder identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    /// Full name.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// National document number.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub dni: Option<String>,
}

/// Biometric verification reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiometricProof {
    /// Verification provider.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Provider-side verification id.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub verification_id: Option<String>,
}

/// Successful response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateResponse {
    /// Mock token reference.
    pub nft: NftRecord,
    /// Certificate summary.
    pub certificate: CertificateSummary,
}

/// Mock on-chain token reference. Nothing is minted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftRecord {
    /// Decimal token id in `[0, 10000)`.
    pub token_id: String,
    /// Configured contract address.
    pub contract_address: String,
    /// `0x` followed by 64 hex characters.
    pub transaction_hash: String,
}

/// Certificate summary returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateSummary {
    /// Six uppercase alphanumeric characters.
    pub serial_number: String,
    /// The caller's `personalInfo.name`, unchanged.
    pub subject: String,
    /// Configured issuer display name.
    pub issuer: String,
    /// Start of validity.
    #[serde(with = "certmint_pki::timestamp")]
    pub valid_from: DateTime<Utc>,
    /// One calendar year after `valid_from`.
    #[serde(with = "certmint_pki::timestamp")]
    pub valid_to: DateTime<Utc>,
    /// JSON rendering of the certificate field record. Not PEM.
    pub pem_data: String,
}

/// Error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error code, e.g. `VALIDATION_ERROR`.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Extra detail lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}
