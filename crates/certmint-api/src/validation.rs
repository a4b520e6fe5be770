//! Authentication and presence checks for certificate requests.
//!
//! This is the only place request contents are checked. The certificate field
//! builder accepts whatever it is handed.

use crate::config::SharedSecret;
use crate::error::ApiError;
use crate::types::CertificateRequest;

/// Required prefix for `publicKey`.
pub const PUBLIC_KEY_PREFIX: &str = "0x";

/// A request whose required fields are all present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedRequest<'a> {
    /// `personalInfo.name`.
    pub name: &'a str,
    /// `personalInfo.dni`.
    pub dni: &'a str,
    /// `biometricProof.provider`.
    pub provider: &'a str,
    /// `biometricProof.verificationId`.
    pub verification_id: &'a str,
    /// `publicKey`.
    pub public_key: &'a str,
}

/// Checks `apiKey` against the shared secret.
///
/// # Errors
///
/// Returns [`ApiError::InvalidApiKey`] if the key is absent or differs.
pub fn authenticate(request: &CertificateRequest, secret: &SharedSecret) -> Result<(), ApiError> {
    match request.api_key.as_deref() {
        Some(key) if secret.matches(key) => Ok(()),
        _ => Err(ApiError::InvalidApiKey),
    }
}

/// Checks that every required field is non-empty and the public key carries
/// the `0x` prefix.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] listing every failing field.
pub fn validate_request(request: &CertificateRequest) -> Result<ValidatedRequest<'_>, ApiError> {
    let mut problems = Vec::new();

    let personal = request.personal_info.as_ref();
    let biometric = request.biometric_proof.as_ref();

    let name = required(
        personal.and_then(|p| p.name.as_deref()),
        "personalInfo.name",
        &mut problems,
    );
    let dni = required(
        personal.and_then(|p| p.dni.as_deref()),
        "personalInfo.dni",
        &mut problems,
    );
    let provider = required(
        biometric.and_then(|b| b.provider.as_deref()),
        "biometricProof.provider",
        &mut problems,
    );
    let verification_id = required(
        biometric.and_then(|b| b.verification_id.as_deref()),
        "biometricProof.verificationId",
        &mut problems,
    );

    let public_key = request.public_key.as_deref().unwrap_or_default();
    if public_key.is_empty() {
        problems.push("publicKey is required".to_string());
    } else if !public_key.starts_with(PUBLIC_KEY_PREFIX) {
        problems.push(format!("publicKey must start with {PUBLIC_KEY_PREFIX}"));
    }

    if !problems.is_empty() {
        return Err(ApiError::Validation(problems));
    }

    Ok(ValidatedRequest {
        name,
        dni,
        provider,
        verification_id,
        public_key,
    })
}

fn required<'a>(value: Option<&'a str>, field: &str, problems: &mut Vec<String>) -> &'a str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => {
            problems.push(format!("{field} is required"));
            ""
        }
    }
}
