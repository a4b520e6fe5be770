//! Certificate field builder.
//!
//! Maps a subject, a public key and a validity period onto a
//! [`CertificateFields`] record. The issuer, extensions and policy come from an
//! [`IssuerProfile`]; the serial number is drawn from the OS random source.
//!
//! The builder does not validate its input. Callers are expected to have
//! checked presence and format before getting here, and must not rely on the
//! builder to reject anything.

use chrono::{DateTime, TimeDelta, Utc};
use rand::RngCore;
use rand::rngs::OsRng;

use crate::types::{
    BasicConstraints, CERTIFICATE_VERSION, CertificateFields, CertificateParams, Extensions,
    IssuerProfile, PublicKeyInfo, SignatureInfo, SubjectName, Validity,
};

/// Number of random bytes behind a serial number (32 hex characters).
pub const SERIAL_NUMBER_BYTES: usize = 16;

/// Builds certificate field records against a fixed issuer profile.
#[derive(Debug, Clone, Default)]
pub struct CertificateFieldBuilder {
    profile: IssuerProfile,
}

impl CertificateFieldBuilder {
    /// Creates a builder with the default issuer profile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record valid from now.
    #[must_use]
    pub fn build(&self, params: &CertificateParams) -> CertificateFields {
        self.build_at(params, Utc::now())
    }

    /// Builds a record valid from `now`.
    ///
    /// The window is `validity_period_days` fixed 24-hour days long, so it does
    /// not track calendar years across a leap day. The end saturates at the
    /// largest representable instant.
    #[must_use]
    pub fn build_at(&self, params: &CertificateParams, now: DateTime<Utc>) -> CertificateFields {
        let not_after = now
            .checked_add_signed(TimeDelta::days(i64::from(params.validity_period_days)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        CertificateFields {
            version: CERTIFICATE_VERSION,
            serial_number: generate_serial_number(),
            subject: SubjectName {
                common_name: params.subject.common_name.clone(),
                serial_number: Some(format!("CUIT {}", params.subject.document_number)),
                organization_name: params.subject.organization_name.clone(),
                organizational_unit_name: None,
                country_name: self.profile.subject_country.clone(),
            },
            issuer: self.profile.issuer.clone(),
            validity: Validity {
                not_before: now,
                not_after,
            },
            public_key: PublicKeyInfo {
                algorithm: self.profile.public_key_algorithm.clone(),
                value: params.public_key.clone(),
            },
            extensions: Extensions {
                key_usage: self.profile.key_usage.clone(),
                basic_constraints: BasicConstraints {
                    is_ca: false,
                    path_length_constraint: None,
                },
                authority_key_identifier: None,
                subject_key_identifier: None,
                certificate_policies: self.profile.certificate_policies.clone(),
            },
            signature: SignatureInfo {
                algorithm: self.profile.signature_algorithm.clone(),
                value: String::new(),
            },
        }
    }
}

/// Builds a record with the default issuer profile, valid from now.
#[must_use]
pub fn generate_certificate_fields(params: &CertificateParams) -> CertificateFields {
    CertificateFieldBuilder::new().build(params)
}

/// Generates a 32-character lowercase hex serial number.
///
/// Reads straight from `OsRng`; unlike the mock identifiers handed back to API
/// callers, this value is meant to be unpredictable.
#[must_use]
pub fn generate_serial_number() -> String {
    let mut bytes = [0u8; SERIAL_NUMBER_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
