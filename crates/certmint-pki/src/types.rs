//! Certificate field records and the fixed issuer profile.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// X.509 version written into every record.
pub const CERTIFICATE_VERSION: u8 = 3;

/// Country code for subjects and the default issuer.
pub const COUNTRY_AR: &str = "AR";

/// Default validity period in days.
pub const DEFAULT_VALIDITY_DAYS: u32 = 365;

/// Common name of the default issuer.
pub const ISSUER_COMMON_NAME: &str = "AC MODERNIZACIÓN-PFDR";

/// Organization of the default issuer.
pub const ISSUER_ORGANIZATION_NAME: &str = "Secretaría de Innovación Pública";

/// Public key algorithm label.
pub const PUBLIC_KEY_ALGORITHM: &str = "RSA-2048";

/// Signature algorithm label. The signature value itself is left empty.
pub const SIGNATURE_ALGORITHM: &str = "SHA256withRSA";

/// OID of the single certificate policy.
pub const POLICY_IDENTIFIER: &str = "2.16.32.1.1.0";

/// Qualifier URL of the single certificate policy.
pub const POLICY_QUALIFIER_URL: &str =
    "https://pki.jgm.gov.ar/docs/pdf/Politica_Unica_de_Certificacion_v2.0.pdf";

/// Key usage purposes recorded in the extensions block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KeyUsage {
    /// Digital signatures other than certificate or CRL signing.
    DigitalSignature,
    /// Content commitment.
    NonRepudiation,
    /// Key transport.
    KeyEncipherment,
}

/// Identity of the certificate holder, as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectInfo {
    /// Holder's full name.
    pub common_name: String,
    /// National document number (DNI/CUIT), opaque.
    pub document_number: String,
    /// Legal entity, if any.
    pub organization_name: Option<String>,
}

impl SubjectInfo {
    /// Creates a subject with no organization.
    #[must_use]
    pub fn new(common_name: impl Into<String>, document_number: impl Into<String>) -> Self {
        Self {
            common_name: common_name.into(),
            document_number: document_number.into(),
            organization_name: None,
        }
    }

    /// Sets the organization name.
    #[must_use]
    pub fn with_organization(mut self, organization_name: impl Into<String>) -> Self {
        self.organization_name = Some(organization_name.into());
        self
    }
}

/// Input to the certificate field builder.
///
/// The builder trusts these values as given. Presence and format checks belong
/// to whoever collects them from the outside world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateParams {
    /// Certificate holder.
    pub subject: SubjectInfo,
    /// Public key, passed through verbatim.
    pub public_key: String,
    /// Validity period in days.
    pub validity_period_days: u32,
}

impl CertificateParams {
    /// Creates parameters with the default validity period.
    #[must_use]
    pub fn new(subject: SubjectInfo, public_key: impl Into<String>) -> Self {
        Self {
            subject,
            public_key: public_key.into(),
            validity_period_days: DEFAULT_VALIDITY_DAYS,
        }
    }

    /// Sets the validity period in days.
    #[must_use]
    pub const fn with_validity_days(mut self, days: u32) -> Self {
        self.validity_period_days = days;
        self
    }
}

/// Subject distinguished name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectName {
    /// Holder's name.
    pub common_name: String,
    /// Tax identifier, formatted `CUIT <number>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    /// Legal entity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    /// Department or division.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizational_unit_name: Option<String>,
    /// ISO country code.
    pub country_name: String,
}

/// Issuer distinguished name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuerName {
    /// Issuing CA name.
    pub common_name: String,
    /// Issuing organization.
    pub organization_name: String,
    /// ISO country code.
    pub country_name: String,
}

/// Validity window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Validity {
    /// Start of validity.
    #[serde(with = "crate::timestamp")]
    pub not_before: DateTime<Utc>,
    /// End of validity.
    #[serde(with = "crate::timestamp")]
    pub not_after: DateTime<Utc>,
}

impl Validity {
    /// Length of the window.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.not_after - self.not_before
    }
}

/// Public key block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKeyInfo {
    /// Algorithm label.
    pub algorithm: String,
    /// Key material as supplied.
    pub value: String,
}

/// Basic constraints extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicConstraints {
    /// Whether the subject is a CA.
    #[serde(rename = "isCA")]
    pub is_ca: bool,
    /// Maximum intermediate chain depth.
    #[serde(
        rename = "pathLengthConstraint",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub path_length_constraint: Option<u8>,
}

/// A certificate policy with its qualifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificatePolicy {
    /// Policy OID.
    pub policy_identifier: String,
    /// Qualifier URLs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub policy_qualifiers: Vec<String>,
}

impl CertificatePolicy {
    /// The single national policy every certmint record carries.
    #[must_use]
    pub fn national() -> Self {
        Self {
            policy_identifier: POLICY_IDENTIFIER.to_string(),
            policy_qualifiers: vec![POLICY_QUALIFIER_URL.to_string()],
        }
    }
}

/// Extensions block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extensions {
    /// Permitted key usages.
    pub key_usage: Vec<KeyUsage>,
    /// Basic constraints.
    pub basic_constraints: BasicConstraints,
    /// Authority key identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authority_key_identifier: Option<String>,
    /// Subject key identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_key_identifier: Option<String>,
    /// Certificate policies.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub certificate_policies: Vec<CertificatePolicy>,
}

/// Signature block. `value` stays empty: nothing is ever signed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureInfo {
    /// Algorithm label.
    pub algorithm: String,
    /// Signature bytes, always empty.
    pub value: String,
}

/// The full certificate field record produced by the builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateFields {
    /// X.509 version.
    pub version: u8,
    /// 32 lowercase hex characters.
    pub serial_number: String,
    /// Holder.
    pub subject: SubjectName,
    /// Issuer.
    pub issuer: IssuerName,
    /// Validity window.
    pub validity: Validity,
    /// Public key.
    pub public_key: PublicKeyInfo,
    /// Extensions.
    pub extensions: Extensions,
    /// Signature placeholder.
    pub signature: SignatureInfo,
}

impl CertificateFields {
    /// Returns true if the signature value has been filled in.
    #[must_use]
    pub fn is_signed(&self) -> bool {
        !self.signature.value.is_empty()
    }
}

/// Fixed issuer, extension and policy metadata applied to every record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuerProfile {
    /// Issuer name.
    pub issuer: IssuerName,
    /// Country written into the subject.
    pub subject_country: String,
    /// Public key algorithm label.
    pub public_key_algorithm: String,
    /// Signature algorithm label.
    pub signature_algorithm: String,
    /// Key usages.
    pub key_usage: Vec<KeyUsage>,
    /// Certificate policies.
    pub certificate_policies: Vec<CertificatePolicy>,
}

impl Default for IssuerProfile {
    fn default() -> Self {
        Self {
            issuer: IssuerName {
                common_name: ISSUER_COMMON_NAME.to_string(),
                organization_name: ISSUER_ORGANIZATION_NAME.to_string(),
                country_name: COUNTRY_AR.to_string(),
            },
            subject_country: COUNTRY_AR.to_string(),
            public_key_algorithm: PUBLIC_KEY_ALGORITHM.to_string(),
            signature_algorithm: SIGNATURE_ALGORITHM.to_string(),
            key_usage: vec![
                KeyUsage::DigitalSignature,
                KeyUsage::NonRepudiation,
                KeyUsage::KeyEncipherment,
            ],
            certificate_policies: vec![CertificatePolicy::national()],
        }
    }
}
