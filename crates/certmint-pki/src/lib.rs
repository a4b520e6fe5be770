//! Mock certificate field construction for certmint.
//!
//! This crate turns a subject, a public key and a validity period into a
//! structured X.509-shaped record. Nothing is encoded to DER and nothing is
//! signed: the signature value is always empty.
//!
//! # Example
//!
//! ```
//! use certmint_pki::{generate_certificate_fields, CertificateParams, SubjectInfo};
//!
//! let params = CertificateParams::new(
//!     SubjectInfo::new("Juan Pérez", "20123456789"),
//!     "0x04a1b2c3",
//! )
//! .with_validity_days(365);
//!
//! let fields = generate_certificate_fields(&params);
//! assert_eq!(fields.subject.serial_number.as_deref(), Some("CUIT 20123456789"));
//! assert_eq!(fields.serial_number.len(), 32);
//! assert!(!fields.is_signed());
//! ```
//!
//! # Modules
//!
//! - [`builder`] - Field builder and serial number generation
//! - [`types`] - Record types and the fixed issuer profile
//! - [`timestamp`] - ISO-8601 timestamp rendering

#![forbid(unsafe_code)]

pub mod builder;
pub mod timestamp;
pub mod types;

pub use builder::{CertificateFieldBuilder, generate_certificate_fields, generate_serial_number};
pub use types::{
    BasicConstraints, CertificateFields, CertificateParams, CertificatePolicy, Extensions,
    IssuerName, IssuerProfile, KeyUsage, PublicKeyInfo, SignatureInfo, SubjectInfo, SubjectName,
    Validity,
};
