//! HTTP request handlers for the certificate API.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::Method;
use certmint_pki::{CertificateFieldBuilder, CertificateParams, SubjectInfo};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rand::Rng;
use tracing::{debug, error, info, warn};

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::mock::MockIdentifiers;
use crate::state::AppState;
use crate::types::{CertificateRequest, CertificateResponse, CertificateSummary, NftRecord};
use crate::validation::{authenticate, validate_request};

/// Validity period handed to the certificate field builder, in days.
pub const VALIDITY_PERIOD_DAYS: u32 = 365;

/// Handle POST /api/certificates - issue a mock certificate and NFT reference.
pub async fn issue_certificate(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<CertificateResponse>, ApiError> {
    let result = body
        .map_err(|e| ApiError::Internal(e.body_text()))
        .and_then(|bytes| {
            let request = CertificateRequest::from_json(&bytes)?;
            assemble_response(
                state.config(),
                state.builder(),
                &request,
                Utc::now(),
                &mut rand::thread_rng(),
            )
        });

    match &result {
        Err(ApiError::Internal(cause)) => {
            error!(error = %cause, "Error processing certificate request");
        }
        Err(ApiError::InvalidApiKey) => warn!("Rejected certificate request with invalid API key"),
        Err(ApiError::Validation(problems)) => {
            debug!(?problems, "Rejected invalid certificate request");
        }
        Err(ApiError::MethodNotAllowed) | Ok(_) => {}
    }

    result.map(Json)
}

/// Fallback for any method other than POST on the certificates route.
pub async fn method_not_allowed(method: Method) -> ApiError {
    debug!(%method, "Rejected non-POST certificate request");
    ApiError::MethodNotAllowed
}

/// Authenticates, validates and assembles the response for `request` as of
/// `now`, drawing mock identifiers from `rng`.
///
/// # Errors
///
/// - [`ApiError::InvalidApiKey`] if the key does not match; checked first.
/// - [`ApiError::Validation`] if a required field is missing or malformed.
/// - [`ApiError::Internal`] if the record cannot be serialized or the
///   validity end is out of range.
pub fn assemble_response<R: Rng + ?Sized>(
    config: &ServerConfig,
    builder: &CertificateFieldBuilder,
    request: &CertificateRequest,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<CertificateResponse, ApiError> {
    authenticate(request, &config.api_key)?;
    let validated = validate_request(request)?;

    let params = CertificateParams::new(
        SubjectInfo::new(validated.name, validated.dni),
        validated.public_key,
    )
    .with_validity_days(VALIDITY_PERIOD_DAYS);
    let fields = builder.build_at(&params, now);
    let pem_data = serde_json::to_string(&fields)?;

    let valid_to = add_calendar_year(now)?;
    let ids = MockIdentifiers::generate(rng);

    info!(
        token_id = %ids.token_id,
        serial_number = %ids.certificate_serial,
        provider = validated.provider,
        "Issued mock certificate"
    );

    Ok(CertificateResponse {
        nft: NftRecord {
            token_id: ids.token_id,
            contract_address: config.contract_address.clone(),
            transaction_hash: ids.transaction_hash,
        },
        certificate: CertificateSummary {
            serial_number: ids.certificate_serial,
            subject: validated.name.to_string(),
            issuer: config.certificate_issuer.clone(),
            valid_from: now,
            valid_to,
            pem_data,
        },
    })
}

/// Adds one calendar year. February 29 rolls over to March 1.
///
/// # Errors
///
/// Returns [`ApiError::Internal`] if the result is out of range.
pub fn add_calendar_year(instant: DateTime<Utc>) -> Result<DateTime<Utc>, ApiError> {
    let year = instant.year() + 1;
    instant
        .with_year(year)
        .or_else(|| {
            let march_first = NaiveDate::from_ymd_opt(year, 3, 1)?;
            Some(march_first.and_time(instant.time()).and_utc())
        })
        .ok_or_else(|| ApiError::Internal(format!("validity end out of range for {instant}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_BIND_ADDR, DEFAULT_CONTRACT_ADDRESS, SharedSecret};
    use crate::types::{BiometricProof, PersonalInfo};
    use certmint_pki::CertificateFields;
    use chrono::{TimeDelta, TimeZone};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const KEY: &str = "test_api_key_123";

    fn config() -> ServerConfig {
        ServerConfig::new(DEFAULT_BIND_ADDR, SharedSecret::new(KEY).unwrap())
    }

    fn request() -> CertificateRequest {
        CertificateRequest {
            api_key: Some(KEY.into()),
            personal_info: Some(PersonalInfo {
                name: Some("Juan Pérez".into()),
                dni: Some("20123456789".into()),
            }),
            biometric_proof: Some(BiometricProof {
                provider: Some("renaper".into()),
                verification_id: Some("ver-001".into()),
            }),
            public_key: Some("0x04abcdef".into()),
        }
    }

    fn assemble_at(request: &CertificateRequest, now: DateTime<Utc>) -> Result<CertificateResponse, ApiError> {
        assemble_response(
            &config(),
            &CertificateFieldBuilder::new(),
            request,
            now,
            &mut StdRng::seed_from_u64(1),
        )
    }

    #[test]
    fn valid_to_is_one_calendar_year_later() {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
        let response = assemble_at(&request(), now).unwrap();

        assert_eq!(response.certificate.valid_from, now);
        assert_eq!(
            response.certificate.valid_to,
            Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn leap_day_rolls_over_to_march() {
        let now = Utc.with_ymd_and_hms(2024, 2, 29, 8, 30, 0).unwrap();
        assert_eq!(
            add_calendar_year(now).unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 1, 8, 30, 0).unwrap()
        );
    }

    #[test]
    fn end_of_february_into_leap_year_keeps_date() {
        let now = Utc.with_ymd_and_hms(2027, 2, 28, 23, 59, 59).unwrap();
        assert_eq!(
            add_calendar_year(now).unwrap(),
            Utc.with_ymd_and_hms(2028, 2, 28, 23, 59, 59).unwrap()
        );
    }

    #[test]
    fn calendar_year_keeps_sub_second_precision() {
        let now = Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap() + TimeDelta::milliseconds(250);
        let next = add_calendar_year(now).unwrap();

        assert_eq!(next.timestamp_subsec_millis(), 250);
        assert_eq!((next.month(), next.day()), (3, 1));
    }

    #[test]
    fn calendar_year_out_of_range_is_internal() {
        assert!(matches!(
            add_calendar_year(DateTime::<Utc>::MAX_UTC),
            Err(ApiError::Internal(_))
        ));
    }

    #[test]
    fn builder_window_and_summary_window_diverge_across_leap_day() {
        // The summary counts calendar years, the field record counts 365 days.
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
        let response = assemble_at(&request(), now).unwrap();
        let fields: CertificateFields = serde_json::from_str(&response.certificate.pem_data).unwrap();

        assert_eq!(fields.validity.not_before, response.certificate.valid_from);
        assert_eq!(
            response.certificate.valid_to - fields.validity.not_after,
            TimeDelta::days(1)
        );
    }

    #[test]
    fn windows_agree_outside_leap_years() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let response = assemble_at(&request(), now).unwrap();
        let fields: CertificateFields = serde_json::from_str(&response.certificate.pem_data).unwrap();

        assert_eq!(fields.validity.not_after, response.certificate.valid_to);
    }

    #[test]
    fn pem_data_carries_builder_record() {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
        let response = assemble_at(&request(), now).unwrap();
        let fields: CertificateFields = serde_json::from_str(&response.certificate.pem_data).unwrap();

        assert_eq!(fields.subject.common_name, "Juan Pérez");
        assert_eq!(fields.subject.serial_number.as_deref(), Some("CUIT 20123456789"));
        assert_eq!(fields.subject.organization_name, None);
        assert_eq!(fields.public_key.value, "0x04abcdef");
        assert_eq!(fields.serial_number.len(), 32);
        assert_ne!(fields.serial_number, response.certificate.serial_number);
    }

    #[test]
    fn summary_uses_configured_metadata() {
        let response = assemble_at(&request(), Utc::now()).unwrap();

        assert_eq!(response.certificate.subject, "Juan Pérez");
        assert_eq!(response.certificate.issuer, "Digital Certificate Authority");
        assert_eq!(response.nft.contract_address, DEFAULT_CONTRACT_ADDRESS);
    }

    #[test]
    fn invalid_key_wins_over_validation() {
        let request = CertificateRequest {
            api_key: Some("wrong".into()),
            ..CertificateRequest::default()
        };

        assert_eq!(assemble_at(&request, Utc::now()), Err(ApiError::InvalidApiKey));
    }

    #[test]
    fn validation_runs_after_authentication() {
        let mut request = request();
        request.public_key = Some("abc".into());

        assert!(matches!(
            assemble_at(&request, Utc::now()),
            Err(ApiError::Validation(_))
        ));
    }
}
