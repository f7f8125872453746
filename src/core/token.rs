//! Credential token encoding and decoding.
//!
//! Tokens are JWT-shaped (`header.payload.signature`) but are never verified:
//! the payload is decoded and its expiry checked against the caller's clock.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Serialize;

use crate::models::{CredentialToken, TokenClaims, TokenError};

/// Third segment of tokens issued without a real signer.
pub const PLACEHOLDER_SIGNATURE: &str = "mock_signature";

const SEGMENT_KEY: &[u8] = b"fleet-console-unverified";

fn unsigned<T: Serialize>(payload: &T) -> Result<CredentialToken, TokenError> {
    let signed = encode(&Header::default(), payload, &EncodingKey::from_secret(SEGMENT_KEY))
        .map_err(|e| TokenError::Encoding(e.to_string()))?;
    let (header_and_payload, _) = signed
        .rsplit_once('.')
        .ok_or_else(|| TokenError::Encoding("missing signature segment".to_string()))?;
    Ok(CredentialToken::new(format!(
        "{}.{}",
        header_and_payload, PLACEHOLDER_SIGNATURE
    )))
}

/// Builds an `HS256`-headed token carrying `claims` and the placeholder signature.
pub fn issue_unsigned(claims: &TokenClaims) -> Result<CredentialToken, TokenError> {
    unsigned(claims)
}

/// Decodes the payload without looking at the signature or the expiry.
pub fn decode_claims(token: &str) -> Result<TokenClaims, TokenError> {
    if token.split('.').count() != 3 {
        return Err(TokenError::Malformed(
            "expected header.payload.signature".to_string(),
        ));
    }
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<TokenClaims>(token, &DecodingKey::from_secret(SEGMENT_KEY), &validation)?;
    Ok(data.claims)
}

/// A token whose `exp` equals `now` is already expired.
pub fn check_expiry(claims: &TokenClaims, now: DateTime<Utc>) -> Result<DateTime<Utc>, TokenError> {
    let expires_at = DateTime::from_timestamp(claims.exp, 0)
        .ok_or_else(|| TokenError::Malformed(format!("exp {} is out of range", claims.exp)))?;
    if expires_at <= now {
        return Err(TokenError::Expired(expires_at));
    }
    Ok(expires_at)
}

/// Decodes `token` and rejects it if it has expired at `now`.
pub fn decode_current(
    token: &str,
    now: DateTime<Utc>,
) -> Result<(TokenClaims, DateTime<Utc>), TokenError> {
    let claims = decode_claims(token)?;
    let expires_at = check_expiry(&claims, now)?;
    Ok((claims, expires_at))
}
