use std::time::Duration;

use serde::Deserialize;

use crate::domain::{Password, Username};
use crate::transport::TransportError;

/// Validity the router means when it omits the `expires` field. Matches the
/// firmware's session lifetime of 299 seconds.
const DEFAULT_VALIDITY: Duration = Duration::from_secs(299);

#[derive(Debug, Clone, PartialEq, Eq)]
/// Token and validity extracted from a login response.
pub struct LoginOutcome {
    pub token: String,
    pub valid_for: Duration,
}

#[derive(Debug, Clone, Deserialize)]
struct LoginJsonResponse {
    #[serde(default)]
    data: Option<LoginJsonData>,
    // Older firmware returns the token at the top level.
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    expires: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
struct LoginJsonData {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    expires: Option<u64>,
}

pub fn encode_login_body(username: &Username, password: &Password) -> serde_json::Value {
    serde_json::json!({
        (Username::FIELD): username.as_str(),
        (Password::FIELD): password.as_str(),
    })
}

/// Decode a login response, tolerating both the `{"data": {...}}` envelope of
/// current firmware and the flat layout of older firmware.
pub fn decode_login_response(json: &str) -> Result<LoginOutcome, TransportError> {
    let parsed: LoginJsonResponse = serde_json::from_str(json)?;

    let (token, expires) = match parsed.data {
        Some(data) if data.token.is_some() => (data.token, data.expires),
        _ => (parsed.token, parsed.expires),
    };

    let token = token.ok_or(TransportError::MissingToken)?;
    let valid_for = expires.map_or(DEFAULT_VALIDITY, Duration::from_secs);
    Ok(LoginOutcome { token, valid_for })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_login_body_carries_credentials() {
        let body = encode_login_body(
            &Username::new("admin").unwrap(),
            &Password::new("secret").unwrap(),
        );
        assert_eq!(
            body,
            serde_json::json!({"username": "admin", "password": "secret"})
        );
    }

    #[test]
    fn decode_enveloped_response() {
        let json = r#"{"success": true, "data": {"token": "abc123", "expires": 299}}"#;
        let outcome = decode_login_response(json).unwrap();
        assert_eq!(outcome.token, "abc123");
        assert_eq!(outcome.valid_for, Duration::from_secs(299));
    }

    #[test]
    fn decode_flat_response_from_older_firmware() {
        let json = r#"{"token": "abc123", "expires": 120}"#;
        let outcome = decode_login_response(json).unwrap();
        assert_eq!(outcome.token, "abc123");
        assert_eq!(outcome.valid_for, Duration::from_secs(120));
    }

    #[test]
    fn missing_expires_falls_back_to_session_lifetime() {
        let json = r#"{"data": {"token": "abc123"}}"#;
        let outcome = decode_login_response(json).unwrap();
        assert_eq!(outcome.valid_for, Duration::from_secs(299));
    }

    #[test]
    fn token_free_body_is_rejected() {
        let err = decode_login_response(r#"{"success": false}"#).unwrap_err();
        assert!(matches!(err, TransportError::MissingToken));
    }

    #[test]
    fn invalid_json_is_rejected() {
        let err = decode_login_response("{ not json }").unwrap_err();
        assert!(matches!(err, TransportError::Json(_)));
    }

    #[test]
    fn empty_data_envelope_still_reads_top_level_token() {
        let json = r#"{"data": {}, "token": "abc123"}"#;
        let outcome = decode_login_response(json).unwrap();
        assert_eq!(outcome.token, "abc123");
    }
}
