//! Wire shapes of the `GET /fichas` response.
//!
//! Two API generations exist and they are not compatible:
//! - `v1` returns the records as a bare JSON array
//! - `v2` wraps them in an object: `{"data": [...]}`
//!
//! A client is pinned to one generation and rejects the other shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::FichaError;
use crate::models::Ficha;

/// Field carrying the records in a `v2` envelope.
const ENVELOPE_FIELD: &str = "data";

/// API generation the client speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersion {
    V1,
    #[default]
    V2,
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiVersion::V1 => write!(f, "v1"),
            ApiVersion::V2 => write!(f, "v2"),
        }
    }
}

impl FromStr for ApiVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "v1" | "1" => Ok(ApiVersion::V1),
            "v2" | "2" => Ok(ApiVersion::V2),
            _ => Err(format!("Invalid API version '{}'. Valid options: v1, v2", s)),
        }
    }
}

/// Decodes a list response body according to `version`.
pub fn decode_list(version: ApiVersion, body: &[u8]) -> Result<Vec<Ficha>, FichaError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| FichaError::MalformedResponse(format!("invalid JSON: {}", e)))?;

    let records = match (version, value) {
        (ApiVersion::V1, Value::Array(items)) => Value::Array(items),
        (ApiVersion::V2, Value::Object(mut map)) => match map.remove(ENVELOPE_FIELD) {
            Some(items @ Value::Array(_)) => items,
            Some(_) => {
                return Err(FichaError::MalformedResponse(format!(
                    "envelope field '{}' is not an array",
                    ENVELOPE_FIELD
                )))
            }
            None => {
                return Err(FichaError::MalformedResponse(format!(
                    "envelope has no '{}' field",
                    ENVELOPE_FIELD
                )))
            }
        },
        (ApiVersion::V1, other) => {
            return Err(FichaError::MalformedResponse(format!(
                "expected an array for API v1, got {}",
                kind(&other)
            )))
        }
        (ApiVersion::V2, other) => {
            return Err(FichaError::MalformedResponse(format!(
                "expected an envelope object for API v2, got {}",
                kind(&other)
            )))
        }
    };

    serde_json::from_value(records)
        .map_err(|e| FichaError::MalformedResponse(format!("invalid ficha: {}", e)))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FichaStatus;

    const RECORD: &str = r#"{"code":1,"startDate":"2024-01-01","endClassworkDate":"2024-06-01","endRecordDate":"2024-07-01","programId":5,"siteId":2,"status":"lectiva"}"#;

    #[test]
    fn test_v2_envelope() {
        let body = format!(r#"{{"data":[{}]}}"#, RECORD);
        let fichas = decode_list(ApiVersion::V2, body.as_bytes()).unwrap();
        assert_eq!(fichas.len(), 1);
        assert_eq!(fichas[0].code, 1);
        assert_eq!(fichas[0].status, FichaStatus::Lectiva);
    }

    #[test]
    fn test_v1_bare_array() {
        let body = format!("[{}]", RECORD);
        let fichas = decode_list(ApiVersion::V1, body.as_bytes()).unwrap();
        assert_eq!(fichas.len(), 1);
        assert_eq!(fichas[0].site_id, 2);
    }

    #[test]
    fn test_versions_are_not_interchangeable() {
        let bare = format!("[{}]", RECORD);
        let wrapped = format!(r#"{{"data":[{}]}}"#, RECORD);

        assert!(matches!(
            decode_list(ApiVersion::V2, bare.as_bytes()),
            Err(FichaError::MalformedResponse(_))
        ));
        assert!(matches!(
            decode_list(ApiVersion::V1, wrapped.as_bytes()),
            Err(FichaError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_envelope_without_data_field() {
        let err = decode_list(ApiVersion::V2, br#"{"items":[]}"#).unwrap_err();
        assert!(err.to_string().contains("no 'data' field"));

        let err = decode_list(ApiVersion::V2, br#"{"data":{}}"#).unwrap_err();
        assert!(err.to_string().contains("not an array"));
    }

    #[test]
    fn test_invalid_record_is_malformed() {
        let err = decode_list(ApiVersion::V1, br#"[{"code":"one"}]"#).unwrap_err();
        assert!(matches!(err, FichaError::MalformedResponse(_)));
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let err = decode_list(ApiVersion::V2, b"<html>").unwrap_err();
        assert!(matches!(err, FichaError::MalformedResponse(_)));
    }

    #[test]
    fn test_api_version_parse() {
        assert_eq!("v1".parse::<ApiVersion>().unwrap(), ApiVersion::V1);
        assert_eq!("V2".parse::<ApiVersion>().unwrap(), ApiVersion::V2);
        assert!("v3".parse::<ApiVersion>().is_err());
        assert_eq!(ApiVersion::default(), ApiVersion::V2);
    }
}
