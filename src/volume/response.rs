//! Audio service response parsing
//!
//! The audio subsystem answers `getMasterVolume` with a JSON payload such as
//! `{"returnValue": true, "volumeStatus": {"volume": 42}}`. Anything else is a
//! diagnostic, never a fatal error.

use crate::store::MAX_VOLUME;
use serde::Deserialize;
use thiserror::Error;

/// Why a response did not yield a volume level
#[derive(Debug, Error)]
pub enum ResponseError {
    /// Payload did not match the expected shape
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// `returnValue` was false or absent
    #[error("service reported failure{}", .0.as_deref().map(|t| format!(": {t}")).unwrap_or_default())]
    Unsuccessful(Option<String>),

    /// Success without a `volumeStatus` field
    #[error("response carries no volumeStatus")]
    MissingStatus,

    /// `volumeStatus` present but no level in it
    #[error("volumeStatus carries no volume")]
    MissingVolume,

    /// Level outside the supported range
    #[error("volume {0} out of range 0..={MAX_VOLUME}")]
    OutOfRange(u64),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MasterVolumePayload {
    #[serde(default)]
    return_value: bool,
    #[serde(default)]
    error_text: Option<String>,
    #[serde(default)]
    volume_status: Option<VolumeStatus>,
}

#[derive(Debug, Deserialize)]
struct VolumeStatus {
    #[serde(default)]
    volume: Option<u64>,
}

/// Extract the master volume from a `getMasterVolume` payload
///
/// A reported level of 0 is a real level (muted output), not an absent one.
pub fn parse_master_volume(payload: &serde_json::Value) -> Result<u8, ResponseError> {
    let parsed = MasterVolumePayload::deserialize(payload)?;

    if !parsed.return_value {
        return Err(ResponseError::Unsuccessful(parsed.error_text));
    }

    let status = parsed.volume_status.ok_or(ResponseError::MissingStatus)?;
    let volume = status.volume.ok_or(ResponseError::MissingVolume)?;

    u8::try_from(volume)
        .ok()
        .filter(|level| *level <= MAX_VOLUME)
        .ok_or(ResponseError::OutOfRange(volume))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_well_formed_success() {
        let payload = json!({
            "status": "volumeStatus",
            "returnValue": true,
            "volumeStatus": { "volume": 42 }
        });
        assert_eq!(parse_master_volume(&payload).unwrap(), 42);
    }

    #[test]
    fn test_zero_is_a_valid_level() {
        let payload = json!({ "returnValue": true, "volumeStatus": { "volume": 0, "muted": false } });
        assert_eq!(parse_master_volume(&payload).unwrap(), 0);
    }

    #[test]
    fn test_unsuccessful_response() {
        let result = parse_master_volume(&json!({ "returnValue": false }));
        assert!(matches!(result, Err(ResponseError::Unsuccessful(None))));

        let result = parse_master_volume(&json!({ "returnValue": false, "errorText": "busy" }));
        let error = result.unwrap_err();
        assert_eq!(error.to_string(), "service reported failure: busy");
    }

    #[test]
    fn test_missing_return_value_is_unsuccessful() {
        let result = parse_master_volume(&json!({ "volumeStatus": { "volume": 10 } }));
        assert!(matches!(result, Err(ResponseError::Unsuccessful(_))));
    }

    #[test]
    fn test_missing_status_and_volume() {
        let result = parse_master_volume(&json!({ "returnValue": true }));
        assert!(matches!(result, Err(ResponseError::MissingStatus)));

        let result = parse_master_volume(&json!({ "returnValue": true, "volumeStatus": {} }));
        assert!(matches!(result, Err(ResponseError::MissingVolume)));

        let result =
            parse_master_volume(&json!({ "returnValue": true, "volumeStatus": { "volume": null } }));
        assert!(matches!(result, Err(ResponseError::MissingVolume)));
    }

    #[test]
    fn test_malformed_payloads() {
        for payload in [
            json!("volume"),
            json!(null),
            json!({ "returnValue": "yes" }),
            json!({ "returnValue": true, "volumeStatus": { "volume": -3 } }),
            json!({ "returnValue": true, "volumeStatus": { "volume": "loud" } }),
        ] {
            let result = parse_master_volume(&payload);
            assert!(
                matches!(result, Err(ResponseError::Malformed(_))),
                "{payload} should be malformed, got {result:?}"
            );
        }
    }

    #[test]
    fn test_out_of_range_volume() {
        let result = parse_master_volume(&json!({ "returnValue": true, "volumeStatus": { "volume": 101 } }));
        assert!(matches!(result, Err(ResponseError::OutOfRange(101))));

        let result =
            parse_master_volume(&json!({ "returnValue": true, "volumeStatus": { "volume": 70000 } }));
        assert!(matches!(result, Err(ResponseError::OutOfRange(70000))));
    }
}
