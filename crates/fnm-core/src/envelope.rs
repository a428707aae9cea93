//! The appliance's uniform JSON response envelope.
//!
//! Every FastNetMon reply wraps its payload in the same shape:
//! `{ "success": bool, "error_text": string, "values"?: [...] }`. A reply
//! with `success == false` is the appliance's only way of signalling a
//! semantic failure, and `error_text` must be surfaced to the caller
//! verbatim. Key names here are fixed by the appliance firmware.

use serde::Deserialize;

use crate::error::{Error, Result};

/// Bare acknowledgement envelope for operations without a payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Human-readable failure reason; empty on success.
    pub error_text: String,
}

impl Envelope {
    /// Convert the envelope into a result, raising the appliance's own
    /// error text on failure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Appliance`] when the envelope reports
    /// `success == false`.
    pub fn into_result(self) -> Result<()> {
        if self.success {
            Ok(())
        } else {
            Err(Error::Appliance(self.error_text))
        }
    }
}

/// Envelope carrying an ordered sequence of typed records.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListEnvelope<T> {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Human-readable failure reason; empty on success.
    pub error_text: String,
    /// Result records, in the order the appliance returned them. Failure
    /// envelopes omit the key entirely, so decoding must not require it.
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,
}

impl<T> ListEnvelope<T> {
    /// Extract the full result sequence, order preserved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Appliance`] when the envelope reports failure.
    pub fn into_values(self) -> Result<Vec<T>> {
        if self.success {
            Ok(self.values)
        } else {
            Err(Error::Appliance(self.error_text))
        }
    }

    /// Extract the first record of a single-item query.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Appliance`] when the envelope reports failure, or
    /// [`Error::NotFound`] when the result sequence is empty.
    pub fn into_single(self, subject: &str) -> Result<T> {
        let mut values = self.into_values()?;
        if values.is_empty() {
            return Err(Error::NotFound(subject.to_string()));
        }
        Ok(values.swap_remove(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_success_yields_ok() {
        let env: Envelope =
            serde_json::from_str(r#"{"success": true, "error_text": ""}"#).unwrap();
        assert!(env.into_result().is_ok());
    }

    #[test]
    fn envelope_failure_carries_error_text_verbatim() {
        let env: Envelope =
            serde_json::from_str(r#"{"success": false, "error_text": "bad option"}"#).unwrap();
        let err = env.into_result().unwrap_err();
        assert_eq!(err, Error::Appliance("bad option".to_string()));
    }

    #[test]
    fn envelope_missing_keys_is_a_decode_error() {
        let result: std::result::Result<Envelope, _> = serde_json::from_str(r#"{"ok": true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn list_envelope_preserves_order() {
        let env: ListEnvelope<u32> =
            serde_json::from_str(r#"{"success": true, "error_text": "", "values": [3, 1, 2]}"#)
                .unwrap();
        assert_eq!(env.into_values().unwrap(), vec![3, 1, 2]);
    }

    #[test]
    fn list_envelope_failure_without_values_key_decodes() {
        // Semantic failures come back as a bare envelope with no values key.
        let env: ListEnvelope<u32> =
            serde_json::from_str(r#"{"success": false, "error_text": "no such host group"}"#)
                .unwrap();
        assert_eq!(
            env.into_values().unwrap_err(),
            Error::Appliance("no such host group".to_string())
        );
    }

    #[test]
    fn list_envelope_failure_wins_over_values() {
        let env: ListEnvelope<u32> = serde_json::from_str(
            r#"{"success": false, "error_text": "no such group", "values": [1]}"#,
        )
        .unwrap();
        assert_eq!(
            env.into_values().unwrap_err(),
            Error::Appliance("no such group".to_string())
        );
    }

    #[test]
    fn list_envelope_empty_single_is_not_found() {
        let env: ListEnvelope<u32> =
            serde_json::from_str(r#"{"success": true, "error_text": "", "values": []}"#).unwrap();
        let err = env.into_single("grp1").unwrap_err();
        assert_eq!(err, Error::NotFound("grp1".to_string()));
    }

    #[test]
    fn list_envelope_single_takes_first_element() {
        let env: ListEnvelope<u32> =
            serde_json::from_str(r#"{"success": true, "error_text": "", "values": [7, 8]}"#)
                .unwrap();
        assert_eq!(env.into_single("grp1").unwrap(), 7);
    }
}
