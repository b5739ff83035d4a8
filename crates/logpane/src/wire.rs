//! Header transport: recognizing and decoding ChromeLogger response headers.
//!
//! Producers serialize a batch as JSON, UTF-8 encode it, and base64 it into
//! a response header. Both the ChromeLogger header and the older ChromePHP
//! one carry the same payload format.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use logpane_protocol::RawBatch;
use thiserror::Error;

/// Response headers that carry batch payloads.
pub const DATA_HEADERS: [&str; 2] = ["x-chromelogger-data", "x-chromephp-data"];

/// Whether a header name is one of the recognized data headers.
///
/// Header names compare case-insensitively, matching how HTTP treats them.
pub fn is_data_header(name: &str) -> bool {
    DATA_HEADERS
        .iter()
        .any(|header| header.eq_ignore_ascii_case(name))
}

/// A header value that could not be decoded into a batch.
///
/// Each stage of the unwrapping can fail independently: the base64
/// envelope, the UTF-8 text inside it, or the JSON document shape.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("header value is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("decoded payload is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("payload is not a batch document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Unwraps a raw header value into a batch: base64, then UTF-8, then JSON.
pub fn decode_header(value: &str) -> Result<RawBatch, DecodeError> {
    let bytes = STANDARD.decode(value.trim())?;
    let text = String::from_utf8(bytes)?;
    Ok(serde_json::from_str(&text)?)
}

/// The request a delivery belongs to, shown as a console heading when
/// request lines are enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: String,
    pub url: String,
}

impl RequestLine {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde_json::json;

    #[test]
    fn recognizes_both_headers_case_insensitively() {
        assert!(is_data_header("x-chromelogger-data"));
        assert!(is_data_header("X-ChromeLogger-Data"));
        assert!(is_data_header("X-CHROMEPHP-DATA"));
        assert!(!is_data_header("x-other-data"));
    }

    #[test]
    fn decodes_a_wire_payload() {
        let payload = json!({
            "version": "4.1.0",
            "columns": ["log", "backtrace", "type"],
            "rows": [[["hello"], "app.php:3", "info"]],
        });
        let encoded = STANDARD.encode(payload.to_string());

        let batch = decode_header(&encoded).unwrap();
        assert_eq!(batch.rows.len(), 1);
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let encoded = STANDARD.encode(json!({"rows": []}).to_string());
        assert!(decode_header(&format!("  {encoded} ")).is_ok());
    }

    #[test]
    fn invalid_base64_is_a_decode_error() {
        assert!(matches!(
            decode_header("not//valid==base64!"),
            Err(DecodeError::Base64(_))
        ));
    }

    #[test]
    fn non_utf8_payload_is_a_decode_error() {
        let encoded = STANDARD.encode([0xff, 0xfe, 0x00]);
        assert!(matches!(
            decode_header(&encoded),
            Err(DecodeError::Utf8(_))
        ));
    }

    #[test]
    fn non_batch_json_is_a_decode_error() {
        let encoded = STANDARD.encode("[1, 2, 3]");
        assert!(matches!(
            decode_header(&encoded),
            Err(DecodeError::Json(_))
        ));
    }
}
